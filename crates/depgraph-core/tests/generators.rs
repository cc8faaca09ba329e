//! Proptest strategies shared by the property suites.
//!
//! Key spaces are deliberately tiny (a handful of package ids and paths) so
//! generated inputs collide often — merges, coalescing, and shared
//! references are the interesting cases, and a large key space would almost
//! never produce them.

use std::collections::BTreeSet;

use proptest::prelude::*;

use depgraph_core::graph::{Graph, Node, build_graph};
use depgraph_core::unit::{Reference, UnitInfo};

pub fn arb_package_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-c]".prop_map(|k| format!("Pkg.{k}")),
    ]
}

pub fn arb_path() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-e]".prop_map(|k| format!("/{k}.unit")),
    ]
}

pub fn arb_node() -> impl Strategy<Value = Node> {
    (arb_package_id(), arb_path()).prop_map(|(package_id, path)| Node::new(package_id, path))
}

pub fn arb_reference() -> impl Strategy<Value = Reference> {
    prop_oneof![
        "[a-c]".prop_map(|k| Reference::Package {
            name: format!("Pkg.{k}"),
            version: String::new(),
        }),
        "[a-e]".prop_map(|k| Reference::Project {
            path: format!("/{k}.unit"),
        }),
        "[a-c]".prop_map(|k| Reference::Library {
            name: format!("lib{k}"),
        }),
    ]
}

pub fn arb_units() -> impl Strategy<Value = Vec<UnitInfo>> {
    prop::collection::vec(
        (
            "[a-e]",
            arb_package_id(),
            prop::collection::btree_set(arb_reference(), 0..4),
        ),
        0..6,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(stem, package_id, references)| UnitInfo {
                name: stem.clone(),
                path: format!("/{stem}.unit"),
                package_id,
                references: references.into_iter().collect::<BTreeSet<_>>(),
            })
            .collect()
    })
}

/// Graphs generated through the builder, so they satisfy its invariants.
pub fn arb_graph() -> impl Strategy<Value = Graph> {
    arb_units().prop_map(|units| build_graph(&units))
}

/// Seed identifier pools drawn from the same key space as [`arb_units`].
pub fn arb_seeds(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            "[a-e]".prop_map(|k| format!("/{k}.unit")),
            "[a-c]".prop_map(|k| format!("Pkg.{k}")),
        ],
        0..max,
    )
}
