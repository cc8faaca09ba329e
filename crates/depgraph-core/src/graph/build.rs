//! Two-pass graph construction from unit descriptors.
//!
//! # Design
//!
//! Pass one registers every identity: first a node per local unit, then a
//! node per declared reference. Registering references lets an external
//! package reference merge into an already-known local unit sharing a key,
//! so a single node ends up carrying both its local path and the package id
//! it is known by from the outside.
//!
//! Pass two wires edges against the *final* merged identities. Looking up
//! endpoints through the registry — not using the nodes as originally
//! declared — is what makes a reference and a local unit land on the same
//! node. A reference that resolves to no node is skipped, not an error;
//! every reference was registered in pass one, so in practice this only
//! guards future changes.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::{Edge, Graph, Node, NodeRegistry};
use crate::unit::UnitInfo;

/// Build the dependency graph for a set of unit descriptors.
///
/// The result satisfies the closure invariant: every edge endpoint is a
/// member of the node set. Duplicate declared references collapse to one
/// edge; a unit referencing itself yields a self-edge.
pub fn build_graph(units: &[UnitInfo]) -> Graph {
    let mut registry = NodeRegistry::new();

    for unit in units {
        registry.add(Node::from_unit(unit));
    }
    for unit in units {
        for reference in &unit.references {
            registry.add(Node::from_reference(reference));
        }
    }

    let mut edges: HashSet<Edge> = HashSet::new();
    for unit in units {
        let Some(source) = registry.resolve(&Node::from_unit(unit)) else {
            debug!(unit = %unit.name, "unit resolved to no node, skipping its edges");
            continue;
        };
        for reference in &unit.references {
            match registry.resolve(&Node::from_reference(reference)) {
                Some(target) => {
                    edges.insert(Edge::new(source.clone(), target.clone()));
                }
                None => {
                    trace!(unit = %unit.name, reference = %reference, "unresolved reference");
                }
            }
        }
    }

    debug!(
        units = units.len(),
        nodes = registry.len(),
        edges = edges.len(),
        "built dependency graph"
    );
    Graph {
        nodes: registry.into_nodes().collect(),
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Reference;

    fn unit(name: &str, path: &str, package_id: &str, references: Vec<Reference>) -> UnitInfo {
        UnitInfo {
            name: name.into(),
            path: path.into(),
            package_id: package_id.into(),
            references: references.into_iter().collect(),
        }
    }

    #[test]
    fn project_reference_merges_with_local_unit() {
        let units = [
            unit(
                "A",
                "/A.unit",
                "",
                vec![Reference::Project {
                    path: "/B.unit".into(),
                }],
            ),
            unit("B", "/B.unit", "Pkg.B", vec![]),
        ];
        let graph = build_graph(&units);

        let expected_a = Node::new("", "/A.unit");
        let expected_b = Node::new("Pkg.B", "/B.unit");
        assert_eq!(graph.node_count(), 2);
        assert!(graph.nodes.contains(&expected_a));
        assert!(graph.nodes.contains(&expected_b));
        assert_eq!(
            graph.edges,
            [Edge::new(expected_a, expected_b)].into_iter().collect()
        );
    }

    #[test]
    fn package_reference_merges_into_published_local_unit() {
        let units = [
            unit(
                "C",
                "/C.unit",
                "",
                vec![Reference::Package {
                    name: "Pkg.B".into(),
                    version: "1.0".into(),
                }],
            ),
            unit("B", "/B.unit", "Pkg.B", vec![]),
        ];
        let graph = build_graph(&units);

        // One target node carrying both keys, not a separate external node.
        let b = Node::new("Pkg.B", "/B.unit");
        assert_eq!(graph.node_count(), 2);
        assert!(graph.nodes.contains(&b));
        assert_eq!(
            graph.edges,
            [Edge::new(Node::new("", "/C.unit"), b)].into_iter().collect()
        );
    }

    #[test]
    fn external_references_become_single_keyed_nodes() {
        let units = [unit(
            "A",
            "/A.unit",
            "",
            vec![
                Reference::Package {
                    name: "Serde".into(),
                    version: "1.0".into(),
                },
                Reference::Library {
                    name: "zlib".into(),
                },
            ],
        )];
        let graph = build_graph(&units);

        assert_eq!(graph.node_count(), 3);
        assert!(graph.nodes.contains(&Node::new("Serde", "")));
        assert!(graph.nodes.contains(&Node::new("", "zlib")));
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.is_closed());
    }

    #[test]
    fn duplicate_references_from_two_units_keep_distinct_edges() {
        let shared = Reference::Package {
            name: "Pkg.X".into(),
            version: String::new(),
        };
        let units = [
            unit("A", "/A.unit", "", vec![shared.clone()]),
            unit("B", "/B.unit", "", vec![shared]),
        ];
        let graph = build_graph(&units);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn duplicate_package_ids_do_not_break_reference_resolution() {
        // Two units claim Pkg.A, so the second merges into the first and
        // its path survives only as an alias. A reference to that path
        // must still resolve to the merged node in pass two.
        let units = [
            unit("a", "/a.unit", "Pkg.A", vec![]),
            unit("b", "/b.unit", "Pkg.A", vec![]),
            unit(
                "c",
                "/c.unit",
                "",
                vec![Reference::Project {
                    path: "/b.unit".into(),
                }],
            ),
        ];
        let graph = build_graph(&units);

        let merged = Node::new("Pkg.A", "/a.unit");
        assert_eq!(graph.node_count(), 2);
        assert!(graph.nodes.contains(&merged));
        assert_eq!(
            graph.edges,
            [Edge::new(Node::new("", "/c.unit"), merged)]
                .into_iter()
                .collect()
        );
        assert!(graph.is_closed());
    }

    #[test]
    fn self_reference_yields_self_edge() {
        let units = [unit(
            "A",
            "/A.unit",
            "",
            vec![Reference::Project {
                path: "/A.unit".into(),
            }],
        )];
        let graph = build_graph(&units);
        let a = Node::new("", "/A.unit");
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edges, [Edge::new(a.clone(), a)].into_iter().collect());
    }

    #[test]
    fn empty_input_builds_empty_graph() {
        let graph = build_graph(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn builder_output_is_closed() {
        let units = [
            unit(
                "A",
                "/A.unit",
                "Pkg.A",
                vec![
                    Reference::Project {
                        path: "/B.unit".into(),
                    },
                    Reference::Package {
                        name: "Pkg.C".into(),
                        version: String::new(),
                    },
                ],
            ),
            unit(
                "B",
                "/B.unit",
                "",
                vec![Reference::Package {
                    name: "Pkg.A".into(),
                    version: String::new(),
                }],
            ),
        ];
        let graph = build_graph(&units);
        assert!(graph.is_closed());
    }
}
