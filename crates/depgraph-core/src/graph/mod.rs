//! The dependency graph: nodes, edges, construction, queries, and codecs.
//!
//! # Overview
//!
//! - [`node`] — the [`Node`] type and the multi-keyed identity rules.
//! - [`registry`] — the merging node set used during construction.
//! - [`build`] — two-pass graph construction from unit descriptors.
//! - [`filter`] — structural node filters producing induced subgraphs.
//! - [`dependents`] — reverse-reachability: who depends on these seeds.
//! - [`codec`] — the persisted graph document and its parser.
//! - [`dot`] — Graphviz DOT rendering for external image generation.
//!
//! A [`Graph`] is an immutable value once built. Filters and queries return
//! a new graph; nothing here mutates its input.

#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

pub mod build;
pub mod codec;
pub mod dependents;
pub mod dot;
pub mod filter;
pub mod node;
pub mod registry;

use std::collections::HashSet;
use std::fmt::Write as _;

pub use build::build_graph;
pub use dependents::{dependent_closure, dependent_closure_of};
pub use filter::GraphFilter;
pub use node::Node;
pub use registry::NodeRegistry;

/// A directed dependency edge: `source` depends on `target`.
///
/// Edge equality is endpoint equality, so a graph never holds two identical
/// edges. Self-edges are representable and not filtered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub source: Node,
    pub target: Node,
}

impl Edge {
    /// Construct an edge meaning `source` depends on `target`.
    pub fn new(source: Node, target: Node) -> Self {
        Self { source, target }
    }
}

/// An immutable dependency graph value.
///
/// Invariant: every edge's source and target are members of `nodes`. The
/// builder, the filters, and the dependent-closure query all maintain this;
/// [`Graph::is_closed`] checks it for tests and decode validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub nodes: HashSet<Node>,
    pub edges: HashSet<Edge>,
}

impl Graph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if every edge endpoint is a member of the node set.
    pub fn is_closed(&self) -> bool {
        self.edges
            .iter()
            .all(|e| self.nodes.contains(&e.source) && self.nodes.contains(&e.target))
    }

    /// Nodes in a stable (package id, path) order for deterministic output.
    pub fn sorted_nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.iter().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Edges in a stable order for deterministic output.
    pub fn sorted_edges(&self) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self.edges.iter().collect();
        edges.sort_unstable();
        edges
    }

    /// One line per node, in stable order. The `--format list` output.
    pub fn to_node_lines(&self) -> String {
        let mut out = String::new();
        for node in self.sorted_nodes() {
            let _ = writeln!(out, "{node}");
        }
        out
    }
}
