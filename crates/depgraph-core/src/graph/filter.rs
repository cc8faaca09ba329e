//! Structural node filters.
//!
//! Each filter is a pure `Graph -> Graph` function: it selects a node
//! subset, then keeps exactly the edges whose both endpoints survived, so
//! the closure invariant holds on the output.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;

use super::{Edge, Graph, Node};
use crate::fs::PathProbe;
use crate::manifest::UNIT_EXTENSION;

/// Which nodes a filtered graph keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GraphFilter {
    /// Keep every node.
    #[default]
    All,
    /// Keep nodes carrying both a package id and a path.
    PathAndPackage,
    /// Keep nodes whose path has the unit extension and denotes a file
    /// that currently exists.
    LocalPath,
}

impl GraphFilter {
    /// Apply the filter, producing a new graph.
    pub fn apply(self, graph: &Graph, fs: &dyn PathProbe) -> Graph {
        let nodes: HashSet<Node> = graph
            .nodes
            .iter()
            .filter(|node| self.keeps(node, fs))
            .cloned()
            .collect();
        let edges: HashSet<Edge> = graph
            .edges
            .iter()
            .filter(|edge| nodes.contains(&edge.source) && nodes.contains(&edge.target))
            .cloned()
            .collect();
        Graph { nodes, edges }
    }

    fn keeps(self, node: &Node, fs: &dyn PathProbe) -> bool {
        match self {
            Self::All => true,
            Self::PathAndPackage => node.has_both_keys(),
            Self::LocalPath => {
                let path = Path::new(&node.path);
                !node.path.is_empty()
                    && path.extension() == Some(OsStr::new(UNIT_EXTENSION))
                    && fs.is_file(path)
            }
        }
    }
}
