//! Reverse-reachability: the induced subgraph of everything that
//! transitively depends on a seed set.
//!
//! # Design
//!
//! - **Explicit-stack DFS over the reverse adjacency**: edges are indexed
//!   by target once, then each traversal step walks the incoming edges of
//!   the node being expanded. No recursion, no callback machinery; the two
//!   accumulator sets (visited nodes, examined edges) are plain owned
//!   values.
//! - **Cumulative visited set**: later seeds skip nodes already reached
//!   from earlier ones, so total work is linear in graph size regardless
//!   of seed count.
//! - **Set-valued result**: traversal order among a node's incoming edges
//!   is unspecified and does not affect the answer — only membership does.
//!
//! An unmatched seed contributes nothing; no seeds matching means an empty
//! result graph, not an error.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{Edge, Graph, Node};

/// Compute the dependent closure of seed identifiers.
///
/// Each seed string is matched against node package ids and paths; literal
/// match only, unmatched seeds are ignored. The result contains the matched
/// seed nodes plus every node with a dependency path to one of them, and
/// exactly the original graph's edges between those nodes.
pub fn dependent_closure(graph: &Graph, seeds: &[String]) -> Graph {
    let seed_nodes: Vec<&Node> = graph
        .nodes
        .iter()
        .filter(|node| {
            seeds
                .iter()
                .any(|seed| *seed == node.package_id || *seed == node.path)
        })
        .collect();
    debug!(
        seeds = seeds.len(),
        matched = seed_nodes.len(),
        "resolved dependent-closure seeds"
    );
    closure(graph, seed_nodes)
}

/// Compute the dependent closure of seed nodes.
///
/// Seeds not present in the graph's node set are ignored.
pub fn dependent_closure_of(graph: &Graph, seeds: &[Node]) -> Graph {
    let seed_nodes: Vec<&Node> = seeds.iter().filter_map(|s| graph.nodes.get(s)).collect();
    closure(graph, seed_nodes)
}

fn closure<'g>(graph: &'g Graph, seeds: Vec<&'g Node>) -> Graph {
    // Reverse adjacency: node → edges that depend on it.
    let mut incoming: HashMap<&'g Node, Vec<&'g Edge>> = HashMap::new();
    for edge in &graph.edges {
        incoming.entry(&edge.target).or_default().push(edge);
    }

    let mut visited: HashSet<Node> = HashSet::new();
    let mut examined: HashSet<Edge> = HashSet::new();
    let mut stack: Vec<&'g Node> = Vec::new();

    for seed in seeds {
        if visited.contains(seed) {
            continue;
        }
        visited.insert(seed.clone());
        stack.push(seed);

        while let Some(node) = stack.pop() {
            for edge in incoming.get(node).into_iter().flatten() {
                examined.insert((*edge).clone());
                if !visited.contains(&edge.source) {
                    visited.insert(edge.source.clone());
                    stack.push(&edge.source);
                }
            }
        }
    }

    // Keeping only edges whose both endpoints were visited re-establishes
    // the closure invariant independently of the traversal above.
    let edges: HashSet<Edge> = examined
        .into_iter()
        .filter(|e| visited.contains(&e.source) && visited.contains(&e.target))
        .collect();

    Graph {
        nodes: visited,
        edges,
    }
}
