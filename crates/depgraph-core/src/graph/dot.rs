//! Graphviz DOT rendering.
//!
//! The engine's only rendering responsibility is DOT text plus one display
//! hint: nodes carrying both identity keys are filled light blue, marking
//! units that are locally buildable and published. Turning the DOT into an
//! image is an external concern.

use std::collections::HashMap;
use std::fmt::Write as _;

use super::{Graph, Node};

/// Render the graph as a Graphviz `digraph`.
///
/// Output is deterministic: node ids follow the graph's stable node order.
pub fn to_dot(graph: &Graph) -> String {
    let nodes = graph.sorted_nodes();
    let ids: HashMap<&Node, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (*node, i))
        .collect();

    let mut out = String::from("digraph dependencies {\n");
    for (i, node) in nodes.iter().enumerate() {
        let label = escape(&label(node));
        if node.has_both_keys() {
            let _ = writeln!(
                out,
                "    n{i} [label=\"{label}\", style=filled, fillcolor=lightblue];"
            );
        } else {
            let _ = writeln!(out, "    n{i} [label=\"{label}\"];");
        }
    }
    for edge in graph.sorted_edges() {
        if let (Some(source), Some(target)) = (ids.get(&edge.source), ids.get(&edge.target)) {
            let _ = writeln!(out, "    n{source} -> n{target};");
        }
    }
    out.push_str("}\n");
    out
}

/// Package id over path when both are known, otherwise whichever key exists.
fn label(node: &Node) -> String {
    if node.package_id.is_empty() {
        node.path.clone()
    } else if node.path.is_empty() {
        node.package_id.clone()
    } else {
        format!("{}\n{}", node.package_id, node.path)
    }
}

fn escape(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
