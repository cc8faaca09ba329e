//! The persisted graph document.
//!
//! # Format
//!
//! A JSON container with a version tag, one record per node, and edges
//! referencing node records by index:
//!
//! ```json
//! {
//!   "version": 1,
//!   "nodes": ["PackageId:Pkg.B,Path:/B.unit", "PackageId:,Path:/A.unit"],
//!   "edges": [[1, 0]]
//! }
//! ```
//!
//! Each node record is `PackageId:<id>,Path:<path>`. Both fields are always
//! present positionally; an empty field encodes as a zero-length value
//! after its prefix, so emptiness survives the round trip. Decoding splits
//! on the first comma and strips the literal prefixes; a missing prefix
//! falls back to the raw substring rather than erroring. The record format
//! has no escape mechanism, so a package id containing a comma does not
//! survive the round trip.
//!
//! Encoding is deterministic: nodes sorted by (package id, path), edges
//! sorted by index pair. `decode(encode(g))` equals `g` under node-set and
//! edge-set equality. Malformed documents fail with [`DecodeError`] — a
//! truncated or garbled document never silently decodes into a
//! plausible-looking graph.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Edge, Graph, Node};

/// Literal prefix of the package id half of a node record.
pub const PACKAGE_PREFIX: &str = "PackageId:";
/// Literal prefix of the path half of a node record.
pub const PATH_PREFIX: &str = "Path:";

const DOC_VERSION: u32 = 1;

/// Failure to decode a graph document.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed graph document")]
    Document(#[from] serde_json::Error),

    #[error("unsupported graph document version {0}")]
    UnsupportedVersion(u32),

    #[error("node record {0:?} has no `,` separating PackageId and Path")]
    MissingSeparator(String),

    #[error("edge endpoint index {index} is out of range ({nodes} node records)")]
    EdgeOutOfRange { index: usize, nodes: usize },
}

#[derive(Debug, Serialize, Deserialize)]
struct GraphDoc {
    version: u32,
    nodes: Vec<String>,
    edges: Vec<[usize; 2]>,
}

/// Serialize a graph to its document form.
pub fn encode(graph: &Graph) -> Result<String, serde_json::Error> {
    let nodes = graph.sorted_nodes();
    let index: HashMap<&Node, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (*node, i))
        .collect();
    let mut edges: Vec<[usize; 2]> = graph
        .edges
        .iter()
        .filter_map(|edge| Some([*index.get(&edge.source)?, *index.get(&edge.target)?]))
        .collect();
    edges.sort_unstable();

    let doc = GraphDoc {
        version: DOC_VERSION,
        nodes: nodes.iter().map(|node| encode_node(node)).collect(),
        edges,
    };
    serde_json::to_string_pretty(&doc)
}

/// Parse a graph document back into a graph.
pub fn decode(text: &str) -> Result<Graph, DecodeError> {
    let doc: GraphDoc = serde_json::from_str(text)?;
    if doc.version != DOC_VERSION {
        return Err(DecodeError::UnsupportedVersion(doc.version));
    }

    let nodes: Vec<Node> = doc
        .nodes
        .iter()
        .map(|record| decode_node(record))
        .collect::<Result<_, _>>()?;

    let mut edges: HashSet<Edge> = HashSet::new();
    for &[source, target] in &doc.edges {
        let source = nodes.get(source).ok_or(DecodeError::EdgeOutOfRange {
            index: source,
            nodes: nodes.len(),
        })?;
        let target = nodes.get(target).ok_or(DecodeError::EdgeOutOfRange {
            index: target,
            nodes: nodes.len(),
        })?;
        edges.insert(Edge::new(source.clone(), target.clone()));
    }

    Ok(Graph {
        nodes: nodes.into_iter().collect(),
        edges,
    })
}

/// Encode one node as `PackageId:<id>,Path:<path>`.
///
/// Records carry no escaping: a package id containing a comma encodes
/// ambiguously, because [`decode_node`] splits on the first comma and the
/// remainder of the id is absorbed into the path half.
pub fn encode_node(node: &Node) -> String {
    format!(
        "{PACKAGE_PREFIX}{},{PATH_PREFIX}{}",
        node.package_id, node.path
    )
}

/// Decode one node record.
pub fn decode_node(record: &str) -> Result<Node, DecodeError> {
    let (package_half, path_half) = record
        .split_once(',')
        .ok_or_else(|| DecodeError::MissingSeparator(record.to_string()))?;
    Ok(Node::new(
        strip_prefix_or_self(package_half, PACKAGE_PREFIX),
        strip_prefix_or_self(path_half, PATH_PREFIX),
    ))
}

/// Remove `prefix` from the front of `input`, or return `input` unchanged
/// when the prefix is absent.
fn strip_prefix_or_self<'a>(input: &'a str, prefix: &str) -> &'a str {
    input.strip_prefix(prefix).unwrap_or(input)
}
