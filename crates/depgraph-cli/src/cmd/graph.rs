//! `dg graph` — build, filter, and emit the dependency graph.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::info;

use depgraph_core::fs::RealFs;
use depgraph_core::graph::{Graph, GraphFilter, build_graph, codec, dot};
use depgraph_core::scan;

use crate::output::write_output;

/// Arguments for `dg graph`.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Unit files or directories to scan.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Node filter applied before output.
    #[arg(short = 'f', long, value_enum, default_value_t = FilterArg::All)]
    pub filter: FilterArg,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Graph)]
    pub format: FormatArg,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// CLI spelling of the structural node filters.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterArg {
    /// Keep every node.
    All,
    /// Keep nodes with both a package id and a path.
    PathAndPackage,
    /// Keep nodes whose path is a unit file that exists locally.
    LocalPath,
}

impl From<FilterArg> for GraphFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Self::All,
            FilterArg::PathAndPackage => Self::PathAndPackage,
            FilterArg::LocalPath => Self::LocalPath,
        }
    }
}

/// CLI spelling of the output formats.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// The serialized graph document (round-trippable).
    Graph,
    /// Graphviz DOT text.
    Dot,
    /// One node per line.
    List,
}

/// Render a graph in the requested format.
pub fn render_graph(graph: &Graph, format: FormatArg) -> Result<String> {
    match format {
        FormatArg::Graph => codec::encode(graph).context("serializing graph document"),
        FormatArg::Dot => Ok(dot::to_dot(graph)),
        FormatArg::List => Ok(graph.to_node_lines()),
    }
}

/// Run `dg graph`. Returns `false` when no unit was found and processed.
pub fn run_graph(args: &GraphArgs) -> Result<bool> {
    let files = scan::find_units(&args.paths);
    let units = scan::load_units(&files);
    if units.is_empty() {
        return Ok(false);
    }

    let graph = build_graph(&units);
    let graph = GraphFilter::from(args.filter).apply(&graph, &RealFs);
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph ready"
    );

    let text = render_graph(&graph, args.format)?;
    write_output(&text, args.output.as_deref())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_units(dir: &Path) {
        fs::write(
            dir.join("a.unit"),
            "name = \"a\"\n\n[[reference]]\nkind = \"project\"\npath = \"b.unit\"\n",
        )
        .expect("write a.unit");
        fs::write(
            dir.join("b.unit"),
            "name = \"b\"\npackage-id = \"Pkg.B\"\n",
        )
        .expect("write b.unit");
    }

    #[test]
    fn builds_and_writes_a_node_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_units(dir.path());
        let out = dir.path().join("nodes.txt");

        let args = GraphArgs {
            paths: vec![dir.path().to_path_buf()],
            filter: FilterArg::All,
            format: FormatArg::List,
            output: Some(out.clone()),
        };
        assert!(run_graph(&args).expect("runs"));

        let listing = fs::read_to_string(&out).expect("read output");
        assert!(listing.contains("a.unit"));
        assert!(listing.lines().any(|line| line.starts_with("Pkg.B, ")));
    }

    #[test]
    fn graph_document_round_trips_through_the_codec() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_units(dir.path());
        let out = dir.path().join("deps.json");

        let args = GraphArgs {
            paths: vec![dir.path().to_path_buf()],
            filter: FilterArg::All,
            format: FormatArg::Graph,
            output: Some(out.clone()),
        };
        assert!(run_graph(&args).expect("runs"));

        let text = fs::read_to_string(&out).expect("read output");
        let decoded = codec::decode(&text).expect("decodes");
        assert_eq!(decoded.node_count(), 2);
        assert_eq!(decoded.edge_count(), 1);
    }

    #[test]
    fn path_and_package_filter_drops_single_keyed_nodes() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_units(dir.path());
        let out = dir.path().join("nodes.txt");

        let args = GraphArgs {
            paths: vec![dir.path().to_path_buf()],
            filter: FilterArg::PathAndPackage,
            format: FormatArg::List,
            output: Some(out.clone()),
        };
        assert!(run_graph(&args).expect("runs"));

        let listing = fs::read_to_string(&out).expect("read output");
        assert_eq!(listing.lines().count(), 1);
        assert!(listing.starts_with("Pkg.B, "));
    }

    #[test]
    fn empty_tree_reports_nothing_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = GraphArgs {
            paths: vec![dir.path().to_path_buf()],
            filter: FilterArg::All,
            format: FormatArg::List,
            output: None,
        };
        assert!(!run_graph(&args).expect("runs"));
    }
}
