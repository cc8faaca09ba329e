//! `dg dependents` — who transitively depends on the given seeds.
//!
//! The query can run against a freshly built graph (`--from <paths>`) or a
//! graph document saved earlier by `dg graph --format graph` (`--load`).
//! Seeds that match no node contribute nothing; an empty result is a valid
//! answer, not an error.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::info;

use depgraph_core::graph::{Graph, build_graph, codec, dependent_closure};
use depgraph_core::scan;

use crate::cmd::graph::{FormatArg, render_graph};
use crate::output::write_output;

/// Arguments for `dg dependents`.
#[derive(Args, Debug)]
pub struct DependentsArgs {
    /// Seed package ids or unit paths.
    #[arg(required = true, value_name = "SEED")]
    pub seeds: Vec<String>,

    /// Build the graph from these unit files or directories.
    #[arg(long = "from", value_name = "PATH", num_args = 1.., conflicts_with = "load")]
    pub from: Vec<PathBuf>,

    /// Load a previously saved graph document instead of scanning.
    #[arg(long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::List)]
    pub format: FormatArg,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Run `dg dependents`. Returns `false` when `--from` found no units.
pub fn run_dependents(args: &DependentsArgs) -> Result<bool> {
    let graph = match &args.load {
        Some(file) => {
            let text = fs::read_to_string(file)
                .with_context(|| format!("reading graph document {}", file.display()))?;
            codec::decode(&text)
                .with_context(|| format!("decoding graph document {}", file.display()))?
        }
        None => {
            if args.from.is_empty() {
                bail!("either --from <PATH>... or --load <FILE> is required");
            }
            let files = scan::find_units(&args.from);
            let units = scan::load_units(&files);
            if units.is_empty() {
                return Ok(false);
            }
            build_graph(&units)
        }
    };

    let closure = query(&graph, &args.seeds);
    let text = render_graph(&closure, args.format)?;
    write_output(&text, args.output.as_deref())?;
    Ok(true)
}

fn query(graph: &Graph, seeds: &[String]) -> Graph {
    let closure = dependent_closure(graph, seeds);
    info!(
        seeds = seeds.len(),
        nodes = closure.node_count(),
        edges = closure.edge_count(),
        "dependent closure computed"
    );
    closure
}
