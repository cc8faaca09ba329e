//! `dg list` — list discovered unit files.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use depgraph_core::scan;

use crate::output::{OutputMode, render};

/// Arguments for `dg list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Unit files or directories to scan.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Run `dg list`. Returns `false` when nothing was found.
pub fn run_list(args: &ListArgs, mode: OutputMode) -> Result<bool> {
    let files = scan::find_units(&args.paths);
    render(mode, &files, |files| {
        files
            .iter()
            .map(|f| f.display().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    Ok(!files.is_empty())
}
