#![forbid(unsafe_code)]

//! `dg` — build-unit dependency graph generator.

mod cmd;
mod output;

use std::env;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use output::OutputMode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "dg: build-unit dependency graph generator",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential logging.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Emit JSON output where the command supports it.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        OutputMode::from_flag(self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Build the dependency graph from unit files",
        after_help = "EXAMPLES:\n    # Serialize the whole tree's graph to a file\n    dg graph ./src -o deps.json\n\n    # Only locally published units, as Graphviz DOT\n    dg graph ./src --filter path-and-package --format dot\n\n    # One node per line\n    dg graph app.unit lib/ --format list"
    )]
    Graph(cmd::graph::GraphArgs),

    #[command(
        about = "Show everything that transitively depends on the given seeds",
        after_help = "EXAMPLES:\n    # Who depends on a published package, scanning the tree\n    dg dependents Acme.Core --from ./src\n\n    # Query a previously saved graph document\n    dg dependents /src/core/core.unit --load deps.json\n\n    # Keep the result as a new graph document\n    dg dependents Acme.Core --from ./src --format graph -o impacted.json"
    )]
    Dependents(cmd::dependents::DependentsArgs),

    #[command(
        about = "List discovered unit files",
        after_help = "EXAMPLES:\n    # All unit files under the current directory\n    dg list .\n\n    # Machine-readable\n    dg list . --json"
    )]
    List(cmd::list::ListArgs),
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("DEPGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "error"
        } else if verbose || env::var("DEBUG").is_ok() {
            "depgraph=debug,info"
        } else {
            "depgraph=info,warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if cli.verbose {
        info!("verbose mode enabled");
    }

    let result = match &cli.command {
        Commands::Graph(args) => cmd::graph::run_graph(args),
        Commands::Dependents(args) => cmd::dependents::run_dependents(args),
        Commands::List(args) => cmd::list::run_list(args, cli.output_mode()),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("error: no build units found under the given paths");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
