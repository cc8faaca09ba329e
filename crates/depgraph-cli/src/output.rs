//! Shared output layer: text/JSON parity and output-file handling.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain text for humans and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Derive the output mode from the global `--json` flag.
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Render a value either as JSON or through the supplied text formatter.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text: impl Fn(&T) -> String,
) -> Result<()> {
    let out = match mode {
        OutputMode::Json => serde_json::to_string_pretty(value).context("serializing output")?,
        OutputMode::Text => text(value),
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", out.trim_end_matches('\n'))?;
    Ok(())
}

/// Write pre-rendered text to `output`, or to stdout when no file is given.
///
/// Writing to a file confirms the destination on stdout so scripted callers
/// see where the artifact landed.
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .with_context(|| format!("writing output to {}", path.display()))?;
            println!("output written to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
        }
    }
    Ok(())
}
