//! Core error types.
//!
//! Construction-time failures (unreadable or malformed unit files, graph
//! document decode failures) surface as [`Error`] values and abort the
//! operation that hit them. "Not found" conditions during graph queries —
//! unresolved references, seeds matching nothing — are not errors; they
//! contribute nothing to the result instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use crate::graph::codec::DecodeError;

/// Errors surfaced by the depgraph engine.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read unit file {path}")]
    ReadUnit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse unit file {path}")]
    ParseUnit {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to resolve {path} to an absolute path")]
    Absolutize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
