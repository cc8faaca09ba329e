//! depgraph-core — build-unit dependency graph engine.
//!
//! Given a set of build-unit descriptors, this crate resolves which
//! declared references denote the same logical unit (node identity is
//! multi-keyed and partial: package id, path, or both), builds the directed
//! depends-on graph, answers "who transitively depends on X" queries, and
//! round-trips graphs through a persisted text document.
//!
//! # Conventions
//!
//! - **Errors**: construction-time failures return [`Error`]; query-time
//!   misses (unknown seeds, unresolved references) are absorbed as empty
//!   contributions, not errors.
//! - **Logging**: `tracing` macros throughout; nothing here installs a
//!   subscriber.
//! - **Immutability**: a [`graph::Graph`] is a value. Filters and queries
//!   return new graphs; independent queries may run concurrently against
//!   one shared graph.

pub mod error;
pub mod fs;
pub mod graph;
pub mod manifest;
pub mod scan;
pub mod unit;

pub use error::Error;
pub use graph::{Graph, GraphFilter, Node, build_graph, dependent_closure};
pub use unit::{Reference, UnitInfo};
