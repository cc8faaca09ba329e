//! Command handlers for the `dg` binary.

pub mod dependents;
pub mod graph;
pub mod list;
