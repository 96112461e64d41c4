//! Command implementations for nsbuild-cli

pub mod bump;
pub mod resolve;

pub use bump::{TagOptions, run_bump};
pub use resolve::run_resolve;
