#![forbid(unsafe_code)]

//! Command-line front end for `dryrun-core`.
//!
//! `dryrun list` prints the catalog, `dryrun run` records a whole dry run,
//! `dryrun show` prints one step, and `dryrun verify` rebuilds traces and
//! checks their invariants, determinism and codec round trip.

pub mod cli;
pub mod error;
pub mod logging;
pub mod render;

pub use cli::run_from_env;
pub use error::{CliError, Result};
