//! Pipeline entry points for the two operating modes.
//!
//! - `run_ingest`: fetch -> classify -> store, looping until cancelled
//! - `run_reanalyze`: re-run classification over stored records, one pass

pub mod ingest;
pub mod reanalyze;

pub use ingest::{CycleStats, run_cycle, run_ingest};
pub use reanalyze::run_reanalyze;
