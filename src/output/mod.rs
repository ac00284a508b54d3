// src/output/mod.rs

//! Writes the human-readable report of a run: the dry-run listing and the
//! end-of-run summary.

mod dry_run;
mod summary;

pub use dry_run::write_dry_run;
pub use summary::write_summary;
