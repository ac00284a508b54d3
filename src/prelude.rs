//! The `groupmirror` prelude for convenient library usage.
//!
//! This module re-exports the most commonly used types, traits, and functions
//! from the `groupmirror` library.
//!
//! # Example
//!
//! ```no_run
//! use groupmirror::prelude::*;
//! # fn main() -> Result<()> {
//!
//! let config = ConfigBuilder::new()
//!     .gitlab_url("https://gitlab.example.com")
//!     .token("glpat-example")
//!     .target_group("backend")
//!     .build()?;
//! let token = CancellationToken::new();
//! let report = execute(&config, &token, None)?;
//! println!("{} project(s) cloned", report.cloned_count());
//!
//! # Ok(())
//! # }
//! ```

pub use crate::cancellation::CancellationToken;
pub use crate::clone::{
    dispatch, plan_clones, CloneOutcome, CloneRequest, CloneResult, CloneRunner, DispatchOptions,
    GitCli,
};
pub use crate::config::{BranchPolicy, Config, ConfigBuilder};
pub use crate::core_types::{Group, GroupNode, Project};
pub use crate::errors::{Error, FetchError, Result};
pub use crate::filtering::{filter_ignored, IgnoreSet, Named};
pub use crate::gitlab::{FilteredDirectory, GitLabClient, GroupDirectory};
pub use crate::output::{write_dry_run, write_summary};
pub use crate::tree::{build_tree, GroupTree};
pub use crate::{execute, locate_group, run, CloneActivity, MirrorReport};
