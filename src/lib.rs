//! `groupmirror` is a library and command-line tool for mirroring a GitLab group
//! hierarchy onto the local filesystem.
//!
//! Given a target group name, it finds the group among those visible to an
//! access token, walks every sub-group beneath it, and runs
//! `git clone -b <branch> <url> <path_with_namespace>` once per project inside a
//! root directory, so the local tree reproduces the remote namespace layout.
//! Group and project names in an ignore set are skipped, together with
//! everything beneath an ignored group.
//!
//! As a library, it provides a three-stage pipeline:
//! 1.  **Discover**: list groups through a `GroupDirectory` and build the
//!     immutable tree of the target group (`tree::build_tree`).
//! 2.  **Plan**: turn the tree into an ordered list of clones (`clone::plan_clones`).
//! 3.  **Clone**: run each clone through a `CloneRunner` (`clone::dispatch`),
//!     isolating failures per project.
//!
//! # Example: Library Usage
//!
//! The following example drives the whole pipeline against in-memory stand-ins
//! for GitLab and git.
//!
//! ```
//! use groupmirror::cancellation::CancellationToken;
//! use groupmirror::config::Config;
//! use groupmirror::core_types::{Group, Project};
//! use groupmirror::filtering::IgnoreSet;
//! use groupmirror::testing::{FakeDirectory, RecordingRunner};
//! use groupmirror::run;
//!
//! let directory = FakeDirectory::new()
//!     .with_groups(vec![Group::new(5, "backend"), Group::new(9, "frontend")])
//!     .with_projects(5, vec![
//!         Project::new(50, "api", "https://h/backend/api.git", "backend/api"),
//!         Project::new(51, "legacy", "https://h/backend/legacy.git", "backend/legacy"),
//!     ])
//!     .with_sub_groups(5, vec![Group::new(6, "mobile")])
//!     .with_projects(6, vec![Project::new(60, "ios", "https://h/backend/mobile/ios.git", "backend/mobile/ios")]);
//!
//! let mut config = Config::new_for_test();
//! config.target_group = "backend".to_string();
//! config.ignores = IgnoreSet::from_names(["legacy"]);
//!
//! let runner = RecordingRunner::new();
//! let report = run(&config, &directory, &runner, &CancellationToken::new(), None).unwrap();
//!
//! assert_eq!(runner.project_names(), ["api", "ios"]);
//! assert_eq!(report.cloned_count(), 2);
//! assert!(report.failed_clones().is_empty());
//! ```

pub mod cancellation;
pub mod cli;
pub mod clone;
pub mod config;
pub mod constants;
pub mod core_types;
pub mod errors;
pub mod filtering;
pub mod gitlab;
pub mod output;
pub mod prelude;
pub mod progress;
pub mod signal;
#[doc(hidden)]
pub mod testing;
pub mod tree;

// Re-export key public types for easier use as a library
pub use config::{Config, ConfigBuilder};
pub use core_types::{Group, GroupNode, Project};

use crate::cancellation::CancellationToken;
use crate::clone::{dispatch, plan_clones, CloneRequest, CloneResult, CloneRunner, DispatchOptions, GitCli};
use crate::errors::{Error, Result};
use crate::gitlab::{FilteredDirectory, GitLabClient, GroupDirectory};
use crate::progress::ProgressReporter;
use crate::tree::{build_tree, GroupTree};
use std::sync::Arc;

/// What the clone stage did.
#[derive(Debug)]
pub enum CloneActivity {
    /// Dry run: the clones that would have run, in plan order.
    Planned(Vec<CloneRequest>),
    /// The clones that ran, in plan order, with their outcomes.
    Ran(Vec<CloneResult>),
}

/// Everything a completed run found and did.
#[derive(Debug)]
pub struct MirrorReport {
    /// The tree of the target group, with any listing problems.
    pub tree: GroupTree,
    /// The clone stage.
    pub clones: CloneActivity,
}

impl MirrorReport {
    /// Number of clones that succeeded. Always `0` for a dry run.
    pub fn cloned_count(&self) -> usize {
        match &self.clones {
            CloneActivity::Planned(_) => 0,
            CloneActivity::Ran(results) => results.iter().filter(|r| r.outcome.is_success()).count(),
        }
    }

    /// The clones that did not succeed, in plan order.
    pub fn failed_clones(&self) -> Vec<&CloneResult> {
        match &self.clones {
            CloneActivity::Planned(_) => Vec::new(),
            CloneActivity::Ran(results) => results.iter().filter(|r| !r.outcome.is_success()).collect(),
        }
    }

    /// Returns `true` if any clone or listing failed.
    pub fn has_failures(&self) -> bool {
        !self.failed_clones().is_empty() || !self.tree.failures.is_empty()
    }
}

/// Finds the group whose display name equals `name` exactly.
///
/// If several visible groups share the name, the first one listed wins.
///
/// # Examples
///
/// ```
/// use groupmirror::{locate_group, Group};
///
/// let groups = vec![Group::new(1, "frontend"), Group::new(5, "backend"), Group::new(8, "backend")];
/// assert_eq!(locate_group(&groups, "backend").map(|g| g.id), Some(5));
/// assert!(locate_group(&groups, "Backend").is_none());
/// ```
pub fn locate_group<'a>(groups: &'a [Group], name: &str) -> Option<&'a Group> {
    groups.iter().find(|g| g.name == name)
}

/// Lists the visible groups and picks the configured target.
///
/// # Errors
/// `Error::GroupListing` if the listing fails, `Error::NoGroups` if it is
/// empty, `Error::GroupNotFound` if no group has the target name.
pub fn find_target_group<D: GroupDirectory + ?Sized>(directory: &D, name: &str) -> Result<Group> {
    let groups = directory.list_groups().map_err(Error::GroupListing)?;
    log::info!("Found {} visible group(s)", groups.len());
    if groups.is_empty() {
        return Err(Error::NoGroups);
    }
    match locate_group(&groups, name) {
        Some(group) => {
            log::info!("Target group '{}' has id {}", group.name, group.id);
            Ok(group.clone())
        }
        None => Err(Error::GroupNotFound {
            name: name.to_string(),
        }),
    }
}

/// Runs the complete pipeline against the given directory and runner.
///
/// Locates the target group, builds its tree with the ignore set applied to
/// every child listing, plans one clone per project and, unless
/// `config.dry_run` is set, runs them.
///
/// # Errors
/// Returns the errors of `find_target_group`, and `Error::Interrupted` if
/// `token` is cancelled. Failed listings below the target group and failed
/// clones are reported in the returned `MirrorReport`, not as errors.
pub fn run<D, R>(
    config: &Config,
    directory: &D,
    runner: &R,
    token: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<MirrorReport>
where
    D: GroupDirectory + ?Sized,
    R: CloneRunner + ?Sized,
{
    let target = find_target_group(directory, &config.target_group)?;

    let filtered = FilteredDirectory::new(directory, config.ignores.clone());
    let tree = build_tree(&filtered, target, config.max_depth, token)?;

    let credential = config
        .clone
        .embed_token
        .then_some(config.remote.token.as_str());
    let requests = plan_clones(&tree.root, &config.project_dir, &config.clone.branch, credential);

    let clones = if config.dry_run {
        log::info!("Dry run: {} clone(s) planned, none run", requests.len());
        CloneActivity::Planned(requests)
    } else {
        let options = DispatchOptions {
            jobs: config.clone.jobs,
        };
        CloneActivity::Ran(dispatch(requests, runner, options, token, progress)?)
    };

    Ok(MirrorReport { tree, clones })
}

/// Runs the pipeline against the configured GitLab instance with the git CLI.
///
/// This mirrors the command-line execution; use `run` to supply a different
/// `GroupDirectory` or `CloneRunner`.
///
/// # Errors
/// Returns `Error::Other` if the HTTP client cannot be built, plus every error
/// of `run`.
pub fn execute(
    config: &Config,
    token: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<MirrorReport> {
    let client = GitLabClient::new(&config.remote)?;
    log::debug!("Using GitLab API at {}", client.api_base());
    let runner = GitCli::new(&config.clone.git_program);
    run(config, &client, &runner, token, progress)
}
