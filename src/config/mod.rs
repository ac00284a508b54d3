//! Defines the core `Config` struct and related types for application configuration.
//!
//! This module consolidates all the settings parsed and validated from the CLI
//! (or set programmatically through `ConfigBuilder`), making them available to
//! the rest of the application in a structured and type-safe manner.

use crate::constants::{DEFAULT_API_VERSION, DEFAULT_BRANCH, DEFAULT_MAX_DEPTH, DEFAULT_PER_PAGE};
use crate::core_types::Project;
use crate::filtering::IgnoreSet;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub use builder::ConfigBuilder;
mod builder;
pub mod path_resolve;
mod validation;

/// Connection settings for the GitLab API.
#[derive(Clone)]
pub struct RemoteConfig {
    /// Base URL of the GitLab instance, e.g. `https://gitlab.example.com`.
    pub base_url: Url,
    /// API path segment appended to the base URL, e.g. `/api/v4`.
    pub api_version: String,
    /// Private access token sent with every request.
    pub token: String,
    /// Page size for list requests.
    pub per_page: u32,
    /// Optional timeout for each HTTP request. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

// The token must never end up in logs.
impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("token", &"<redacted>")
            .field("per_page", &self.per_page)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Which branch to clone for each project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchPolicy {
    /// Clone the same named branch for every project.
    Fixed(String),
    /// Clone each project's own default branch as reported by GitLab, using
    /// `fallback` for projects that report none.
    RemoteDefault {
        /// Branch used when a project has no default branch.
        fallback: String,
    },
}

impl BranchPolicy {
    /// Resolves the branch to clone for `project`.
    ///
    /// # Examples
    ///
    /// ```
    /// use groupmirror::config::BranchPolicy;
    /// use groupmirror::core_types::Project;
    ///
    /// let mut project = Project::new(1, "svc", "https://x/svc.git", "team/svc");
    /// project.default_branch = Some("main".to_string());
    ///
    /// assert_eq!(BranchPolicy::Fixed("master".into()).branch_for(&project), "master");
    /// let remote = BranchPolicy::RemoteDefault { fallback: "master".into() };
    /// assert_eq!(remote.branch_for(&project), "main");
    /// ```
    pub fn branch_for<'a>(&'a self, project: &'a Project) -> &'a str {
        match self {
            BranchPolicy::Fixed(branch) => branch.as_str(),
            BranchPolicy::RemoteDefault { fallback } => project
                .default_branch
                .as_deref()
                .filter(|b| !b.is_empty())
                .unwrap_or(fallback.as_str()),
        }
    }
}

impl Default for BranchPolicy {
    fn default() -> Self {
        BranchPolicy::Fixed(DEFAULT_BRANCH.to_string())
    }
}

/// Settings for the clone step.
#[derive(Debug, Clone)]
pub struct CloneConfig {
    /// Branch selection for each project.
    pub branch: BranchPolicy,
    /// The git executable to run.
    pub git_program: PathBuf,
    /// Whether to embed the access token in HTTPS clone URLs.
    pub embed_token: bool,
    /// Number of clones run at the same time. `1` is strictly sequential.
    pub jobs: usize,
}

/// Represents the fully parsed and validated configuration for a run.
///
/// This struct holds all the settings parsed and validated from the CLI,
/// ready to be used by the core logic (tree building, clone dispatch, output).
#[derive(Debug, Clone)]
pub struct Config {
    /// How to reach the GitLab API.
    pub remote: RemoteConfig,
    /// Display name of the group whose hierarchy is mirrored.
    pub target_group: String,
    /// Group and project names excluded from traversal and cloning.
    pub ignores: IgnoreSet,
    /// Existing directory the clones are created under (canonicalized).
    pub project_dir: PathBuf,
    /// Settings for the clone step.
    pub clone: CloneConfig,
    /// Maximum group nesting the tree builder descends into.
    pub max_depth: usize,
    /// If `true`, list the clones that would run without running them.
    pub dry_run: bool,
}

impl Config {
    /// Creates a default `Config` for testing purposes.
    ///
    /// This function is hidden from public documentation and is intended for
    /// use in tests and doc tests only.
    #[doc(hidden)]
    pub fn new_for_test() -> Self {
        Self {
            remote: RemoteConfig {
                // Static, known-valid URL.
                base_url: Url::parse("https://gitlab.example.com").expect("valid test URL"),
                api_version: DEFAULT_API_VERSION.to_string(),
                token: "test-token".to_string(),
                per_page: DEFAULT_PER_PAGE,
                timeout: None,
            },
            target_group: "backend".to_string(),
            ignores: IgnoreSet::new(),
            project_dir: PathBuf::from("."),
            clone: CloneConfig {
                branch: BranchPolicy::default(),
                git_program: PathBuf::from("git"),
                embed_token: false,
                jobs: 1,
            },
            max_depth: DEFAULT_MAX_DEPTH,
            dry_run: false,
        }
    }
}
