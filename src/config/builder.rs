// src/config/builder.rs

use super::{
    path_resolve::resolve_project_dir,
    validation::{parse_base_url, require_non_empty, validate_ranges},
    BranchPolicy, CloneConfig, Config, RemoteConfig,
};
use crate::cli::Cli;
use crate::constants::{DEFAULT_API_VERSION, DEFAULT_BRANCH, DEFAULT_MAX_DEPTH, DEFAULT_PER_PAGE};
use crate::errors::Result;
use crate::filtering::IgnoreSet;
use std::path::PathBuf;
use std::time::Duration;

/// A builder for creating a `Config` programmatically.
///
/// Every setter is optional except the GitLab URL, the token and the target
/// group; `build` fills in the documented defaults and validates the result.
///
/// # Examples
///
/// ```
/// use groupmirror::config::{BranchPolicy, ConfigBuilder};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ConfigBuilder::new()
///     .gitlab_url("https://gitlab.example.com")
///     .token("glpat-example")
///     .target_group("backend")
///     .ignores(vec!["legacy".to_string()])
///     .project_dir(".")
///     .build()?;
///
/// assert_eq!(config.target_group, "backend");
/// assert!(config.ignores.contains("legacy"));
/// assert_eq!(config.clone.branch, BranchPolicy::Fixed("master".to_string()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    gitlab_url: Option<String>,
    api_version: Option<String>,
    token: Option<String>,
    per_page: Option<u32>,
    timeout_secs: Option<u64>,
    target_group: Option<String>,
    ignores: Option<Vec<String>>,
    max_depth: Option<usize>,
    project_dir: Option<String>,
    branch: Option<String>,
    remote_default_branch: Option<bool>,
    embed_token: Option<bool>,
    jobs: Option<usize>,
    git_program: Option<String>,
    dry_run: Option<bool>,
}

impl ConfigBuilder {
    /// Creates a new `ConfigBuilder` with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder populated from parsed command-line arguments.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            gitlab_url: cli.gitlab_url,
            api_version: Some(cli.api_version),
            token: cli.token,
            per_page: Some(cli.per_page),
            timeout_secs: cli.timeout,
            target_group: cli.group,
            ignores: Some(cli.ignores),
            max_depth: Some(cli.max_depth),
            project_dir: Some(cli.project_dir),
            branch: Some(cli.branch),
            remote_default_branch: Some(cli.remote_default_branch),
            embed_token: Some(cli.embed_token),
            jobs: Some(cli.jobs),
            git_program: Some(cli.git_program),
            dry_run: Some(cli.dry_run),
        }
    }

    /// Sets the base URL of the GitLab instance.
    pub fn gitlab_url(mut self, url: impl Into<String>) -> Self {
        self.gitlab_url = Some(url.into());
        self
    }

    /// Sets the API path segment (default `/api/v4`).
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the private access token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the page size for list requests (default 100).
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Sets a per-request HTTP timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Sets the display name of the group to mirror.
    pub fn target_group(mut self, name: impl Into<String>) -> Self {
        self.target_group = Some(name.into());
        self
    }

    /// Sets the group and project names to skip.
    pub fn ignores(mut self, names: Vec<String>) -> Self {
        self.ignores = Some(names);
        self
    }

    /// Sets the maximum sub-group depth (default 64).
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Sets the directory the clones are created under (default `.`).
    pub fn project_dir(mut self, dir: impl Into<String>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    /// Sets the branch to clone (default `master`).
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Clones each project's default branch, using `branch` as the fallback.
    pub fn remote_default_branch(mut self, enabled: bool) -> Self {
        self.remote_default_branch = Some(enabled);
        self
    }

    /// Embeds the access token in HTTPS clone URLs.
    pub fn embed_token(mut self, enabled: bool) -> Self {
        self.embed_token = Some(enabled);
        self
    }

    /// Sets how many clones run at the same time (default 1).
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Sets the git executable (default `git`).
    pub fn git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = Some(program.into());
        self
    }

    /// Enables or disables dry-run mode.
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = Some(enabled);
        self
    }

    /// Validates the collected settings and builds the final `Config`.
    ///
    /// # Errors
    /// Returns `Error::Config` if a required option is missing, a value is out
    /// of range, the URL does not parse, or the project directory does not exist.
    pub fn build(self) -> Result<Config> {
        let base_url = parse_base_url(self.gitlab_url.as_deref())?;
        let token = require_non_empty(self.token, "--token")?;
        let target_group = require_non_empty(self.target_group, "--group")?;

        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        let jobs = self.jobs.unwrap_or(1);
        let max_depth = self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH);
        validate_ranges(per_page, jobs, max_depth)?;

        let project_dir = resolve_project_dir(self.project_dir.as_deref().unwrap_or("."))?;

        let branch_name = self
            .branch
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());
        let branch = if self.remote_default_branch.unwrap_or(false) {
            BranchPolicy::RemoteDefault {
                fallback: branch_name,
            }
        } else {
            BranchPolicy::Fixed(branch_name)
        };

        let config = Config {
            remote: RemoteConfig {
                base_url,
                api_version: self
                    .api_version
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                token,
                per_page,
                timeout: self.timeout_secs.map(Duration::from_secs),
            },
            target_group,
            ignores: IgnoreSet::from_names(self.ignores.unwrap_or_default()),
            project_dir,
            clone: CloneConfig {
                branch,
                git_program: PathBuf::from(self.git_program.unwrap_or_else(|| "git".to_string())),
                embed_token: self.embed_token.unwrap_or(false),
                jobs,
            },
            max_depth,
            dry_run: self.dry_run.unwrap_or(false),
        };
        log::debug!("Built configuration: {:?}", config);
        Ok(config)
    }
}
