// src/cli.rs

use clap::Parser;

/// Mirror a whole GitLab group hierarchy onto local disk.
///
/// groupmirror finds the named group, walks all of its sub-groups recursively,
/// and runs `git clone` for every project it finds, laying the clones out by
/// their full namespace path under the project directory. Names listed with
/// --ignore are skipped, whether they belong to groups or projects.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // --- GitLab Connection ---
    /// Base URL of the GitLab instance (e.g., https://gitlab.example.com).
    #[arg(long, env = "GITLAB_URL", value_name = "URL")]
    pub gitlab_url: Option<String>,

    /// API path segment appended to the base URL.
    #[arg(long, env = "GITLAB_API_VERSION", value_name = "PATH", default_value = "/api/v4")]
    pub api_version: String,

    /// Private access token used for API requests.
    #[arg(long, env = "GITLAB_TOKEN", value_name = "TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Number of entries requested per page (1-100).
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub per_page: u32,

    /// Timeout in seconds for each API request. Waits indefinitely if not set.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    // --- Selection ---
    /// Display name of the group to mirror.
    #[arg(short = 'g', long, env = "GROUPMIRROR_GROUP", value_name = "NAME")]
    pub group: Option<String>,

    /// Group or project names to skip (exact match, repeatable or comma separated).
    #[arg(
        short = 'i',
        long = "ignore",
        env = "GROUPMIRROR_IGNORE",
        value_name = "NAME",
        num_args = 1..,
        value_delimiter = ','
    )]
    pub ignores: Vec<String>,

    /// Do not descend more than this many levels of sub-groups.
    #[arg(long, value_name = "DEPTH", default_value_t = 64)]
    pub max_depth: usize,

    // --- Cloning ---
    /// Existing directory the clones are created under.
    #[arg(short = 'd', long, env = "GROUPMIRROR_PROJECT_DIR", value_name = "PATH", default_value = ".")]
    pub project_dir: String,

    /// Branch to clone for every project.
    #[arg(short = 'b', long, value_name = "BRANCH", default_value = "master")]
    pub branch: String,

    /// Clone each project's own default branch, using --branch only when a project reports none.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub remote_default_branch: bool,

    /// Embed the access token in HTTPS clone URLs so git does not prompt for credentials.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub embed_token: bool,

    /// Number of clones to run at the same time.
    #[arg(short = 'j', long, value_name = "N", default_value_t = 1)]
    pub jobs: usize,

    /// The git executable to run.
    #[arg(long = "git", env = "GROUPMIRROR_GIT", value_name = "PROGRAM", default_value = "git")]
    pub git_program: String,

    // --- Execution Control ---
    /// Perform a dry run. List the clones that would run but do not run them.
    #[arg(short = 'D', long, action = clap::ArgAction::SetTrue)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["groupmirror"]);
        assert_eq!(cli.api_version, "/api/v4");
        assert_eq!(cli.per_page, 100);
        assert_eq!(cli.branch, "master");
        assert_eq!(cli.jobs, 1);
        assert_eq!(cli.project_dir, ".");
        assert!(!cli.dry_run);
        assert!(!cli.remote_default_branch);
    }

    #[test]
    fn test_ignores_accept_commas_and_repeats() {
        let cli = Cli::parse_from([
            "groupmirror",
            "-i",
            "legacy,sandbox",
            "--ignore",
            "archive",
        ]);
        assert_eq!(cli.ignores, ["legacy", "sandbox", "archive"]);
    }

    #[test]
    fn test_jobs_must_be_a_number() {
        let result = Cli::try_parse_from(["groupmirror", "-j", "many"]);
        assert!(result.is_err());
    }
}
