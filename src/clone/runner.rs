// src/clone/runner.rs

use crate::gitlab::redact_url;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// One `git clone` to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    /// Display name of the project, used in logs and the summary.
    pub project_name: String,
    /// URL passed to git. May carry an embedded credential; use
    /// `display_url` for anything that gets printed.
    pub source_url: String,
    /// Destination relative to `working_dir` (the project's namespaced path).
    pub destination: PathBuf,
    /// Branch passed to `-b`.
    pub branch: String,
    /// Directory git is run in.
    pub working_dir: PathBuf,
}

impl CloneRequest {
    /// The arguments passed to git, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use groupmirror::clone::CloneRequest;
    /// use std::path::PathBuf;
    ///
    /// let request = CloneRequest {
    ///     project_name: "svc-a".into(),
    ///     source_url: "https://h/team/svc-a.git".into(),
    ///     destination: PathBuf::from("team/svc-a"),
    ///     branch: "master".into(),
    ///     working_dir: PathBuf::from("/work"),
    /// };
    /// let args: Vec<_> = request.args().into_iter().map(|a| a.into_string().unwrap()).collect();
    /// assert_eq!(args, ["clone", "-b", "master", "https://h/team/svc-a.git", "team/svc-a"]);
    /// ```
    pub fn args(&self) -> Vec<OsString> {
        vec![
            OsString::from("clone"),
            OsString::from("-b"),
            OsString::from(&self.branch),
            OsString::from(&self.source_url),
            self.destination.clone().into_os_string(),
        ]
    }

    /// The source URL with any credential removed.
    pub fn display_url(&self) -> String {
        redact_url(&self.source_url)
    }
}

impl fmt::Display for CloneRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "git clone -b {} {} {}",
            self.branch,
            self.display_url(),
            self.destination.display()
        )
    }
}

/// Captured output of a git process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneOutput {
    pub stdout: String,
    pub stderr: String,
}

/// What happened to a single clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneOutcome {
    /// git exited with status 0.
    Cloned(CloneOutput),
    /// git ran and exited non-zero. `code` is `None` if it was killed by a signal.
    Failed {
        code: Option<i32>,
        output: CloneOutput,
    },
    /// git could not be started at all.
    LaunchFailed { reason: String },
}

impl CloneOutcome {
    /// Returns `true` for `Cloned`.
    pub fn is_success(&self) -> bool {
        matches!(self, CloneOutcome::Cloned(_))
    }

    /// A one-line reason for a failed outcome, `None` on success.
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            CloneOutcome::Cloned(_) => None,
            CloneOutcome::Failed { code, output } => {
                let status = match code {
                    Some(code) => format!("git exited with status {}", code),
                    None => "git was terminated by a signal".to_string(),
                };
                match last_line(&output.stderr) {
                    Some(line) => Some(format!("{}: {}", status, line)),
                    None => Some(status),
                }
            }
            CloneOutcome::LaunchFailed { reason } => Some(format!("could not run git: {}", reason)),
        }
    }
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).last()
}

/// Runs a single clone and reports what happened.
///
/// Implementations must not panic on failure; every problem is an outcome.
pub trait CloneRunner: Send + Sync {
    fn run(&self, request: &CloneRequest) -> CloneOutcome;
}

impl<R: CloneRunner + ?Sized> CloneRunner for &R {
    fn run(&self, request: &CloneRequest) -> CloneOutcome {
        (**self).run(request)
    }
}

/// Runs the git command-line client.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl CloneRunner for GitCli {
    fn run(&self, request: &CloneRequest) -> CloneOutcome {
        let result = Command::new(&self.program)
            .args(request.args())
            .current_dir(&request.working_dir)
            // Never block on a credential prompt.
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match result {
            Ok(output) => {
                let captured = CloneOutput {
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                };
                if output.status.success() {
                    CloneOutcome::Cloned(captured)
                } else {
                    CloneOutcome::Failed {
                        code: output.status.code(),
                        output: captured,
                    }
                }
            }
            Err(e) => CloneOutcome::LaunchFailed {
                reason: format!("{} ({})", e, self.program.display()),
            },
        }
    }
}
