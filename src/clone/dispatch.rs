// src/clone/dispatch.rs

use super::runner::{CloneOutcome, CloneRequest, CloneRunner};
use crate::cancellation::CancellationToken;
use crate::config::BranchPolicy;
use crate::core_types::GroupNode;
use crate::errors::{Error, Result};
use crate::gitlab::embed_token;
use crate::progress::ProgressReporter;
use anyhow::anyhow;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A request together with what happened when it ran.
#[derive(Debug, Clone)]
pub struct CloneResult {
    pub request: CloneRequest,
    pub outcome: CloneOutcome,
}

/// How `dispatch` runs the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Number of clones run at the same time. `1` runs strictly in plan order.
    pub jobs: usize,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self { jobs: 1 }
    }
}

/// Turns a group tree into the ordered list of clones to run.
///
/// Projects of a group come before those of its sub-groups, and each sub-group
/// is planned completely before the next. Every request runs in `working_dir`;
/// nesting comes from each project's namespaced path. With `credential`, the
/// token is embedded in HTTP(S) clone URLs.
///
/// # Examples
///
/// ```
/// use groupmirror::clone::plan_clones;
/// use groupmirror::config::BranchPolicy;
/// use groupmirror::core_types::{Group, GroupNode, Project};
/// use std::path::Path;
///
/// let tree = GroupNode::new(
///     Group::new(1, "team"),
///     vec![Project::new(10, "svc-a", "https://h/team/svc-a.git", "team/svc-a")],
///     vec![GroupNode::new(
///         Group::new(2, "tools"),
///         vec![Project::new(20, "cli", "https://h/team/tools/cli.git", "team/tools/cli")],
///         vec![],
///     )],
/// );
///
/// let plan = plan_clones(&tree, Path::new("/work"), &BranchPolicy::default(), None);
/// let destinations: Vec<_> = plan.iter().map(|r| r.destination.to_str().unwrap()).collect();
/// assert_eq!(destinations, ["team/svc-a", "team/tools/cli"]);
/// assert!(plan.iter().all(|r| r.working_dir == Path::new("/work")));
/// ```
pub fn plan_clones(
    root: &GroupNode,
    working_dir: &Path,
    branch: &BranchPolicy,
    credential: Option<&str>,
) -> Vec<CloneRequest> {
    let mut plan = Vec::with_capacity(root.project_count());
    collect(root, working_dir, branch, credential, &mut plan);
    plan
}

fn collect(
    node: &GroupNode,
    working_dir: &Path,
    branch: &BranchPolicy,
    credential: Option<&str>,
    plan: &mut Vec<CloneRequest>,
) {
    for project in &node.projects {
        let source_url = match credential {
            Some(token) => embed_token(&project.http_url_to_repo, token).unwrap_or_else(|| {
                log::warn!(
                    "Cannot embed a token in the clone URL of '{}'; using it unchanged",
                    project.name
                );
                project.http_url_to_repo.clone()
            }),
            None => project.http_url_to_repo.clone(),
        };
        plan.push(CloneRequest {
            project_name: project.name.clone(),
            source_url,
            destination: PathBuf::from(&project.path_with_namespace),
            branch: branch.branch_for(project).to_string(),
            working_dir: working_dir.to_path_buf(),
        });
    }
    for child in &node.sub_groups {
        collect(child, working_dir, branch, credential, plan);
    }
}

/// Runs every request through `runner` and returns the results in plan order.
///
/// A failed clone is logged and recorded; it never stops the remaining clones.
///
/// # Errors
/// Returns `Error::Interrupted` if `token` is cancelled before the plan is
/// finished, or an error if the worker pool cannot be created.
pub fn dispatch<R: CloneRunner + ?Sized>(
    requests: Vec<CloneRequest>,
    runner: &R,
    options: DispatchOptions,
    token: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<Vec<CloneResult>> {
    let total = requests.len();
    log::info!("Cloning {} project(s) with {} job(s)", total, options.jobs);
    if let Some(p) = &progress {
        p.set_length(total as u64);
        p.set_position(0);
    }

    let results = if options.jobs <= 1 {
        run_sequential(requests, runner, token, progress.as_deref())?
    } else {
        run_parallel(requests, runner, options.jobs, token, progress.as_deref())?
    };

    let failed = results.iter().filter(|r| !r.outcome.is_success()).count();
    if let Some(p) = &progress {
        p.finish_with_message(format!("{} cloned, {} failed", total - failed, failed));
    }
    Ok(results)
}

fn run_sequential<R: CloneRunner + ?Sized>(
    requests: Vec<CloneRequest>,
    runner: &R,
    token: &CancellationToken,
    progress: Option<&dyn ProgressReporter>,
) -> Result<Vec<CloneResult>> {
    let mut results = Vec::with_capacity(requests.len());
    for (i, request) in requests.into_iter().enumerate() {
        if token.is_cancelled() {
            return Err(Error::Interrupted);
        }
        if let Some(p) = progress {
            p.set_message(request.project_name.clone());
        }
        let outcome = run_one(runner, &request);
        if let Some(p) = progress {
            p.set_position(i as u64 + 1);
        }
        results.push(CloneResult { request, outcome });
    }
    Ok(results)
}

fn run_parallel<R: CloneRunner + ?Sized>(
    requests: Vec<CloneRequest>,
    runner: &R,
    jobs: usize,
    token: &CancellationToken,
    progress: Option<&dyn ProgressReporter>,
) -> Result<Vec<CloneResult>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| anyhow!("Failed to start the clone worker pool: {}", e))?;
    let done = AtomicU64::new(0);

    let results: Vec<Option<CloneResult>> = pool.install(|| {
        requests
            .into_par_iter()
            .map(|request| {
                if token.is_cancelled() {
                    return None;
                }
                if let Some(p) = progress {
                    p.set_message(request.project_name.clone());
                }
                let outcome = run_one(runner, &request);
                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(p) = progress {
                    p.set_position(finished);
                }
                Some(CloneResult { request, outcome })
            })
            .collect()
    });

    if token.is_cancelled() {
        return Err(Error::Interrupted);
    }
    Ok(results.into_iter().flatten().collect())
}

fn run_one<R: CloneRunner + ?Sized>(runner: &R, request: &CloneRequest) -> CloneOutcome {
    log::info!("Running: {}", request);
    let outcome = runner.run(request);
    match &outcome {
        CloneOutcome::Cloned(output) => {
            log::info!(
                "Cloned '{}' into {}",
                request.project_name,
                request.destination.display()
            );
            log_stream(log::Level::Debug, &request.project_name, "stdout", &output.stdout);
            log_stream(log::Level::Debug, &request.project_name, "stderr", &output.stderr);
        }
        CloneOutcome::Failed { output, .. } => {
            log::error!(
                "Clone of '{}' failed: {}",
                request.project_name,
                outcome.failure_reason().unwrap_or_default()
            );
            log_stream(log::Level::Warn, &request.project_name, "stdout", &output.stdout);
            log_stream(log::Level::Warn, &request.project_name, "stderr", &output.stderr);
        }
        CloneOutcome::LaunchFailed { reason } => {
            log::error!(
                "Clone of '{}' could not be started: {}",
                request.project_name,
                reason
            );
        }
    }
    outcome
}

fn log_stream(level: log::Level, project: &str, stream: &str, text: &str) {
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        log::log!(level, "[{} {}] {}", project, stream, line);
    }
}
