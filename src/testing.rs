//! In-memory stand-ins for the GitLab API and the git executable.
//!
//! These are used by the crate's own tests and doc tests, and by downstream
//! code that wants to exercise the traversal without network access or git.

use crate::clone::{CloneOutcome, CloneOutput, CloneRequest, CloneRunner};
use crate::core_types::{Group, Project};
use crate::errors::{FetchError, FetchResult};
use crate::gitlab::GroupDirectory;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One listing requested from a `FakeDirectory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    /// `list_groups()`
    Groups,
    /// `list_sub_groups(id)`
    SubGroups(u64),
    /// `list_projects(id)`
    Projects(u64),
}

/// A `GroupDirectory` serving a fixed hierarchy and recording every call.
///
/// Groups with no configured children list as empty. Listings can be made to
/// fail with HTTP 500.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    groups: Vec<Group>,
    sub_groups: HashMap<u64, Vec<Group>>,
    projects: HashMap<u64, Vec<Project>>,
    failing_groups: bool,
    failing_sub_groups: HashSet<u64>,
    failing_projects: HashSet<u64>,
    calls: Mutex<Vec<Call>>,
}

impl FakeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the top-level group listing.
    pub fn with_groups(mut self, groups: Vec<Group>) -> Self {
        self.groups = groups;
        self
    }

    /// Sets the sub-groups listed for `group_id`.
    pub fn with_sub_groups(mut self, group_id: u64, groups: Vec<Group>) -> Self {
        self.sub_groups.insert(group_id, groups);
        self
    }

    /// Sets the projects listed for `group_id`.
    pub fn with_projects(mut self, group_id: u64, projects: Vec<Project>) -> Self {
        self.projects.insert(group_id, projects);
        self
    }

    /// Makes the top-level group listing fail.
    pub fn with_failing_groups(mut self) -> Self {
        self.failing_groups = true;
        self
    }

    /// Makes the sub-group listing of `group_id` fail.
    pub fn with_failing_sub_groups(mut self, group_id: u64) -> Self {
        self.failing_sub_groups.insert(group_id);
        self
    }

    /// Makes the project listing of `group_id` fail.
    pub fn with_failing_projects(mut self, group_id: u64) -> Self {
        self.failing_projects.insert(group_id);
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock_calls().clone()
    }

    /// How many times `call` was made.
    pub fn count(&self, call: Call) -> usize {
        self.lock_calls().iter().filter(|c| **c == call).count()
    }

    fn record(&self, call: Call) {
        self.lock_calls().push(call);
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<Call>> {
        // A panic while holding the lock only happens inside a failing test.
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn failure(path: String) -> FetchError {
        FetchError::Status {
            url: format!("fake://{}", path),
            status: 500,
        }
    }
}

impl GroupDirectory for FakeDirectory {
    fn list_groups(&self) -> FetchResult<Vec<Group>> {
        self.record(Call::Groups);
        if self.failing_groups {
            return Err(Self::failure("groups".to_string()));
        }
        Ok(self.groups.clone())
    }

    fn list_sub_groups(&self, group_id: u64) -> FetchResult<Vec<Group>> {
        self.record(Call::SubGroups(group_id));
        if self.failing_sub_groups.contains(&group_id) {
            return Err(Self::failure(format!("groups/{}/subgroups", group_id)));
        }
        Ok(self.sub_groups.get(&group_id).cloned().unwrap_or_default())
    }

    fn list_projects(&self, group_id: u64) -> FetchResult<Vec<Project>> {
        self.record(Call::Projects(group_id));
        if self.failing_projects.contains(&group_id) {
            return Err(Self::failure(format!("groups/{}/projects", group_id)));
        }
        Ok(self.projects.get(&group_id).cloned().unwrap_or_default())
    }
}

/// How a `RecordingRunner` answers for a given project.
#[derive(Debug, Clone)]
enum Scripted {
    Exit(i32),
    Launch(String),
}

/// A `CloneRunner` that records each request instead of running git.
///
/// Every clone succeeds unless scripted otherwise by project name.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    scripted: HashMap<String, Scripted>,
    requests: Mutex<Vec<CloneRequest>>,
}

impl RecordingRunner {
    /// Creates a runner where every clone succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the clone of `project_name` exit with `code`.
    pub fn failing_with_exit(mut self, project_name: &str, code: i32) -> Self {
        self.scripted
            .insert(project_name.to_string(), Scripted::Exit(code));
        self
    }

    /// Makes the clone of `project_name` fail to launch.
    pub fn failing_to_launch(mut self, project_name: &str, reason: &str) -> Self {
        self.scripted.insert(
            project_name.to_string(),
            Scripted::Launch(reason.to_string()),
        );
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<CloneRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Project names of every request received so far, in order.
    pub fn project_names(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| r.project_name)
            .collect()
    }
}

impl CloneRunner for RecordingRunner {
    fn run(&self, request: &CloneRequest) -> CloneOutcome {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request.clone());

        match self.scripted.get(&request.project_name) {
            None => CloneOutcome::Cloned(CloneOutput::default()),
            Some(Scripted::Exit(code)) => CloneOutcome::Failed {
                code: Some(*code),
                output: CloneOutput {
                    stdout: String::new(),
                    stderr: format!("fatal: could not clone {}", request.project_name),
                },
            },
            Some(Scripted::Launch(reason)) => CloneOutcome::LaunchFailed {
                reason: reason.clone(),
            },
        }
    }
}
