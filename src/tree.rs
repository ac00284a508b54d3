//! Builds the in-memory tree of a group and everything beneath it.
//!
//! The walk is depth-first and pre-order: for each group, its projects and its
//! sub-groups are listed first, then every sub-group is built completely, in
//! listing order, before the next one is started. A node is constructed only
//! after all of its children exist, so no partially populated node is ever
//! observable.

use crate::cancellation::CancellationToken;
use crate::core_types::{Group, GroupNode};
use crate::errors::{Error, FetchError, Result};
use crate::gitlab::GroupDirectory;
use std::collections::HashSet;
use std::fmt;

/// Which listing of a group failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// The group's own projects.
    Projects,
    /// The group's direct sub-groups.
    SubGroups,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Projects => write!(f, "projects"),
            Listing::SubGroups => write!(f, "sub-groups"),
        }
    }
}

/// A listing that could not be fetched while building the tree.
///
/// The affected collection is treated as empty so the rest of the tree can
/// still be built.
#[derive(Debug)]
pub struct FetchFailure {
    /// Id of the group whose listing failed.
    pub group_id: u64,
    /// Name of the group whose listing failed.
    pub group_name: String,
    /// Which listing failed.
    pub listing: Listing,
    /// Why it failed.
    pub error: FetchError,
}

/// The result of building a group tree.
#[derive(Debug)]
pub struct GroupTree {
    /// The target group with all of its descendants.
    pub root: GroupNode,
    /// Listings that failed and were treated as empty.
    pub failures: Vec<FetchFailure>,
    /// Sub-groups skipped because their id had already been visited.
    pub revisited: Vec<Group>,
    /// Sub-groups not descended into because they lie beyond the depth limit.
    pub depth_limited: Vec<Group>,
}

/// Builds the tree rooted at `root` by listing through `directory`.
///
/// `directory` is expected to apply the ignore set to child listings (see
/// `FilteredDirectory`). Group ids are tracked so that a remote returning the
/// same group twice, or a cycle, cannot cause unbounded recursion; groups deeper
/// than `max_depth` levels below `root` are recorded and left out.
///
/// # Errors
/// Returns `Error::Interrupted` if `token` is cancelled during the walk. Failed
/// listings are not errors; they are collected in `GroupTree::failures`.
///
/// # Examples
///
/// ```
/// use groupmirror::cancellation::CancellationToken;
/// use groupmirror::core_types::{Group, Project};
/// use groupmirror::testing::FakeDirectory;
/// use groupmirror::tree::build_tree;
///
/// let directory = FakeDirectory::new()
///     .with_projects(5, vec![Project::new(50, "api", "https://x/api.git", "backend/api")])
///     .with_sub_groups(5, vec![Group::new(6, "tools")])
///     .with_projects(6, vec![Project::new(60, "cli", "https://x/cli.git", "backend/tools/cli")]);
///
/// let tree = build_tree(&directory, Group::new(5, "backend"), 64, &CancellationToken::new()).unwrap();
/// assert_eq!(tree.root.group_count(), 2);
/// assert_eq!(tree.root.project_count(), 2);
/// assert!(tree.failures.is_empty());
/// ```
pub fn build_tree<D: GroupDirectory + ?Sized>(
    directory: &D,
    root: Group,
    max_depth: usize,
    token: &CancellationToken,
) -> Result<GroupTree> {
    let mut builder = TreeBuilder {
        directory,
        max_depth,
        token,
        visited: HashSet::new(),
        failures: Vec::new(),
        revisited: Vec::new(),
        depth_limited: Vec::new(),
    };
    builder.visited.insert(root.id);
    let root = builder.visit(root, 0)?;

    log::info!(
        "Discovered {} group(s) and {} project(s) under '{}'",
        root.group_count(),
        root.project_count(),
        root.group.name
    );

    let TreeBuilder {
        visited,
        failures,
        revisited,
        mut depth_limited,
        ..
    } = builder;
    // Groups that were also reached within the limit are part of the tree.
    depth_limited.retain(|g| !visited.contains(&g.id));

    Ok(GroupTree {
        root,
        failures,
        revisited,
        depth_limited,
    })
}

struct TreeBuilder<'a, D: ?Sized> {
    directory: &'a D,
    max_depth: usize,
    token: &'a CancellationToken,
    visited: HashSet<u64>,
    failures: Vec<FetchFailure>,
    revisited: Vec<Group>,
    depth_limited: Vec<Group>,
}

impl<D: GroupDirectory + ?Sized> TreeBuilder<'_, D> {
    fn visit(&mut self, group: Group, depth: usize) -> Result<GroupNode> {
        if self.token.is_cancelled() {
            return Err(Error::Interrupted);
        }
        log::debug!("Visiting group '{}' (id {}, depth {})", group.name, group.id, depth);

        let projects = match self.directory.list_projects(group.id) {
            Ok(projects) => projects,
            Err(error) => {
                self.record_failure(&group, Listing::Projects, error);
                Vec::new()
            }
        };
        let sub_groups = match self.directory.list_sub_groups(group.id) {
            Ok(groups) => groups,
            Err(error) => {
                self.record_failure(&group, Listing::SubGroups, error);
                Vec::new()
            }
        };
        log::info!(
            "Group '{}': {} project(s), {} sub-group(s)",
            group.name,
            projects.len(),
            sub_groups.len()
        );

        let mut children = Vec::with_capacity(sub_groups.len());
        for sub_group in sub_groups {
            // Depth is checked first so a group first seen too deep can still be
            // built where it also appears within the limit.
            if depth + 1 > self.max_depth {
                log::warn!(
                    "Group '{}' (id {}) is deeper than the limit of {} level(s); not descending",
                    sub_group.name,
                    sub_group.id,
                    self.max_depth
                );
                self.depth_limited.push(sub_group);
                continue;
            }
            if !self.visited.insert(sub_group.id) {
                log::warn!(
                    "Group '{}' (id {}) was already visited; skipping it under '{}'",
                    sub_group.name,
                    sub_group.id,
                    group.name
                );
                self.revisited.push(sub_group);
                continue;
            }
            children.push(self.visit(sub_group, depth + 1)?);
        }

        Ok(GroupNode::new(group, projects, children))
    }

    fn record_failure(&mut self, group: &Group, listing: Listing, error: FetchError) {
        log::warn!(
            "Could not list {} of group '{}' (id {}): {}",
            listing,
            group.name,
            group.id,
            error
        );
        self.failures.push(FetchFailure {
            group_id: group.id,
            group_name: group.name.clone(),
            listing,
            error,
        });
    }
}
