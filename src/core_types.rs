//! Defines the core data structures shared by the traversal pipeline.
//!
//! `Group` and `Project` are the records returned by the GitLab API. A
//! `GroupNode` is a group after the tree builder has visited it: it owns the
//! group's projects and the nodes of its sub-groups, and is only ever built in
//! one step once all of its children exist.

use serde::Deserialize;

/// A GitLab group as returned by the group listing endpoints.
///
/// # Examples
///
/// ```
/// use groupmirror::core_types::Group;
///
/// let json = r#"{"id": 5, "name": "backend", "path": "backend"}"#;
/// let group: Group = serde_json::from_str(json).unwrap();
/// assert_eq!(group.id, 5);
/// assert_eq!(group.name, "backend");
/// assert!(group.description.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Group {
    /// Unique remote identifier.
    pub id: u64,
    /// Display name, matched against the target group and the ignore set.
    pub name: String,
    /// Remote path segment (slug).
    #[serde(default)]
    pub path: String,
    /// Full path including parent groups (e.g., "company/backend").
    #[serde(default)]
    pub full_path: Option<String>,
    /// Group description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Group {
    /// Creates a group record with only the fields the traversal needs.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            path: name.clone(),
            name,
            full_path: None,
            description: None,
        }
    }
}

/// A GitLab project owned directly by a group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    /// Unique remote identifier.
    pub id: u64,
    /// Display name, matched against the ignore set.
    pub name: String,
    /// HTTP(S) clone URL.
    pub http_url_to_repo: String,
    /// Full path including namespace (e.g., "team/svc-a"); the clone lands here
    /// relative to the project directory.
    pub path_with_namespace: String,
    /// The remote's default branch, if the project has a repository.
    #[serde(default)]
    pub default_branch: Option<String>,
}

impl Project {
    /// Creates a project record with the fields the clone step uses.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        http_url_to_repo: impl Into<String>,
        path_with_namespace: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            http_url_to_repo: http_url_to_repo.into(),
            path_with_namespace: path_with_namespace.into(),
            default_branch: None,
        }
    }
}

/// A visited group together with everything found beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    /// The group record this node was built from.
    pub group: Group,
    /// Projects directly owned by the group, in listing order.
    pub projects: Vec<Project>,
    /// Nodes for the group's direct sub-groups, in listing order.
    pub sub_groups: Vec<GroupNode>,
}

impl GroupNode {
    /// Creates a node from a group and its already-built children.
    pub fn new(group: Group, projects: Vec<Project>, sub_groups: Vec<GroupNode>) -> Self {
        Self {
            group,
            projects,
            sub_groups,
        }
    }

    /// Creates a node with no projects and no sub-groups.
    pub fn leaf(group: Group) -> Self {
        Self::new(group, Vec::new(), Vec::new())
    }

    /// Counts the groups in this subtree, including this one.
    pub fn group_count(&self) -> usize {
        1 + self
            .sub_groups
            .iter()
            .map(GroupNode::group_count)
            .sum::<usize>()
    }

    /// Counts the projects in this subtree.
    pub fn project_count(&self) -> usize {
        self.projects.len()
            + self
                .sub_groups
                .iter()
                .map(GroupNode::project_count)
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_deserializes_from_api_payload() {
        let json = r#"{
            "id": 42,
            "name": "svc-a",
            "path": "svc-a",
            "http_url_to_repo": "https://x/svc-a.git",
            "ssh_url_to_repo": "git@x:team/svc-a.git",
            "path_with_namespace": "team/svc-a",
            "default_branch": "main",
            "archived": false
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, 42);
        assert_eq!(project.http_url_to_repo, "https://x/svc-a.git");
        assert_eq!(project.path_with_namespace, "team/svc-a");
        assert_eq!(project.default_branch.as_deref(), Some("main"));
    }

    #[test]
    fn test_project_without_default_branch() {
        // Projects with an empty repository report `null`.
        let json = r#"{"id": 1, "name": "empty", "http_url_to_repo": "u",
                       "path_with_namespace": "g/empty", "default_branch": null}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.default_branch.is_none());
    }

    #[test]
    fn test_counts_cover_whole_subtree() {
        let leaf = GroupNode::new(
            Group::new(3, "c"),
            vec![Project::new(30, "p30", "u", "a/b/c/p30")],
            Vec::new(),
        );
        let mid = GroupNode::new(
            Group::new(2, "b"),
            vec![
                Project::new(20, "p20", "u", "a/b/p20"),
                Project::new(21, "p21", "u", "a/b/p21"),
            ],
            vec![leaf],
        );
        let root = GroupNode::new(Group::new(1, "a"), Vec::new(), vec![mid, GroupNode::leaf(Group::new(4, "d"))]);

        assert_eq!(root.group_count(), 4);
        assert_eq!(root.project_count(), 3);
    }
}
