// src/gitlab/mod.rs
//! Lists groups, sub-groups and projects from a GitLab instance.
//!
//! This module provides:
//! - The `GroupDirectory` trait, the seam between the traversal and the remote API.
//! - `GitLabClient`, a blocking `reqwest` implementation of it.
//! - `FilteredDirectory`, which applies the ignore set to child listings.
//! - URL helpers for building endpoints and handling clone URL credentials.

mod client;
mod endpoint;
mod filtered;

use crate::core_types::{Group, Project};
use crate::errors::FetchResult;

pub use client::GitLabClient;
pub use endpoint::{api_base, embed_token, redact_url};
pub use filtered::FilteredDirectory;

/// Read access to a remote group hierarchy.
///
/// Every listing returns either the complete list or the reason it could not
/// be fetched. An empty `Ok` means the group genuinely has no such children.
pub trait GroupDirectory {
    /// Lists all groups visible to the configured credential.
    fn list_groups(&self) -> FetchResult<Vec<Group>>;

    /// Lists the immediate sub-groups of `group_id`.
    fn list_sub_groups(&self, group_id: u64) -> FetchResult<Vec<Group>>;

    /// Lists the projects owned directly by `group_id`.
    fn list_projects(&self, group_id: u64) -> FetchResult<Vec<Project>>;
}

impl<D: GroupDirectory + ?Sized> GroupDirectory for &D {
    fn list_groups(&self) -> FetchResult<Vec<Group>> {
        (**self).list_groups()
    }

    fn list_sub_groups(&self, group_id: u64) -> FetchResult<Vec<Group>> {
        (**self).list_sub_groups(group_id)
    }

    fn list_projects(&self, group_id: u64) -> FetchResult<Vec<Project>> {
        (**self).list_projects(group_id)
    }
}
