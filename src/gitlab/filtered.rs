// src/gitlab/filtered.rs

use super::GroupDirectory;
use crate::core_types::{Group, Project};
use crate::errors::FetchResult;
use crate::filtering::{filter_ignored, IgnoreSet};

/// Wraps a `GroupDirectory` so that sub-group and project listings come back
/// with ignored names already removed.
///
/// The top-level group listing is passed through untouched: it is only used to
/// locate the target group, which is matched by name separately.
#[derive(Debug, Clone)]
pub struct FilteredDirectory<D> {
    inner: D,
    ignores: IgnoreSet,
}

impl<D: GroupDirectory> FilteredDirectory<D> {
    /// Wraps `inner`, filtering its child listings against `ignores`.
    pub fn new(inner: D, ignores: IgnoreSet) -> Self {
        Self { inner, ignores }
    }

    /// The wrapped directory.
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: GroupDirectory> GroupDirectory for FilteredDirectory<D> {
    fn list_groups(&self) -> FetchResult<Vec<Group>> {
        self.inner.list_groups()
    }

    fn list_sub_groups(&self, group_id: u64) -> FetchResult<Vec<Group>> {
        let groups = self.inner.list_sub_groups(group_id)?;
        Ok(filter_ignored(groups, &self.ignores))
    }

    fn list_projects(&self, group_id: u64) -> FetchResult<Vec<Project>> {
        let projects = self.inner.list_projects(group_id)?;
        Ok(filter_ignored(projects, &self.ignores))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDirectory;

    fn directory() -> FakeDirectory {
        FakeDirectory::new()
            .with_groups(vec![Group::new(1, "legacy"), Group::new(2, "platform")])
            .with_sub_groups(2, vec![Group::new(3, "legacy"), Group::new(4, "tools")])
            .with_projects(
                2,
                vec![
                    Project::new(10, "legacy", "https://x/legacy.git", "platform/legacy"),
                    Project::new(11, "api", "https://x/api.git", "platform/api"),
                ],
            )
    }

    #[test]
    fn test_child_listings_are_filtered() {
        let filtered = FilteredDirectory::new(directory(), IgnoreSet::from_names(["legacy"]));

        let subs = filtered.list_sub_groups(2).unwrap();
        assert_eq!(subs, vec![Group::new(4, "tools")]);

        let projects = filtered.list_projects(2).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "api");
    }

    #[test]
    fn test_top_level_listing_is_not_filtered() {
        let filtered = FilteredDirectory::new(directory(), IgnoreSet::from_names(["legacy"]));
        let groups = filtered.list_groups().unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_failures_pass_through() {
        let inner = directory().with_failing_projects(2);
        let filtered = FilteredDirectory::new(inner, IgnoreSet::from_names(["legacy"]));
        assert!(filtered.list_projects(2).is_err());
    }
}
