// src/filtering/ignore_set.rs

use crate::core_types::{Group, Project};
use std::collections::HashSet;

/// Anything that can be matched against the ignore set by name.
pub trait Named {
    /// The display name compared against the ignore set.
    fn name(&self) -> &str;
}

impl Named for Group {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Project {
    fn name(&self) -> &str {
        &self.name
    }
}

/// The set of group and project names excluded from traversal and cloning.
///
/// # Examples
///
/// ```
/// use groupmirror::filtering::IgnoreSet;
///
/// let ignores = IgnoreSet::from_names(["archive", "sandbox"]);
/// assert!(ignores.contains("archive"));
/// assert!(!ignores.contains("Archive")); // matching is case-sensitive
/// assert_eq!(ignores.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    names: HashSet<String>,
}

impl IgnoreSet {
    /// Creates an empty ignore set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an ignore set from a list of names. Surrounding whitespace is
    /// trimmed and blank entries are dropped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    /// Returns `true` if `name` is ignored.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns `true` if nothing is ignored.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of ignored names.
    pub fn len(&self) -> usize {
        self.names.len()
    }
}

/// Removes every entry whose name is in `ignores`, preserving the order of the rest.
///
/// # Examples
///
/// ```
/// use groupmirror::core_types::Group;
/// use groupmirror::filtering::{filter_ignored, IgnoreSet};
///
/// let groups = vec![Group::new(1, "frontend"), Group::new(2, "legacy"), Group::new(3, "backend")];
/// let kept = filter_ignored(groups, &IgnoreSet::from_names(["legacy"]));
/// let names: Vec<_> = kept.iter().map(|g| g.name.as_str()).collect();
/// assert_eq!(names, ["frontend", "backend"]);
/// ```
pub fn filter_ignored<T: Named>(entries: Vec<T>, ignores: &IgnoreSet) -> Vec<T> {
    if ignores.is_empty() {
        return entries;
    }
    entries
        .into_iter()
        .filter(|entry| {
            let ignored = ignores.contains(entry.name());
            if ignored {
                log::debug!("Ignoring '{}'", entry.name());
            }
            !ignored
        })
        .collect()
}
