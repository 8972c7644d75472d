//! Change-sets from completed download cycles
//!
//! A [`ChangeSet`] carries the names of items that a finished download cycle
//! added, changed, or deleted in a watched folder. The notification formatter
//! consumes it exactly once to build the user-facing summary.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Named file changes resulting from one completed download cycle
///
/// Each category is an ordered, deduplicated set so that summaries are
/// deterministic regardless of the order the daemon reported the items in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Items that appeared in the folder
    #[serde(default)]
    pub added: BTreeSet<String>,
    /// Items whose content changed or that were moved
    #[serde(default)]
    pub changed: BTreeSet<String>,
    /// Items that were removed from the folder
    #[serde(default)]
    pub deleted: BTreeSet<String>,
}

impl ChangeSet {
    /// Create an empty change-set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an added item
    #[must_use]
    pub fn with_added(mut self, name: impl Into<String>) -> Self {
        self.added.insert(name.into());
        self
    }

    /// Record a changed item
    #[must_use]
    pub fn with_changed(mut self, name: impl Into<String>) -> Self {
        self.changed.insert(name.into());
        self
    }

    /// Record a deleted item
    #[must_use]
    pub fn with_deleted(mut self, name: impl Into<String>) -> Self {
        self.deleted.insert(name.into());
        self
    }

    /// Whether any category is non-empty
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.changed.is_empty() || !self.deleted.is_empty()
    }

    /// Total number of changed items across all categories
    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.changed.len() + self.deleted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_changes() {
        let changes = ChangeSet::new();
        assert!(!changes.has_changes());
        assert_eq!(changes.total(), 0);
    }

    #[test]
    fn test_total_sums_all_categories() {
        let changes = ChangeSet::new()
            .with_added("a.txt")
            .with_added("b.txt")
            .with_changed("c.txt")
            .with_deleted("d.txt");
        assert!(changes.has_changes());
        assert_eq!(changes.total(), 4);
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let changes = ChangeSet::new().with_added("same.txt").with_added("same.txt");
        assert_eq!(changes.total(), 1);
    }

    #[test]
    fn test_missing_categories_deserialize_as_empty() {
        // The daemon omits empty categories on the wire
        let changes: ChangeSet = serde_json::from_str(r#"{"added": ["new.txt"]}"#).unwrap();
        assert_eq!(changes.added.len(), 1);
        assert!(changes.changed.is_empty());
        assert!(changes.deleted.is_empty());
    }
}
