//! Change-set to notification wording
//!
//! Pure functions turning one completed download cycle's change-set into the
//! subject and message of a desktop notification. A single change names the
//! file; several changes are rolled up per category with correct plurals.

use synctray_core::domain::ChangeSet;
use synctray_core::ports::Notification;

/// Builds the notification for a completed download cycle
///
/// Returns `None` for an empty change-set; callers skip the notification
/// entirely in that case. Category order in rolled-up messages is always
/// added, changed, deleted.
pub fn summarize_changes(changes: &ChangeSet, root_name: &str) -> Option<Notification> {
    match changes.total() {
        0 => None,
        1 => single_change(changes, root_name),
        _ => Some(rolled_up(changes, root_name)),
    }
}

/// Wording for the one category that holds the single changed item
fn single_change(changes: &ChangeSet, root_name: &str) -> Option<Notification> {
    if let Some(name) = changes.added.first() {
        return Some(Notification::new(
            format!("{name} added"),
            format!("File '{name}' was added to your folder '{root_name}'"),
        ));
    }
    if let Some(name) = changes.changed.first() {
        return Some(Notification::new(
            format!("{name} changed"),
            format!("File '{name}' was changed or moved in your folder '{root_name}'"),
        ));
    }
    changes.deleted.first().map(|name| {
        Notification::new(
            format!("{name} deleted"),
            format!("File '{name}' was removed from your folder '{root_name}'"),
        )
    })
}

/// Per-category counts joined into one line, e.g.
/// `"2 files added, 1 file deleted in your folder 'Docs'"`
fn rolled_up(changes: &ChangeSet, root_name: &str) -> Notification {
    let mut parts = Vec::new();
    push_count(&mut parts, changes.added.len(), "added");
    push_count(&mut parts, changes.changed.len(), "changed");
    push_count(&mut parts, changes.deleted.len(), "deleted");

    Notification::new(
        format!("folder '{root_name}' synced"),
        format!("{} in your folder '{root_name}'", parts.join(", ")),
    )
}

fn push_count(parts: &mut Vec<String>, count: usize, verb: &str) {
    if count == 1 {
        parts.push(format!("1 file {verb}"));
    } else if count > 1 {
        parts.push(format!("{count} files {verb}"));
    }
}
