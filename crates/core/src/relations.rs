//! Client-side joins between separately fetched collections.
//!
//! References are plain ids. The referenced entity may have been deleted,
//! so every lookup yields an `Option` and display helpers fall back to a
//! placeholder instead of failing.

use crate::models::{Comment, Identified, Project, Task, User};

/// Label for a task without an assignee.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Label for a reference to a user that no longer exists.
pub const UNKNOWN_USER_LABEL: &str = "Unknown user";

/// Label for a reference to a project that no longer exists.
pub const UNKNOWN_PROJECT_LABEL: &str = "Unknown project";

/// Find an entity by id in a fetched collection.
pub fn find_by_id<'a, T: Identified>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// The user a task is assigned to, if any and if still present.
pub fn assignee_of<'a>(task: &Task, users: &'a [User]) -> Option<&'a User> {
    task.assignee_id
        .as_deref()
        .and_then(|id| find_by_id(users, id))
}

/// The name to show for a task's assignee.
pub fn assignee_label(task: &Task, users: &[User]) -> String {
    if task.assignee_id.is_none() {
        return UNASSIGNED_LABEL.to_string();
    }
    assignee_of(task, users)
        .map(|u| u.name.clone())
        .unwrap_or_else(|| UNKNOWN_USER_LABEL.to_string())
}

/// The name to show for a task's project.
pub fn project_label(task: &Task, projects: &[Project]) -> String {
    find_by_id(projects, &task.project_id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| UNKNOWN_PROJECT_LABEL.to_string())
}

/// Avatar fallback: the first letter of each space-separated name part.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect()
}

/// A comment paired with its author's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadEntry<'a> {
    pub comment: &'a Comment,
    pub author: Option<&'a User>,
}

impl ThreadEntry<'_> {
    pub fn author_name(&self) -> &str {
        self.author
            .map(|u| u.name.as_str())
            .unwrap_or(UNKNOWN_USER_LABEL)
    }
}

/// Build a comment thread ordered by creation time (oldest first). Comments
/// with equal timestamps keep their fetched order.
pub fn comment_thread<'a>(comments: &'a [Comment], users: &'a [User]) -> Vec<ThreadEntry<'a>> {
    let mut entries: Vec<ThreadEntry<'a>> = comments
        .iter()
        .map(|comment| ThreadEntry {
            comment,
            author: find_by_id(users, &comment.author_id),
        })
        .collect();
    entries.sort_by_key(|e| e.comment.created_at);
    entries
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
