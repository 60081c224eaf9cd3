//! Client-side predicates applied over fetched collections.
//!
//! List views fetch whole collections and narrow them locally: a free-text
//! search over a couple of fields plus exact-match selectors where `None`
//! stands for the "all" choice.

use crate::models::{Project, Task, TaskStatus, User};
use crate::types::Timestamp;

/// Sentinel used by list views for "no restriction".
pub const ALL: &str = "all";

/// Turn a selector value into a predicate value: `"all"` and blank input
/// select everything.
pub fn selection(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(raw.to_string())
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Entities searchable by free text.
pub trait Searchable {
    /// The fields a search term is matched against.
    fn search_fields(&self) -> [&str; 2];
}

impl Searchable for Task {
    fn search_fields(&self) -> [&str; 2] {
        [&self.title, &self.description]
    }
}

impl Searchable for Project {
    fn search_fields(&self) -> [&str; 2] {
        [&self.name, &self.description]
    }
}

impl Searchable for User {
    fn search_fields(&self) -> [&str; 2] {
        [&self.name, &self.email]
    }
}

/// Case-insensitive substring match of `term` against any search field.
/// An empty term matches everything.
pub fn matches_search<T: Searchable + ?Sized>(item: &T, term: &str) -> bool {
    let needle = term.to_lowercase();
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Keep the items matching `term`, preserving order.
pub fn search<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches_search(*item, term))
        .collect()
}

// ---------------------------------------------------------------------------
// Overdue
// ---------------------------------------------------------------------------

/// A task is overdue when it has a due date in the past and is not
/// completed. An unparseable due date never counts as overdue.
pub fn is_overdue(task: &Task, now: Timestamp) -> bool {
    if task.is_completed() {
        return false;
    }
    task.due_at().is_some_and(|due| due < now)
}

/// Keep the tasks overdue at `now`.
pub fn overdue_tasks(tasks: Vec<Task>, now: Timestamp) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| is_overdue(task, now))
        .collect()
}

// ---------------------------------------------------------------------------
// Compound task filter
// ---------------------------------------------------------------------------

/// The task list filter bar: every set predicate must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub search: String,
    pub status: Option<TaskStatus>,
    pub assignee_id: Option<String>,
    pub project_id: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        matches_search(task, &self.search)
            && self.status.as_ref().is_none_or(|s| &task.status == s)
            && self
                .assignee_id
                .as_deref()
                .is_none_or(|a| task.assignee_id.as_deref() == Some(a))
            && self
                .project_id
                .as_deref()
                .is_none_or(|p| task.project_id == p)
    }

    /// Apply the filter, preserving order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::test_support::{project, task, user};

    // -- search ---------------------------------------------------------------

    #[test]
    fn search_is_case_insensitive_on_title() {
        let t = task("t1").title("Fix login bug").build();
        assert!(matches_search(&t, "login"));
        assert!(matches_search(&t, "LOGIN"));
        assert!(!matches_search(&t, "signup"));
    }

    #[test]
    fn search_matches_description() {
        let t = task("t1")
            .title("Refactor")
            .description("Split the Session module")
            .build();
        assert!(matches_search(&t, "session"));
    }

    #[test]
    fn empty_search_matches_everything() {
        let t = task("t1").build();
        assert!(matches_search(&t, ""));
    }

    #[test]
    fn project_search_uses_name_and_description() {
        let p = project("p1", "Website", "Marketing relaunch");
        assert!(matches_search(&p, "web"));
        assert!(matches_search(&p, "RELAUNCH"));
        assert!(!matches_search(&p, "mobile"));
    }

    #[test]
    fn user_search_uses_name_and_email() {
        let users = vec![user("u1", "Ana Diaz", "ana@acme.io"), user("u2", "Bo Li", "bo@acme.io")];
        let found = search(&users, "ANA@");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "u1");
    }

    // -- overdue --------------------------------------------------------------

    #[test]
    fn past_due_open_task_is_overdue() {
        let now = Utc::now();
        let yesterday = (now - Duration::days(1)).to_rfc3339();
        let t = task("t1").due(&yesterday).build();
        assert!(is_overdue(&t, now));
    }

    #[test]
    fn completed_task_is_never_overdue() {
        let now = Utc::now();
        let t = task("t1")
            .due("2000-01-01")
            .status(TaskStatus::Completed)
            .build();
        assert!(!is_overdue(&t, now));
    }

    #[test]
    fn future_or_missing_due_date_is_not_overdue() {
        let now = Utc::now();
        let tomorrow = (now + Duration::days(1)).to_rfc3339();
        assert!(!is_overdue(&task("t1").due(&tomorrow).build(), now));
        assert!(!is_overdue(&task("t2").build(), now));
        assert!(!is_overdue(&task("t3").due("soon").build(), now));
    }

    #[test]
    fn overdue_matches_definition_for_every_status() {
        let now = Utc::now();
        for status in [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::from("blocked"),
        ] {
            for due in [None, Some("2000-01-01"), Some("2999-01-01")] {
                let mut builder = task("t").status(status.clone());
                if let Some(d) = due {
                    builder = builder.due(d);
                }
                let t = builder.build();
                let expected = due.is_some_and(|d| d.starts_with("2000"))
                    && status != TaskStatus::Completed;
                assert_eq!(is_overdue(&t, now), expected, "status={status} due={due:?}");
            }
        }
    }

    // -- compound filter ------------------------------------------------------

    #[test]
    fn all_sentinels_return_input_unchanged() {
        let tasks = vec![
            task("t1").status(TaskStatus::Todo).build(),
            task("t2").status(TaskStatus::Completed).assignee("u1").build(),
            task("t3").status(TaskStatus::from("weird")).build(),
        ];
        let filter = TaskFilter {
            search: String::new(),
            status: selection("all").map(TaskStatus::from),
            assignee_id: selection("all"),
            project_id: selection(ALL),
        };

        let kept: Vec<Task> = filter.apply(&tasks).into_iter().cloned().collect();
        assert_eq!(kept, tasks);
    }

    #[test]
    fn every_predicate_must_match() {
        let tasks = vec![
            task("t1").title("Fix login").assignee("u1").project("p1").build(),
            task("t2").title("Fix login").assignee("u2").project("p1").build(),
            task("t3").title("Fix login").assignee("u1").project("p2").build(),
            task("t4").title("Docs").assignee("u1").project("p1").build(),
        ];
        let filter = TaskFilter {
            search: "login".to_string(),
            status: Some(TaskStatus::Todo),
            assignee_id: Some("u1".to_string()),
            project_id: Some("p1".to_string()),
        };

        let ids: Vec<&str> = filter.apply(&tasks).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1"]);
    }

    #[test]
    fn assignee_filter_excludes_unassigned_tasks() {
        let tasks = vec![task("t1").build(), task("t2").assignee("u1").build()];
        let filter = TaskFilter {
            assignee_id: Some("u1".to_string()),
            ..TaskFilter::default()
        };
        assert_eq!(filter.apply(&tasks).len(), 1);
    }

    #[test]
    fn selection_treats_blank_and_all_as_none() {
        assert_eq!(selection(""), None);
        assert_eq!(selection("All"), None);
        assert_eq!(selection(" todo "), Some("todo".to_string()));
    }
}
