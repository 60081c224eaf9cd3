//! Task entity model and payloads.

use serde::{Deserialize, Serialize};

use crate::models::status::{Priority, TaskStatus};
use crate::types::{empty_string_as_none, lenient_timestamp, parse_timestamp, EntityId, Timestamp};

/// A task belonging to a project, optionally assigned to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub project_id: EntityId,
    /// `None` when unassigned. The referenced user may no longer exist.
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignee_id: Option<EntityId>,
    /// Due date as sent by the API (`YYYY-MM-DD` or RFC 3339).
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<String>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Timestamp,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub updated_at: Timestamp,
}

impl Task {
    /// The due date as an instant, or `None` when absent or unparseable.
    pub fn due_at(&self) -> Option<Timestamp> {
        self.due_date.as_deref().and_then(parse_due_date)
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assignee_id.as_deref() == Some(user_id)
    }
}

/// Parse a due date string.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps and
/// plain `YYYY-MM-DD` dates (UTC midnight).
///
/// A timestamp without an offset is read as UTC, not as the machine's local
/// time. Overdue checks are therefore the same on every host, and a naive due
/// date can flip to overdue up to one UTC offset earlier or later than a
/// browser in that zone would show it.
pub fn parse_due_date(raw: &str) -> Option<Timestamp> {
    parse_timestamp(raw)
}

/// Payload for creating a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub project_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Partial update for a task. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl UpdateTask {
    /// An update that only changes the status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_date_as_utc_midnight() {
        let due = parse_due_date("2024-03-15").unwrap();
        assert_eq!(due.to_rfc3339(), "2024-03-15T00:00:00+00:00");
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let due = parse_due_date("2024-03-15T10:00:00+02:00").unwrap();
        assert_eq!(due.to_rfc3339(), "2024-03-15T08:00:00+00:00");
    }

    #[test]
    fn parses_naive_timestamp_with_millis() {
        assert!(parse_due_date("2024-03-15T10:00:00.000").is_some());
    }

    #[test]
    fn garbage_is_not_a_date() {
        assert_eq!(parse_due_date("next friday"), None);
    }

    #[test]
    fn decodes_unassigned_task_with_empty_strings() {
        let json = serde_json::json!({
            "id": "t1",
            "title": "Write docs",
            "description": "",
            "status": "todo",
            "priority": "low",
            "projectId": "p1",
            "assigneeId": "",
            "dueDate": "",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });

        let task: Task = serde_json::from_value(json).unwrap();
        assert_eq!(task.assignee_id, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.due_at(), None);
    }

    #[test]
    fn list_with_offset_less_timestamps_decodes() {
        let task = |created_at: &str| {
            serde_json::json!({
                "id": "t1",
                "title": "Write docs",
                "status": "todo",
                "priority": "low",
                "projectId": "p1",
                "createdAt": created_at,
                "updatedAt": created_at
            })
        };
        let json = serde_json::json!([
            task("2024-01-01T00:00:00Z"),
            task("2024-01-01T10:00:00"),
            task("2024-01-02"),
        ]);

        let tasks: Vec<Task> = serde_json::from_value(json).unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[1].created_at.to_rfc3339(), "2024-01-01T10:00:00+00:00");
        assert_eq!(tasks[2].updated_at.to_rfc3339(), "2024-01-02T00:00:00+00:00");
    }

    #[test]
    fn status_only_update_serializes_one_field() {
        let json = serde_json::to_value(UpdateTask::status(TaskStatus::Completed)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "completed" }));
    }
}
