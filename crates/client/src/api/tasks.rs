use chrono::Utc;
use taskdeck_core::filters::overdue_tasks;
use taskdeck_core::models::{CreateTask, Priority, Task, TaskStatus, UpdateTask};
use taskdeck_core::types::Timestamp;

use super::{fetch_list, fetch_optional, item, remove, send_json};
use crate::error::ClientResult;
use crate::gateway::{ApiClient, Endpoint, RequestOptions};
use crate::lookup::Lookup;

const TASKS: &str = "/tasks";

/// Criteria for [`TaskApi::filter`]. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskCriteria {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub project_id: Option<String>,
    pub assignee_id: Option<String>,
    /// Keep only tasks past their due date that are not completed.
    pub overdue: bool,
}

impl TaskCriteria {
    fn endpoint(&self) -> Endpoint {
        Endpoint::new(TASKS)
            .query_opt("status", self.status.as_ref().map(TaskStatus::as_str))
            .query_opt("priority", self.priority.as_ref().map(Priority::as_str))
            .query_opt("projectId", self.project_id.as_deref())
            .query_opt("assigneeId", self.assignee_id.as_deref())
    }
}

/// Access to `/tasks`.
pub struct TaskApi;

impl TaskApi {
    pub async fn list(client: &ApiClient) -> ClientResult<Vec<Task>> {
        fetch_list(client, Endpoint::new(TASKS)).await
    }

    pub async fn get(client: &ApiClient, id: &str) -> ClientResult<Lookup<Task>> {
        fetch_optional(client, item(TASKS, id)).await
    }

    pub async fn list_by_project(client: &ApiClient, project_id: &str) -> ClientResult<Vec<Task>> {
        fetch_list(client, Endpoint::new(TASKS).query("projectId", project_id)).await
    }

    pub async fn list_by_assignee(
        client: &ApiClient,
        assignee_id: &str,
    ) -> ClientResult<Vec<Task>> {
        fetch_list(client, Endpoint::new(TASKS).query("assigneeId", assignee_id)).await
    }

    pub async fn list_by_status(client: &ApiClient, status: &TaskStatus) -> ClientResult<Vec<Task>> {
        fetch_list(client, Endpoint::new(TASKS).query("status", status.as_str())).await
    }

    pub async fn list_by_priority(
        client: &ApiClient,
        priority: &Priority,
    ) -> ClientResult<Vec<Task>> {
        fetch_list(client, Endpoint::new(TASKS).query("priority", priority.as_str())).await
    }

    /// Server-side search over task title and description.
    pub async fn search(client: &ApiClient, term: &str) -> ClientResult<Vec<Task>> {
        fetch_list(client, Endpoint::new(TASKS).query("search", term)).await
    }

    /// Fetch tasks matching `criteria`.
    ///
    /// Status, priority, project and assignee are sent to the API as query
    /// parameters. The overdue predicate has no server-side counterpart and
    /// is applied to the fetched list against the current time.
    pub async fn filter(client: &ApiClient, criteria: &TaskCriteria) -> ClientResult<Vec<Task>> {
        Self::filter_at(client, criteria, Utc::now()).await
    }

    /// [`TaskApi::filter`] with an explicit "now" for the overdue check.
    pub async fn filter_at(
        client: &ApiClient,
        criteria: &TaskCriteria,
        now: Timestamp,
    ) -> ClientResult<Vec<Task>> {
        let tasks: Vec<Task> = fetch_list(client, criteria.endpoint()).await?;
        if !criteria.overdue {
            return Ok(tasks);
        }

        let fetched = tasks.len();
        let overdue = overdue_tasks(tasks, now);
        tracing::debug!(fetched, overdue = overdue.len(), "Applied overdue filter");
        Ok(overdue)
    }

    pub async fn create(client: &ApiClient, input: &CreateTask) -> ClientResult<Task> {
        let task: Task =
            send_json(client, Endpoint::new(TASKS), RequestOptions::post(), input).await?;
        tracing::info!(task_id = %task.id, project_id = %task.project_id, "Task created");
        Ok(task)
    }

    pub async fn update(client: &ApiClient, id: &str, changes: &UpdateTask) -> ClientResult<Task> {
        send_json(client, item(TASKS, id), RequestOptions::patch(), changes).await
    }

    /// Quick status change through a partial update.
    pub async fn set_status(client: &ApiClient, id: &str, status: TaskStatus) -> ClientResult<Task> {
        let task = Self::update(client, id, &UpdateTask::status(status)).await?;
        tracing::info!(task_id = %id, status = %task.status, "Task status changed");
        Ok(task)
    }

    pub async fn delete(client: &ApiClient, id: &str) -> ClientResult<()> {
        remove(client, item(TASKS, id)).await?;
        tracing::info!(task_id = %id, "Task deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_only_sends_remote_predicates() {
        let criteria = TaskCriteria {
            status: Some(TaskStatus::InProgress),
            assignee_id: Some("u1".to_string()),
            overdue: true,
            ..TaskCriteria::default()
        };
        assert_eq!(
            criteria.endpoint().to_string(),
            "/tasks?status=in-progress&assigneeId=u1"
        );
    }

    #[test]
    fn empty_criteria_fetches_everything() {
        assert_eq!(TaskCriteria::default().endpoint().to_string(), "/tasks");
    }
}
