//! Aggregations behind the dashboard cards and per-user statistics.
//!
//! The API has no aggregate endpoints, so every number here is computed from
//! collections the caller already fetched.

use serde::Serialize;

use crate::models::{Project, Task, TaskStatus};

/// Number of projects shown in the "recent projects" card.
pub const RECENT_PROJECTS_LIMIT: usize = 3;

/// Percentage of completed items, `0.0` for an empty collection.
pub fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Format a rate with one decimal, e.g. `66.7`.
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.1}")
}

// ---------------------------------------------------------------------------
// Status buckets
// ---------------------------------------------------------------------------

/// Tasks partitioned by status. Tasks with an unrecognized status are in
/// none of the buckets.
#[derive(Debug, Default)]
pub struct StatusBuckets<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

pub fn bucket_by_status<'a, I>(tasks: I) -> StatusBuckets<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut buckets = StatusBuckets::default();
    for task in tasks {
        match task.status {
            TaskStatus::Todo => buckets.todo.push(task),
            TaskStatus::InProgress => buckets.in_progress.push(task),
            TaskStatus::Completed => buckets.completed.push(task),
            TaskStatus::Other(_) => {}
        }
    }
    buckets
}

// ---------------------------------------------------------------------------
// Task stats
// ---------------------------------------------------------------------------

/// Counts over a task collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    /// Full precision; round only for display.
    pub completion_rate: f64,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let buckets = bucket_by_status(tasks);
        let total = tasks.len();
        let completed = buckets.completed.len();
        Self {
            total,
            completed,
            in_progress: buckets.in_progress.len(),
            pending: buckets.todo.len(),
            completion_rate: completion_rate(completed, total),
        }
    }
}

/// Per-user task statistics for the user directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTaskStats {
    pub user_id: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_rate: f64,
}

/// Compute a user's stats by filtering the full task list by assignee.
pub fn user_task_stats(tasks: &[Task], user_id: &str) -> UserTaskStats {
    let assigned: Vec<&Task> = tasks.iter().filter(|t| t.is_assigned_to(user_id)).collect();
    let completed = assigned.iter().filter(|t| t.is_completed()).count();
    UserTaskStats {
        user_id: user_id.to_string(),
        total_tasks: assigned.len(),
        completed_tasks: completed,
        completion_rate: completion_rate(completed, assigned.len()),
    }
}

/// Number of tasks referencing a project.
pub fn project_task_count(tasks: &[Task], project_id: &str) -> usize {
    tasks.iter().filter(|t| t.project_id == project_id).count()
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Everything the dashboard overview renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub tasks: TaskStats,
    /// The first projects of the fetched list, in API order.
    pub recent_projects: Vec<Project>,
}

impl DashboardSummary {
    pub fn compute(projects: &[Project], tasks: &[Task]) -> Self {
        Self {
            total_projects: projects.len(),
            tasks: TaskStats::from_tasks(tasks),
            recent_projects: projects
                .iter()
                .take(RECENT_PROJECTS_LIMIT)
                .cloned()
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
