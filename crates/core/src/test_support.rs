//! Fixture builders for unit tests.

use chrono::{TimeZone, Utc};

use crate::models::{Priority, Project, ProjectStatus, Role, Task, TaskStatus, User};
use crate::types::Timestamp;

pub fn epoch() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub struct TaskBuilder(Task);

pub fn task(id: &str) -> TaskBuilder {
    TaskBuilder(Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        description: String::new(),
        status: TaskStatus::Todo,
        priority: Priority::Medium,
        project_id: "p1".to_string(),
        assignee_id: None,
        due_date: None,
        created_at: epoch(),
        updated_at: epoch(),
    })
}

impl TaskBuilder {
    pub fn title(mut self, title: &str) -> Self {
        self.0.title = title.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.0.description = description.to_string();
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.0.status = status;
        self
    }

    pub fn assignee(mut self, user_id: &str) -> Self {
        self.0.assignee_id = Some(user_id.to_string());
        self
    }

    pub fn project(mut self, project_id: &str) -> Self {
        self.0.project_id = project_id.to_string();
        self
    }

    pub fn due(mut self, due: &str) -> Self {
        self.0.due_date = Some(due.to_string());
        self
    }

    pub fn build(self) -> Task {
        self.0
    }
}

pub fn project(id: &str, name: &str, description: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        status: ProjectStatus::Active,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn user(id: &str, name: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role: Role::Member,
        avatar: None,
        created_at: epoch(),
    }
}
