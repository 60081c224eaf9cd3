//! Project entity model and payloads.

use serde::{Deserialize, Serialize};

use crate::models::status::ProjectStatus;
use crate::types::{lenient_timestamp, EntityId, Timestamp};

/// A project. Tasks reference it through `Task::project_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Timestamp,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub updated_at: Timestamp,
}

/// Payload for creating a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
}

/// Partial update for a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}
