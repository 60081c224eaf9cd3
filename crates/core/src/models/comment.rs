//! Comment entity model and payloads.

use serde::{Deserialize, Serialize};

use crate::types::{lenient_timestamp, EntityId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: EntityId,
    pub task_id: EntityId,
    pub author_id: EntityId,
    pub content: String,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Timestamp,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub task_id: EntityId,
    pub author_id: EntityId,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
