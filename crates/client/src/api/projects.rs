use taskdeck_core::models::{CreateProject, Project, ProjectStatus, UpdateProject};

use super::{fetch_list, fetch_optional, item, remove, send_json};
use crate::error::ClientResult;
use crate::gateway::{ApiClient, Endpoint, RequestOptions};
use crate::lookup::Lookup;

const PROJECTS: &str = "/projects";

/// Access to `/projects`.
pub struct ProjectApi;

impl ProjectApi {
    pub async fn list(client: &ApiClient) -> ClientResult<Vec<Project>> {
        fetch_list(client, Endpoint::new(PROJECTS)).await
    }

    pub async fn get(client: &ApiClient, id: &str) -> ClientResult<Lookup<Project>> {
        fetch_optional(client, item(PROJECTS, id)).await
    }

    pub async fn list_by_status(
        client: &ApiClient,
        status: &ProjectStatus,
    ) -> ClientResult<Vec<Project>> {
        fetch_list(
            client,
            Endpoint::new(PROJECTS).query("status", status.as_str()),
        )
        .await
    }

    /// Server-side search over project name and description.
    pub async fn search(client: &ApiClient, term: &str) -> ClientResult<Vec<Project>> {
        fetch_list(client, Endpoint::new(PROJECTS).query("search", term)).await
    }

    pub async fn create(client: &ApiClient, input: &CreateProject) -> ClientResult<Project> {
        let project: Project =
            send_json(client, Endpoint::new(PROJECTS), RequestOptions::post(), input).await?;
        tracing::info!(project_id = %project.id, "Project created");
        Ok(project)
    }

    pub async fn update(
        client: &ApiClient,
        id: &str,
        changes: &UpdateProject,
    ) -> ClientResult<Project> {
        send_json(client, item(PROJECTS, id), RequestOptions::patch(), changes).await
    }

    pub async fn delete(client: &ApiClient, id: &str) -> ClientResult<()> {
        remove(client, item(PROJECTS, id)).await
    }
}
