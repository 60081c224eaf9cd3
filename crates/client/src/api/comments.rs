use taskdeck_core::models::{Comment, CreateComment, UpdateComment};
use taskdeck_core::validation::validate_new_comment;

use super::{fetch_list, fetch_optional, item, remove, send_json};
use crate::error::ClientResult;
use crate::gateway::{ApiClient, Endpoint, RequestOptions};
use crate::lookup::Lookup;

const COMMENTS: &str = "/comments";

/// Number of comments [`CommentApi::recent`] asks for when no limit is given.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Access to `/comments`.
pub struct CommentApi;

impl CommentApi {
    pub async fn list(client: &ApiClient) -> ClientResult<Vec<Comment>> {
        fetch_list(client, Endpoint::new(COMMENTS)).await
    }

    pub async fn get(client: &ApiClient, id: &str) -> ClientResult<Lookup<Comment>> {
        fetch_optional(client, item(COMMENTS, id)).await
    }

    pub async fn list_by_task(client: &ApiClient, task_id: &str) -> ClientResult<Vec<Comment>> {
        fetch_list(client, Endpoint::new(COMMENTS).query("taskId", task_id)).await
    }

    pub async fn list_by_author(
        client: &ApiClient,
        author_id: &str,
    ) -> ClientResult<Vec<Comment>> {
        fetch_list(client, Endpoint::new(COMMENTS).query("authorId", author_id)).await
    }

    /// The most recent comments, newest first as ordered by the API.
    pub async fn recent(client: &ApiClient, limit: Option<usize>) -> ClientResult<Vec<Comment>> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        fetch_list(
            client,
            Endpoint::new(COMMENTS).query("recent", limit.to_string()),
        )
        .await
    }

    /// Create a comment. Blank content is rejected before any request.
    pub async fn create(client: &ApiClient, input: &CreateComment) -> ClientResult<Comment> {
        validate_new_comment(input)?;
        let comment: Comment =
            send_json(client, Endpoint::new(COMMENTS), RequestOptions::post(), input).await?;
        tracing::info!(comment_id = %comment.id, task_id = %comment.task_id, "Comment added");
        Ok(comment)
    }

    pub async fn update(
        client: &ApiClient,
        id: &str,
        changes: &UpdateComment,
    ) -> ClientResult<Comment> {
        send_json(client, item(COMMENTS, id), RequestOptions::patch(), changes).await
    }

    pub async fn delete(client: &ApiClient, id: &str) -> ClientResult<()> {
        remove(client, item(COMMENTS, id)).await
    }
}
