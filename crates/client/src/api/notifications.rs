use taskdeck_core::models::{CreateNotification, Notification, UpdateNotification};

use super::{fetch_list, fetch_optional, item, remove, send_json};
use crate::error::ClientResult;
use crate::gateway::{ApiClient, Endpoint, RequestOptions};
use crate::lookup::Lookup;

const NOTIFICATIONS: &str = "/notifications";

/// Access to `/notifications`.
///
/// The list and the unread count come from separate endpoints and are not
/// fetched atomically, so they can briefly disagree.
pub struct NotificationApi;

impl NotificationApi {
    pub async fn list(client: &ApiClient) -> ClientResult<Vec<Notification>> {
        fetch_list(client, Endpoint::new(NOTIFICATIONS)).await
    }

    pub async fn get(client: &ApiClient, id: &str) -> ClientResult<Lookup<Notification>> {
        fetch_optional(client, item(NOTIFICATIONS, id)).await
    }

    pub async fn list_by_user(
        client: &ApiClient,
        user_id: &str,
    ) -> ClientResult<Vec<Notification>> {
        fetch_list(
            client,
            Endpoint::new(NOTIFICATIONS).query("userId", user_id),
        )
        .await
    }

    /// Number of unread notifications, as a bare JSON number.
    pub async fn unread_count(client: &ApiClient) -> ClientResult<u64> {
        let endpoint = Endpoint::new(NOTIFICATIONS).segment("unread-count");
        Ok(client.request(&endpoint, RequestOptions::get()).await?)
    }

    pub async fn create(
        client: &ApiClient,
        input: &CreateNotification,
    ) -> ClientResult<Notification> {
        let notification: Notification = send_json(
            client,
            Endpoint::new(NOTIFICATIONS),
            RequestOptions::post(),
            input,
        )
        .await?;
        tracing::debug!(
            notification_id = %notification.id,
            kind = %notification.kind,
            "Notification created"
        );
        Ok(notification)
    }

    pub async fn update(
        client: &ApiClient,
        id: &str,
        changes: &UpdateNotification,
    ) -> ClientResult<Notification> {
        send_json(client, item(NOTIFICATIONS, id), RequestOptions::patch(), changes).await
    }

    pub async fn mark_read(client: &ApiClient, id: &str) -> ClientResult<()> {
        let endpoint = item(NOTIFICATIONS, id).segment("read");
        client
            .request_no_content(&endpoint, RequestOptions::patch())
            .await?;
        Ok(())
    }

    pub async fn mark_unread(client: &ApiClient, id: &str) -> ClientResult<Notification> {
        let changes = UpdateNotification {
            read: Some(false),
            ..UpdateNotification::default()
        };
        Self::update(client, id, &changes).await
    }

    pub async fn mark_all_read(client: &ApiClient) -> ClientResult<()> {
        let endpoint = Endpoint::new(NOTIFICATIONS).segment("mark-all-read");
        client
            .request_no_content(&endpoint, RequestOptions::patch())
            .await?;
        tracing::info!("Marked all notifications as read");
        Ok(())
    }

    pub async fn delete(client: &ApiClient, id: &str) -> ClientResult<()> {
        remove(client, item(NOTIFICATIONS, id)).await
    }

    /// Open a notification: mark it read if it is unread and return the
    /// route it points at, if any.
    pub async fn open(
        client: &ApiClient,
        notification: &Notification,
    ) -> ClientResult<Option<String>> {
        if !notification.read {
            Self::mark_read(client, &notification.id).await?;
        }
        Ok(notification.action_url.clone())
    }
}
