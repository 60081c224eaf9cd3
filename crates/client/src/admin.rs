//! User administration actions.
//!
//! Each action checks what the signed-in user may do to the target before
//! touching the network, performs the change (if any), then records a
//! notification addressed to the acting user.

use taskdeck_core::error::CoreError;
use taskdeck_core::models::{CreateNotification, Notification, NotificationKind, UpdateUser, User};
use taskdeck_core::permissions::{is_allowed, UserAction};

use crate::api::{NotificationApi, UserApi};
use crate::error::ClientResult;
use crate::gateway::ApiClient;

/// Administrative actions on other users.
pub struct UserAdmin;

impl UserAdmin {
    /// Flip the target between admin and member.
    pub async fn toggle_role(client: &ApiClient, target: &User) -> ClientResult<User> {
        let actor = authorize(client, target, UserAction::ToggleRole)?;
        let role = target.role.toggled();

        let changes = UpdateUser {
            role: Some(role.clone()),
            ..UpdateUser::default()
        };
        let updated = UserApi::update(client, &target.id, &changes).await?;

        notify(
            client,
            actor.as_ref(),
            NotificationKind::Info,
            "Role updated",
            format!("{}'s role was changed to {}", target.name, role.label()),
        )
        .await?;

        tracing::info!(user_id = %target.id, role = %role, "User role toggled");
        Ok(updated)
    }

    /// Apply profile changes to the target.
    pub async fn edit_user(
        client: &ApiClient,
        target: &User,
        changes: &UpdateUser,
    ) -> ClientResult<User> {
        let actor = authorize(client, target, UserAction::Edit)?;
        let updated = UserApi::update(client, &target.id, changes).await?;

        notify(
            client,
            actor.as_ref(),
            NotificationKind::Info,
            "User updated",
            format!("{}'s profile was updated", updated.name),
        )
        .await?;

        tracing::info!(user_id = %target.id, "User edited");
        Ok(updated)
    }

    /// Report the target as deactivated.
    ///
    /// Users carry no active/inactive state in the API, so nothing is
    /// updated; the action only records the notification.
    pub async fn toggle_status(client: &ApiClient, target: &User) -> ClientResult<Notification> {
        let actor = authorize(client, target, UserAction::ToggleStatus)?;
        notify(
            client,
            actor.as_ref(),
            NotificationKind::Warning,
            "User status updated",
            format!("{} has been deactivated", target.name),
        )
        .await
    }

    pub async fn send_message(client: &ApiClient, target: &User) -> ClientResult<Notification> {
        let actor = authorize(client, target, UserAction::SendMessage)?;
        notify(
            client,
            actor.as_ref(),
            NotificationKind::Success,
            "Message sent",
            format!("You sent a message to {}", target.name),
        )
        .await
    }

    pub async fn send_invitation(client: &ApiClient, target: &User) -> ClientResult<Notification> {
        let actor = authorize(client, target, UserAction::SendInvitation)?;
        notify(
            client,
            actor.as_ref(),
            NotificationKind::Success,
            "Email sent",
            format!("An invitation email was sent to {}", target.email),
        )
        .await
    }

    /// Delete the target, then record the removal.
    pub async fn delete_user(client: &ApiClient, target: &User) -> ClientResult<Notification> {
        let actor = authorize(client, target, UserAction::Delete)?;
        UserApi::delete(client, &target.id).await?;
        notify(
            client,
            actor.as_ref(),
            NotificationKind::Error,
            "User deleted",
            format!("{} has been removed from the system", target.name),
        )
        .await
    }
}

/// Returns the acting user, or `Forbidden` when the action is not offered.
fn authorize(client: &ApiClient, target: &User, action: UserAction) -> ClientResult<Option<User>> {
    let actor = client.session().current_user();
    if !is_allowed(actor.as_ref(), target, action) {
        tracing::warn!(
            actor_id = actor.as_ref().map(|a| a.id.as_str()).unwrap_or("anonymous"),
            target_id = %target.id,
            ?action,
            "User action rejected"
        );
        return Err(CoreError::Forbidden(format!(
            "{} is not available for user {}",
            action_name(action),
            target.id
        ))
        .into());
    }
    Ok(actor)
}

fn action_name(action: UserAction) -> &'static str {
    match action {
        UserAction::SendMessage => "send message",
        UserAction::SendInvitation => "send invitation",
        UserAction::ToggleRole => "toggle role",
        UserAction::ToggleStatus => "toggle status",
        UserAction::Edit => "edit",
        UserAction::Delete => "delete",
    }
}

async fn notify(
    client: &ApiClient,
    actor: Option<&User>,
    kind: NotificationKind,
    title: &str,
    message: String,
) -> ClientResult<Notification> {
    let input = CreateNotification {
        title: title.to_string(),
        message,
        kind,
        read: false,
        user_id: actor.map(|a| a.id.clone()),
        action_url: None,
    };
    NotificationApi::create(client, &input).await
}
