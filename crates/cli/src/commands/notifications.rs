use anyhow::{Context, Result};
use clap::Subcommand;

use taskdeck_client::api::NotificationApi;
use taskdeck_core::time_format::relative_time;

use super::{print_json, require, Ctx};

#[derive(Subcommand, Debug)]
pub enum NotificationCommand {
    /// List notifications, newest first
    #[command(alias = "ls")]
    List {
        /// Only notifications addressed to this user
        #[arg(long)]
        user: Option<String>,
    },

    /// Mark a notification as read
    Read {
        /// Notification ID
        id: String,
    },

    /// Mark a notification as unread
    Unread {
        /// Notification ID
        id: String,
    },

    /// Mark every notification as read
    ReadAll,

    /// Open a notification: mark it read and print where it points
    Open {
        /// Notification ID
        id: String,
    },

    /// Delete a notification
    Delete {
        /// Notification ID
        id: String,
    },
}

pub async fn run(ctx: &Ctx, cmd: NotificationCommand) -> Result<()> {
    let client = &ctx.client;
    match cmd {
        NotificationCommand::List { user } => {
            let mut notifications = match user.as_deref() {
                Some(user_id) => NotificationApi::list_by_user(client, user_id).await,
                None => NotificationApi::list(client).await,
            }
            .context("Failed to load notifications")?;
            notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            if ctx.json {
                return print_json(&notifications);
            }

            // Fetched separately from the list, so the two can differ briefly.
            let unread = NotificationApi::unread_count(client)
                .await
                .context("Failed to load unread count")?;
            println!("{unread} unread");

            let now = chrono::Utc::now();
            for n in &notifications {
                let marker = if n.read { ' ' } else { '*' };
                println!(
                    "{marker} {:<12} {:<8} {:<18} {}",
                    n.id,
                    n.kind,
                    relative_time(n.created_at, now),
                    n.title
                );
                println!("  {:<12} {}", "", n.message);
            }
            Ok(())
        }
        NotificationCommand::Read { id } => {
            NotificationApi::mark_read(client, &id)
                .await
                .context("Failed to mark notification as read")?;
            done(ctx, &format!("Marked {id} as read"))
        }
        NotificationCommand::Unread { id } => {
            let notification = NotificationApi::mark_unread(client, &id)
                .await
                .context("Failed to mark notification as unread")?;
            if ctx.json {
                return print_json(&notification);
            }
            done(ctx, &format!("Marked {id} as unread"))
        }
        NotificationCommand::ReadAll => {
            NotificationApi::mark_all_read(client)
                .await
                .context("Failed to mark notifications as read")?;
            done(ctx, "All notifications marked as read")
        }
        NotificationCommand::Open { id } => {
            let notification = require(
                NotificationApi::get(client, &id)
                    .await
                    .context("Failed to load notification")?,
                "Notification",
                &id,
            )?;
            let target = NotificationApi::open(client, &notification)
                .await
                .context("Failed to open notification")?;

            if ctx.json {
                return print_json(&serde_json::json!({ "actionUrl": target }));
            }
            println!("{}", notification.title);
            println!("{}", notification.message);
            if let Some(url) = target {
                println!("-> {url}");
            }
            Ok(())
        }
        NotificationCommand::Delete { id } => {
            NotificationApi::delete(client, &id)
                .await
                .context("Failed to delete notification")?;
            done(ctx, &format!("Deleted notification {id}"))
        }
    }
}

fn done(ctx: &Ctx, message: &str) -> Result<()> {
    if !ctx.json {
        println!("{message}");
    }
    Ok(())
}
