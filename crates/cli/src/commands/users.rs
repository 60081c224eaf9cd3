use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use taskdeck_client::api::{AuthApi, TaskApi, UserApi};
use taskdeck_client::UserAdmin;
use taskdeck_core::filters::search;
use taskdeck_core::models::{CreateUser, Notification, Role, UpdateUser, User};
use taskdeck_core::permissions::{available_actions, UserAction};
use taskdeck_core::relations::initials;
use taskdeck_core::stats::{format_rate, user_task_stats, UserTaskStats};

use super::{print_json, require, selector, Ctx};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Free-text search over name and email
    #[arg(short, long)]
    search: Option<String>,

    /// Role filter
    #[arg(long, value_parser = ["all", "admin", "member"])]
    role: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a user
    Create {
        /// Display name
        name: String,

        /// Email address
        email: String,

        #[arg(long, default_value = "member", value_parser = ["admin", "member"])]
        role: String,

        /// Avatar URL
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Change a user's profile (admin only)
    Edit {
        /// User ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, value_parser = ["admin", "member"])]
        role: Option<String>,

        /// Avatar URL
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Switch a user between admin and member
    ToggleRole {
        /// User ID
        id: String,
    },

    /// Deactivate a user
    ToggleStatus {
        /// User ID
        id: String,
    },

    /// Send a message to a user
    Message {
        /// User ID
        id: String,
    },

    /// Send an invitation email to a user
    Invite {
        /// User ID
        id: String,
    },

    /// Delete a user
    Delete {
        /// User ID
        id: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DirectoryEntry<'a> {
    #[serde(flatten)]
    user: &'a User,
    initials: String,
    stats: UserTaskStats,
    actions: Vec<UserAction>,
}

pub async fn list(ctx: &Ctx, args: ListArgs) -> Result<()> {
    let users = match selector::<Role>(args.role.as_deref()) {
        Some(role) => UserApi::list_by_role(&ctx.client, &role).await,
        None => UserApi::list(&ctx.client).await,
    }
    .context("Failed to load users")?;
    let tasks = TaskApi::list(&ctx.client)
        .await
        .context("Failed to load tasks")?;
    let me = AuthApi::current_user(&ctx.client);

    let matching: Vec<&User> = match args.search.as_deref() {
        Some(term) => search(&users, term),
        None => users.iter().collect(),
    };
    let entries: Vec<DirectoryEntry<'_>> = matching
        .into_iter()
        .map(|user| DirectoryEntry {
            user,
            initials: initials(&user.name),
            stats: user_task_stats(&tasks, &user.id),
            actions: available_actions(me.as_ref(), user),
        })
        .collect();

    if ctx.json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("No users found");
        return Ok(());
    }

    for entry in entries {
        let user = entry.user;
        println!(
            "[{:>2}] {:<12} {:<24} {:<28} {}",
            entry.initials,
            user.id,
            user.name,
            user.email,
            user.role.label()
        );
        let actions: Vec<&str> = entry.actions.iter().map(|a| action_label(*a)).collect();
        println!(
            "     tasks {}/{} completed ({}%)  actions: {}",
            entry.stats.completed_tasks,
            entry.stats.total_tasks,
            format_rate(entry.stats.completion_rate),
            if actions.is_empty() { "-".to_string() } else { actions.join(", ") }
        );
    }
    Ok(())
}

pub async fn run(ctx: &Ctx, cmd: UserCommand) -> Result<()> {
    match cmd {
        UserCommand::Create {
            name,
            email,
            role,
            avatar,
        } => {
            let input = CreateUser {
                name,
                email,
                role: Role::from(role),
                avatar,
            };
            let user = UserApi::create(&ctx.client, &input)
                .await
                .context("Failed to create user")?;
            if ctx.json {
                return print_json(&user);
            }
            println!("Created user {} <{}> ({})", user.name, user.email, user.id);
            Ok(())
        }
        UserCommand::Edit {
            id,
            name,
            email,
            role,
            avatar,
        } => {
            let changes = UpdateUser {
                name: name.map(|n| n.trim().to_string()),
                email: email.map(|e| e.trim().to_lowercase()),
                role: role.map(Role::from),
                avatar,
            };
            if changes == UpdateUser::default() {
                bail!("Nothing to change");
            }
            let target = load(ctx, &id).await?;
            let updated = UserAdmin::edit_user(&ctx.client, &target, &changes)
                .await
                .context("Failed to update user")?;
            if ctx.json {
                return print_json(&updated);
            }
            println!("Updated user {} <{}>", updated.name, updated.email);
            Ok(())
        }
        UserCommand::ToggleRole { id } => {
            let target = load(ctx, &id).await?;
            let updated = UserAdmin::toggle_role(&ctx.client, &target)
                .await
                .context("Failed to update role")?;
            if ctx.json {
                return print_json(&updated);
            }
            println!("{} is now {}", updated.name, updated.role.label());
            Ok(())
        }
        UserCommand::ToggleStatus { id } => {
            let target = load(ctx, &id).await?;
            let notification = UserAdmin::toggle_status(&ctx.client, &target)
                .await
                .context("Failed to update user status")?;
            report(ctx, &notification)
        }
        UserCommand::Message { id } => {
            let target = load(ctx, &id).await?;
            let notification = UserAdmin::send_message(&ctx.client, &target)
                .await
                .context("Failed to send message")?;
            report(ctx, &notification)
        }
        UserCommand::Invite { id } => {
            let target = load(ctx, &id).await?;
            let notification = UserAdmin::send_invitation(&ctx.client, &target)
                .await
                .context("Failed to send invitation")?;
            report(ctx, &notification)
        }
        UserCommand::Delete { id } => {
            let target = load(ctx, &id).await?;
            let notification = UserAdmin::delete_user(&ctx.client, &target)
                .await
                .context("Failed to delete user")?;
            report(ctx, &notification)
        }
    }
}

async fn load(ctx: &Ctx, id: &str) -> Result<User> {
    let lookup = UserApi::get(&ctx.client, id)
        .await
        .context("Failed to load user")?;
    require(lookup, "User", id)
}

fn report(ctx: &Ctx, notification: &Notification) -> Result<()> {
    if ctx.json {
        return print_json(notification);
    }
    println!("{}: {}", notification.title, notification.message);
    Ok(())
}

fn action_label(action: UserAction) -> &'static str {
    match action {
        UserAction::SendMessage => "message",
        UserAction::SendInvitation => "invite",
        UserAction::ToggleRole => "toggle-role",
        UserAction::ToggleStatus => "toggle-status",
        UserAction::Edit => "edit",
        UserAction::Delete => "delete",
    }
}
