use anyhow::{Context, Result};
use clap::Subcommand;

use taskdeck_client::api::{AuthApi, CommentApi, UserApi};
use taskdeck_core::models::CreateComment;
use taskdeck_core::relations::comment_thread;

use super::{print_json, Ctx};

#[derive(Subcommand, Debug)]
pub enum CommentCommand {
    /// Comment on a task as the signed-in user
    Add {
        /// Task ID
        task_id: String,

        /// Comment text
        content: String,
    },

    /// List a task's comments, oldest first
    #[command(alias = "ls")]
    List {
        /// Task ID
        task_id: String,
    },

    /// Most recent comments across all tasks
    Recent {
        /// How many comments to show
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

pub async fn run(ctx: &Ctx, cmd: CommentCommand) -> Result<()> {
    match cmd {
        CommentCommand::Add { task_id, content } => {
            let author = AuthApi::current_user(&ctx.client)
                .context("Not signed in; run `taskdeck login` first")?;
            let input = CreateComment {
                task_id,
                author_id: author.id,
                content,
            };
            let comment = CommentApi::create(&ctx.client, &input)
                .await
                .context("Failed to add comment")?;
            if ctx.json {
                return print_json(&comment);
            }
            println!("Added comment {} to task {}", comment.id, comment.task_id);
            Ok(())
        }
        CommentCommand::List { task_id } => {
            let comments = CommentApi::list_by_task(&ctx.client, &task_id)
                .await
                .context("Failed to load comments")?;
            if ctx.json {
                return print_json(&comments);
            }
            let users = UserApi::list(&ctx.client)
                .await
                .context("Failed to load users")?;
            let thread = comment_thread(&comments, &users);
            if thread.is_empty() {
                println!("No comments");
            }
            for entry in thread {
                println!(
                    "{} ({}): {}",
                    entry.author_name(),
                    entry.comment.created_at.format("%Y-%m-%d %H:%M"),
                    entry.comment.content
                );
            }
            Ok(())
        }
        CommentCommand::Recent { limit } => {
            let comments = CommentApi::recent(&ctx.client, limit)
                .await
                .context("Failed to load recent comments")?;
            if ctx.json {
                return print_json(&comments);
            }
            for comment in &comments {
                println!(
                    "{:<12} task {:<12} {}",
                    comment.id, comment.task_id, comment.content
                );
            }
            Ok(())
        }
    }
}
