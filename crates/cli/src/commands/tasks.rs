use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use taskdeck_client::api::{CommentApi, ProjectApi, TaskApi, TaskCriteria, UserApi};
use taskdeck_core::filters::{is_overdue, search};
use taskdeck_core::models::{CreateTask, Priority, Task, TaskStatus, UpdateTask};
use taskdeck_core::relations::{assignee_label, comment_thread, project_label};

use super::{print_json, require, selector, Ctx};

const STATUSES: [&str; 4] = ["all", "todo", "in-progress", "completed"];
const PRIORITIES: [&str; 4] = ["all", "low", "medium", "high"];

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Free-text search over title and description
    #[arg(short, long)]
    search: Option<String>,

    /// Status filter
    #[arg(long, value_parser = STATUSES)]
    status: Option<String>,

    /// Priority filter
    #[arg(long, value_parser = PRIORITIES)]
    priority: Option<String>,

    /// Only tasks of this project
    #[arg(long)]
    project: Option<String>,

    /// Only tasks assigned to this user
    #[arg(long)]
    assignee: Option<String>,

    /// Only tasks past their due date and not completed
    #[arg(long)]
    overdue: bool,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Show a task with its comment thread
    Show {
        /// Task ID
        id: String,
    },

    /// Create a task
    Create {
        /// Task title
        title: String,

        /// Project the task belongs to
        #[arg(long)]
        project: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(long, default_value = "medium", value_parser = ["low", "medium", "high"])]
        priority: String,

        #[arg(long, default_value = "todo", value_parser = ["todo", "in-progress", "completed"])]
        status: String,

        /// Assignee user ID
        #[arg(long)]
        assignee: Option<String>,

        /// Due date (`YYYY-MM-DD`)
        #[arg(long)]
        due: Option<String>,
    },

    /// Change a task's fields. Only the given options are sent.
    Edit {
        /// Task ID
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long, value_parser = ["low", "medium", "high"])]
        priority: Option<String>,

        #[arg(long, value_parser = ["todo", "in-progress", "completed"])]
        status: Option<String>,

        /// Move the task to another project
        #[arg(long)]
        project: Option<String>,

        /// Assignee user ID
        #[arg(long)]
        assignee: Option<String>,

        /// Due date (`YYYY-MM-DD`)
        #[arg(long)]
        due: Option<String>,
    },

    /// Move a task to another status
    Status {
        /// Task ID
        id: String,

        /// New status
        #[arg(value_parser = ["todo", "in-progress", "completed"])]
        status: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub async fn list(ctx: &Ctx, args: ListArgs) -> Result<()> {
    let criteria = TaskCriteria {
        status: selector(args.status.as_deref()),
        priority: selector(args.priority.as_deref()),
        project_id: selector(args.project.as_deref()),
        assignee_id: selector(args.assignee.as_deref()),
        overdue: args.overdue,
    };

    let tasks = TaskApi::filter(&ctx.client, &criteria)
        .await
        .context("Failed to load tasks")?;
    let tasks: Vec<&Task> = match args.search.as_deref() {
        Some(term) => search(&tasks, term),
        None => tasks.iter().collect(),
    };

    if ctx.json {
        return print_json(&tasks);
    }
    if tasks.is_empty() {
        println!("No tasks found");
        return Ok(());
    }

    let users = UserApi::list(&ctx.client)
        .await
        .context("Failed to load users")?;
    let projects = ProjectApi::list(&ctx.client)
        .await
        .context("Failed to load projects")?;
    let now = chrono::Utc::now();

    for task in tasks {
        let flag = if is_overdue(task, now) { " OVERDUE" } else { "" };
        println!(
            "{:<12} {:<12} {:<7} {}{flag}",
            task.id, task.status, task.priority, task.title
        );
        println!(
            "{:<12} project: {}  assignee: {}  due: {}",
            "",
            project_label(task, &projects),
            assignee_label(task, &users),
            task.due_date.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

pub async fn run(ctx: &Ctx, cmd: TaskCommand) -> Result<()> {
    match cmd {
        TaskCommand::Show { id } => show(ctx, &id).await,
        TaskCommand::Create {
            title,
            project,
            description,
            priority,
            status,
            assignee,
            due,
        } => {
            let title = title.trim().to_string();
            if title.is_empty() {
                bail!("Title is required");
            }
            let input = CreateTask {
                title,
                description,
                status: TaskStatus::from(status),
                priority: Priority::from(priority),
                project_id: project,
                assignee_id: assignee.filter(|a| !a.trim().is_empty()),
                due_date: due.filter(|d| !d.trim().is_empty()),
            };
            let task = TaskApi::create(&ctx.client, &input)
                .await
                .context("Failed to create task")?;
            if ctx.json {
                return print_json(&task);
            }
            println!("Created task {} ({})", task.id, task.title);
            Ok(())
        }
        TaskCommand::Edit {
            id,
            title,
            description,
            priority,
            status,
            project,
            assignee,
            due,
        } => {
            let title = title.map(|t| t.trim().to_string());
            if title.as_deref() == Some("") {
                bail!("Title is required");
            }
            let changes = UpdateTask {
                title,
                description,
                status: status.map(TaskStatus::from),
                priority: priority.map(Priority::from),
                project_id: project,
                assignee_id: assignee,
                due_date: due,
            };
            if changes == UpdateTask::default() {
                bail!("Nothing to change");
            }
            let task = TaskApi::update(&ctx.client, &id, &changes)
                .await
                .context("Failed to update task")?;
            if ctx.json {
                return print_json(&task);
            }
            println!("Updated task {} ({})", task.id, task.title);
            Ok(())
        }
        TaskCommand::Status { id, status } => {
            let task = TaskApi::set_status(&ctx.client, &id, TaskStatus::from(status))
                .await
                .context("Failed to update task status")?;
            if ctx.json {
                return print_json(&task);
            }
            println!("Task \"{}\" moved to {}", task.title, task.status.label());
            Ok(())
        }
        TaskCommand::Delete { id } => {
            TaskApi::delete(&ctx.client, &id)
                .await
                .context("Failed to delete task")?;
            if !ctx.json {
                println!("Deleted task {id}");
            }
            Ok(())
        }
    }
}

async fn show(ctx: &Ctx, id: &str) -> Result<()> {
    let task = require(
        TaskApi::get(&ctx.client, id)
            .await
            .context("Failed to load task")?,
        "Task",
        id,
    )?;
    let comments = CommentApi::list_by_task(&ctx.client, id)
        .await
        .context("Failed to load comments")?;

    if ctx.json {
        return print_json(&serde_json::json!({ "task": task, "comments": comments }));
    }

    let users = UserApi::list(&ctx.client)
        .await
        .context("Failed to load users")?;
    let projects = ProjectApi::list(&ctx.client)
        .await
        .context("Failed to load projects")?;

    println!("{} [{}]", task.title, task.id);
    println!("  status:   {}", task.status.label());
    println!("  priority: {}", task.priority);
    println!("  project:  {}", project_label(&task, &projects));
    println!("  assignee: {}", assignee_label(&task, &users));
    println!("  due:      {}", task.due_date.as_deref().unwrap_or("-"));
    if !task.description.is_empty() {
        println!();
        println!("{}", task.description);
    }

    println!();
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
