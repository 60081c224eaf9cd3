use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use taskdeck_client::api::{ProjectApi, TaskApi, UserApi};
use taskdeck_core::filters::{search, TaskFilter};
use taskdeck_core::models::{CreateProject, Project, ProjectStatus, Task, TaskStatus, User};
use taskdeck_core::relations::assignee_label;
use taskdeck_core::stats::{bucket_by_status, project_task_count};

use super::{print_json, require, selector, Ctx};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Free-text search over name and description
    #[arg(short, long)]
    search: Option<String>,

    /// Status filter
    #[arg(long, value_parser = ["all", "active", "inactive"])]
    status: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Create a project
    Create {
        /// Project name
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(long, default_value = "active", value_parser = ["active", "inactive"])]
        status: String,
    },

    /// Show a project with its tasks grouped by status
    Show {
        /// Project ID
        id: String,

        /// Free-text search over the project's tasks
        #[arg(short, long)]
        search: Option<String>,

        /// Task status filter
        #[arg(long, value_parser = ["all", "todo", "in-progress", "completed"])]
        status: Option<String>,
    },
}

pub async fn list(ctx: &Ctx, args: ListArgs) -> Result<()> {
    let projects = match selector::<ProjectStatus>(args.status.as_deref()) {
        Some(status) => ProjectApi::list_by_status(&ctx.client, &status).await,
        None => ProjectApi::list(&ctx.client).await,
    }
    .context("Failed to load projects")?;

    let projects: Vec<&Project> = match args.search.as_deref() {
        Some(term) => search(&projects, term),
        None => projects.iter().collect(),
    };

    if ctx.json {
        return print_json(&projects);
    }
    if projects.is_empty() {
        println!("No projects found");
        return Ok(());
    }

    let tasks = TaskApi::list(&ctx.client)
        .await
        .context("Failed to load tasks")?;
    for project in projects {
        println!(
            "{:<12} {:<8} {} ({} tasks)",
            project.id,
            project.status,
            project.name,
            project_task_count(&tasks, &project.id)
        );
    }
    Ok(())
}

pub async fn run(ctx: &Ctx, cmd: ProjectCommand) -> Result<()> {
    match cmd {
        ProjectCommand::Create {
            name,
            description,
            status,
        } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                bail!("Name is required");
            }
            let input = CreateProject {
                name,
                description,
                status: ProjectStatus::from(status),
            };
            let project = ProjectApi::create(&ctx.client, &input)
                .await
                .context("Failed to create project")?;
            if ctx.json {
                return print_json(&project);
            }
            println!("Created project {} ({})", project.id, project.name);
            Ok(())
        }
        ProjectCommand::Show { id, search, status } => {
            show(ctx, &id, search.unwrap_or_default(), selector(status.as_deref())).await
        }
    }
}

async fn show(
    ctx: &Ctx,
    id: &str,
    search: String,
    status: Option<TaskStatus>,
) -> Result<()> {
    let project = require(
        ProjectApi::get(&ctx.client, id)
            .await
            .context("Failed to load project")?,
        "Project",
        id,
    )?;
    let tasks = TaskApi::list_by_project(&ctx.client, id)
        .await
        .context("Failed to load project tasks")?;

    let filter = TaskFilter {
        search,
        status,
        ..TaskFilter::default()
    };
    let visible = filter.apply(&tasks);

    if ctx.json {
        return print_json(&serde_json::json!({ "project": project, "tasks": visible }));
    }

    let users = UserApi::list(&ctx.client)
        .await
        .context("Failed to load users")?;

    println!("{} [{}] {}", project.name, project.id, project.status);
    if !project.description.is_empty() {
        println!("{}", project.description);
    }

    let buckets = bucket_by_status(visible.iter().copied());
    print_bucket("To do", &buckets.todo, &users);
    print_bucket("In progress", &buckets.in_progress, &users);
    print_bucket("Completed", &buckets.completed, &users);
    Ok(())
}

fn print_bucket(title: &str, tasks: &[&Task], users: &[User]) {
    println!();
    println!("{title} ({})", tasks.len());
    for task in tasks {
        println!(
            "  {:<12} {:<7} {} ({})",
            task.id,
            task.priority,
            task.title,
            assignee_label(task, users)
        );
    }
}
