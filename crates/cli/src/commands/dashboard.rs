use anyhow::{Context, Result};
use serde::Serialize;

use taskdeck_client::api::{NotificationApi, ProjectApi, TaskApi};
use taskdeck_core::stats::{format_rate, DashboardSummary};

use super::{print_json, Ctx};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardView {
    #[serde(flatten)]
    summary: DashboardSummary,
    unread_notifications: u64,
}

pub async fn run(ctx: &Ctx) -> Result<()> {
    let projects = ProjectApi::list(&ctx.client)
        .await
        .context("Failed to load projects")?;
    let tasks = TaskApi::list(&ctx.client)
        .await
        .context("Failed to load tasks")?;
    let unread = NotificationApi::unread_count(&ctx.client)
        .await
        .context("Failed to load unread notifications")?;

    let summary = DashboardSummary::compute(&projects, &tasks);

    if ctx.json {
        return print_json(&DashboardView {
            summary,
            unread_notifications: unread,
        });
    }

    let stats = &summary.tasks;
    println!("Projects:        {}", summary.total_projects);
    println!("Tasks:           {}", stats.total);
    println!("  completed      {}", stats.completed);
    println!("  in progress    {}", stats.in_progress);
    println!("  pending        {}", stats.pending);
    println!("Completion rate: {}%", format_rate(stats.completion_rate));
    println!("Unread notifications: {unread}");

    if !summary.recent_projects.is_empty() {
        println!();
        println!("Recent projects:");
        for project in &summary.recent_projects {
            println!("  {:<12} {} [{}]", project.id, project.name, project.status);
        }
    }
    Ok(())
}
