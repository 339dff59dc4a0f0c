use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use plane_api::WorklogRequest;

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct WorklogsArgs {
    #[command(subcommand)]
    command: WorklogCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum WorklogCommands {
    /// List time entries on an issue
    List { issue: String },
    /// Show one time entry
    Get { issue: String, id: String },
    /// Log time against an issue
    Create {
        issue: String,
        /// Minutes spent
        #[arg(long)]
        minutes: i64,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit a time entry
    Update {
        issue: String,
        id: String,
        #[arg(long)]
        minutes: Option<i64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a time entry
    Delete { issue: String, id: String },
    /// Total minutes per issue across the project
    Total,
}

pub async fn execute(args: WorklogsArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let (workspace, project) = ctx.scope()?;
    let worklogs = ctx.client.worklogs();

    match args.command {
        WorklogCommands::List { issue } => {
            let items = worklogs
                .list(workspace, project, &issue)
                .await
                .with_context(|| format!("Failed to list worklogs on issue {issue}"))?;
            ctx.renderer.render_list(&items)
        }
        WorklogCommands::Get { issue, id } => {
            let worklog = worklogs
                .get(workspace, project, &issue, &id)
                .await
                .with_context(|| format!("Failed to get worklog {id}"))?;
            ctx.renderer.render_one(&worklog)
        }
        WorklogCommands::Create {
            issue,
            minutes,
            description,
        } => {
            let request = WorklogRequest {
                description,
                duration: Some(minutes),
            };
            let worklog = worklogs
                .create(workspace, project, &issue, &request)
                .await
                .with_context(|| format!("Failed to log time on issue {issue}"))?;
            ctx.renderer.render_one(&worklog)
        }
        WorklogCommands::Update {
            issue,
            id,
            minutes,
            description,
        } => {
            let request = WorklogRequest {
                description,
                duration: minutes,
            };
            let worklog = worklogs
                .update(workspace, project, &issue, &id, &request)
                .await
                .with_context(|| format!("Failed to update worklog {id}"))?;
            ctx.renderer.render_one(&worklog)
        }
        WorklogCommands::Delete { issue, id } => {
            worklogs
                .delete(workspace, project, &issue, &id)
                .await
                .with_context(|| format!("Failed to delete worklog {id}"))?;
            ctx.done(format!("Deleted worklog {id}"));
            Ok(())
        }
        WorklogCommands::Total => {
            let totals = worklogs
                .total_time(workspace, project)
                .await
                .context("Failed to fetch worklog totals")?;
            ctx.renderer.render_list(&totals)
        }
    }
}
