use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use plane_api::CycleRequest;

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct CyclesArgs {
    #[command(subcommand)]
    command: CycleCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum CycleCommands {
    /// List cycles in the project
    List,
    /// Show one cycle
    Get { id: String },
    /// Create a cycle
    Create {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: CycleFields,
    },
    /// Update a cycle; omitted fields are left unchanged
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: CycleFields,
    },
    /// Delete a cycle
    Delete { id: String },
    /// List the issues in a cycle
    Issues { id: String },
    /// Add issues to a cycle in one call
    AddIssues {
        id: String,
        /// Issue IDs
        #[arg(required = true)]
        issues: Vec<String>,
    },
    /// Take one issue out of a cycle
    RemoveIssue { id: String, issue: String },
}

#[derive(Args, Debug, Clone)]
struct CycleFields {
    #[arg(long)]
    description: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    start_date: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    end_date: Option<String>,
}

impl CycleFields {
    fn into_request(self, name: Option<String>) -> CycleRequest {
        CycleRequest {
            name,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

pub async fn execute(args: CyclesArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let (workspace, project) = ctx.scope()?;
    let cycles = ctx.client.cycles();

    match args.command {
        CycleCommands::List => {
            let items = cycles
                .list(workspace, project)
                .await
                .context("Failed to list cycles")?;
            ctx.renderer.render_list(&items)
        }
        CycleCommands::Get { id } => {
            let cycle = cycles
                .get(workspace, project, &id)
                .await
                .with_context(|| format!("Failed to get cycle {id}"))?;
            ctx.renderer.render_one(&cycle)
        }
        CycleCommands::Create { name, fields } => {
            let cycle = cycles
                .create(workspace, project, &fields.into_request(Some(name)))
                .await
                .context("Failed to create cycle")?;
            ctx.renderer.render_one(&cycle)
        }
        CycleCommands::Update { id, name, fields } => {
            let cycle = cycles
                .update(workspace, project, &id, &fields.into_request(name))
                .await
                .with_context(|| format!("Failed to update cycle {id}"))?;
            ctx.renderer.render_one(&cycle)
        }
        CycleCommands::Delete { id } => {
            cycles
                .delete(workspace, project, &id)
                .await
                .with_context(|| format!("Failed to delete cycle {id}"))?;
            ctx.done(format!("Deleted cycle {id}"));
            Ok(())
        }
        CycleCommands::Issues { id } => {
            let items = cycles
                .list_issues(workspace, project, &id)
                .await
                .with_context(|| format!("Failed to list issues of cycle {id}"))?;
            ctx.renderer.render_list(&items)
        }
        CycleCommands::AddIssues { id, issues } => {
            cycles
                .add_issues(workspace, project, &id, &issues)
                .await
                .with_context(|| format!("Failed to add issues to cycle {id}"))?;
            ctx.done(format!("Added {} issue(s) to cycle {id}", issues.len()));
            Ok(())
        }
        CycleCommands::RemoveIssue { id, issue } => {
            cycles
                .remove_issue(workspace, project, &id, &issue)
                .await
                .with_context(|| format!("Failed to remove issue {issue} from cycle {id}"))?;
            ctx.done(format!("Removed issue {issue} from cycle {id}"));
            Ok(())
        }
    }
}
