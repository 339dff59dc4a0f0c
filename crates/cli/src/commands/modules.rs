use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use plane_api::ModuleRequest;

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct ModulesArgs {
    #[command(subcommand)]
    command: ModuleCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum ModuleCommands {
    /// List modules in the project
    List,
    /// Show one module
    Get { id: String },
    /// Create a module
    Create {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: ModuleFields,
    },
    /// Update a module; omitted fields are left unchanged
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ModuleFields,
    },
    /// Delete a module
    Delete { id: String },
    /// List the issues in a module
    Issues { id: String },
    /// Add issues to a module in one call
    AddIssues {
        id: String,
        #[arg(required = true)]
        issues: Vec<String>,
    },
    /// Take one issue out of a module
    RemoveIssue { id: String, issue: String },
}

#[derive(Args, Debug, Clone)]
struct ModuleFields {
    #[arg(long)]
    description: Option<String>,
    /// backlog, planned, in-progress, paused, completed or cancelled
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    start_date: Option<String>,
    #[arg(long)]
    target_date: Option<String>,
}

impl ModuleFields {
    fn into_request(self, name: Option<String>) -> ModuleRequest {
        ModuleRequest {
            name,
            description: self.description,
            status: self.status,
            start_date: self.start_date,
            target_date: self.target_date,
        }
    }
}

pub async fn execute(args: ModulesArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let (workspace, project) = ctx.scope()?;
    let modules = ctx.client.modules();

    match args.command {
        ModuleCommands::List => {
            let items = modules
                .list(workspace, project)
                .await
                .context("Failed to list modules")?;
            ctx.renderer.render_list(&items)
        }
        ModuleCommands::Get { id } => {
            let module = modules
                .get(workspace, project, &id)
                .await
                .with_context(|| format!("Failed to get module {id}"))?;
            ctx.renderer.render_one(&module)
        }
        ModuleCommands::Create { name, fields } => {
            let module = modules
                .create(workspace, project, &fields.into_request(Some(name)))
                .await
                .context("Failed to create module")?;
            ctx.renderer.render_one(&module)
        }
        ModuleCommands::Update { id, name, fields } => {
            let module = modules
                .update(workspace, project, &id, &fields.into_request(name))
                .await
                .with_context(|| format!("Failed to update module {id}"))?;
            ctx.renderer.render_one(&module)
        }
        ModuleCommands::Delete { id } => {
            modules
                .delete(workspace, project, &id)
                .await
                .with_context(|| format!("Failed to delete module {id}"))?;
            ctx.done(format!("Deleted module {id}"));
            Ok(())
        }
        ModuleCommands::Issues { id } => {
            let items = modules
                .list_issues(workspace, project, &id)
                .await
                .with_context(|| format!("Failed to list issues of module {id}"))?;
            ctx.renderer.render_list(&items)
        }
        ModuleCommands::AddIssues { id, issues } => {
            modules
                .add_issues(workspace, project, &id, &issues)
                .await
                .with_context(|| format!("Failed to add issues to module {id}"))?;
            ctx.done(format!("Added {} issue(s) to module {id}", issues.len()));
            Ok(())
        }
        ModuleCommands::RemoveIssue { id, issue } => {
            modules
                .remove_issue(workspace, project, &id, &issue)
                .await
                .with_context(|| format!("Failed to remove issue {issue} from module {id}"))?;
            ctx.done(format!("Removed issue {issue} from module {id}"));
            Ok(())
        }
    }
}
