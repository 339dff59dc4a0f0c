use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use plane_api::{CreateProject, UpdateProject};

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    command: ProjectCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum ProjectCommands {
    /// List projects in the workspace
    List,
    /// Show one project
    Get {
        /// Project ID
        id: String,
    },
    /// Create a project
    Create {
        #[arg(long)]
        name: String,
        /// Short uppercase prefix for issue sequence IDs (e.g. WEB)
        #[arg(long)]
        identifier: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a project; omitted fields are left unchanged
    Update {
        /// Project ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a project
    Delete {
        /// Project ID
        id: String,
    },
}

pub async fn execute(args: ProjectsArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let workspace = ctx.workspace()?;
    let projects = ctx.client.projects();

    match args.command {
        ProjectCommands::List => {
            let items = projects
                .list(workspace)
                .await
                .context("Failed to list projects")?;
            ctx.renderer.render_list(&items)
        }
        ProjectCommands::Get { id } => {
            let project = projects
                .get(workspace, &id)
                .await
                .with_context(|| format!("Failed to get project {id}"))?;
            ctx.renderer.render_one(&project)
        }
        ProjectCommands::Create {
            name,
            identifier,
            description,
        } => {
            let request = CreateProject {
                name,
                identifier,
                description,
            };
            let project = projects
                .create(workspace, &request)
                .await
                .context("Failed to create project")?;
            ctx.renderer.render_one(&project)
        }
        ProjectCommands::Update {
            id,
            name,
            description,
        } => {
            let request = UpdateProject { name, description };
            let project = projects
                .update(workspace, &id, &request)
                .await
                .with_context(|| format!("Failed to update project {id}"))?;
            ctx.renderer.render_one(&project)
        }
        ProjectCommands::Delete { id } => {
            projects
                .delete(workspace, &id)
                .await
                .with_context(|| format!("Failed to delete project {id}"))?;
            ctx.done(format!("Deleted project {id}"));
            Ok(())
        }
    }
}
