use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use plane_api::StateRequest;

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct StatesArgs {
    #[command(subcommand)]
    command: StateCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum StateCommands {
    /// List workflow states of the project
    List,
    /// Show one state
    Get { id: String },
    /// Create a state
    Create {
        #[arg(long)]
        name: String,
        /// Hex colour, e.g. #3a3a3a
        #[arg(long)]
        color: String,
        #[arg(long)]
        description: Option<String>,
        /// backlog, unstarted, started, completed or cancelled
        #[arg(long)]
        group: Option<String>,
    },
    /// Update a state; omitted fields are left unchanged
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        group: Option<String>,
    },
    /// Delete a state
    Delete { id: String },
}

pub async fn execute(args: StatesArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let (workspace, project) = ctx.scope()?;
    let states = ctx.client.states();

    match args.command {
        StateCommands::List => {
            let items = states
                .list(workspace, project)
                .await
                .context("Failed to list states")?;
            ctx.renderer.render_list(&items)
        }
        StateCommands::Get { id } => {
            let state = states
                .get(workspace, project, &id)
                .await
                .with_context(|| format!("Failed to get state {id}"))?;
            ctx.renderer.render_one(&state)
        }
        StateCommands::Create {
            name,
            color,
            description,
            group,
        } => {
            let request = StateRequest {
                name: Some(name),
                color: Some(color),
                description,
                group,
            };
            let state = states
                .create(workspace, project, &request)
                .await
                .context("Failed to create state")?;
            ctx.renderer.render_one(&state)
        }
        StateCommands::Update {
            id,
            name,
            color,
            description,
            group,
        } => {
            let request = StateRequest {
                name,
                color,
                description,
                group,
            };
            let state = states
                .update(workspace, project, &id, &request)
                .await
                .with_context(|| format!("Failed to update state {id}"))?;
            ctx.renderer.render_one(&state)
        }
        StateCommands::Delete { id } => {
            states
                .delete(workspace, project, &id)
                .await
                .with_context(|| format!("Failed to delete state {id}"))?;
            ctx.done(format!("Deleted state {id}"));
            Ok(())
        }
    }
}
