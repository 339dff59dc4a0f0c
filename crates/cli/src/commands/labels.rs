use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use plane_api::LabelRequest;

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct LabelsArgs {
    #[command(subcommand)]
    command: LabelCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum LabelCommands {
    List,
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Hex colour, e.g. #ff5a5f
        #[arg(long)]
        color: Option<String>,
        /// Parent label ID
        #[arg(long)]
        parent: Option<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        parent: Option<String>,
    },
    Delete {
        id: String,
    },
}

pub async fn execute(args: LabelsArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let (workspace, project) = ctx.scope()?;
    let labels = ctx.client.labels();

    match args.command {
        LabelCommands::List => {
            let items = labels
                .list(workspace, project)
                .await
                .context("Failed to list labels")?;
            ctx.renderer.render_list(&items)
        }
        LabelCommands::Get { id } => {
            let label = labels
                .get(workspace, project, &id)
                .await
                .with_context(|| format!("Failed to get label {id}"))?;
            ctx.renderer.render_one(&label)
        }
        LabelCommands::Create {
            name,
            description,
            color,
            parent,
        } => {
            let request = LabelRequest {
                name: Some(name),
                description,
                color,
                parent,
            };
            let label = labels
                .create(workspace, project, &request)
                .await
                .context("Failed to create label")?;
            ctx.renderer.render_one(&label)
        }
        LabelCommands::Update {
            id,
            name,
            description,
            color,
            parent,
        } => {
            let request = LabelRequest {
                name,
                description,
                color,
                parent,
            };
            let label = labels
                .update(workspace, project, &id, &request)
                .await
                .with_context(|| format!("Failed to update label {id}"))?;
            ctx.renderer.render_one(&label)
        }
        LabelCommands::Delete { id } => {
            labels
                .delete(workspace, project, &id)
                .await
                .with_context(|| format!("Failed to delete label {id}"))?;
            ctx.done(format!("Deleted label {id}"));
            Ok(())
        }
    }
}
