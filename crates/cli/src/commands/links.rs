use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use plane_api::LinkRequest;

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct LinksArgs {
    #[command(subcommand)]
    command: LinkCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum LinkCommands {
    List {
        issue: String,
    },
    Get {
        issue: String,
        id: String,
    },
    Create {
        issue: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        title: Option<String>,
    },
    Update {
        issue: String,
        id: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        title: Option<String>,
    },
    Delete {
        issue: String,
        id: String,
    },
}

pub async fn execute(args: LinksArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let (workspace, project) = ctx.scope()?;
    let links = ctx.client.links();

    match args.command {
        LinkCommands::List { issue } => {
            let items = links
                .list(workspace, project, &issue)
                .await
                .with_context(|| format!("Failed to list links on issue {issue}"))?;
            ctx.renderer.render_list(&items)
        }
        LinkCommands::Get { issue, id } => {
            let link = links
                .get(workspace, project, &issue, &id)
                .await
                .with_context(|| format!("Failed to get link {id}"))?;
            ctx.renderer.render_one(&link)
        }
        LinkCommands::Create { issue, url, title } => {
            let request = LinkRequest {
                title,
                url: Some(url),
            };
            let link = links
                .create(workspace, project, &issue, &request)
                .await
                .with_context(|| format!("Failed to link issue {issue}"))?;
            ctx.renderer.render_one(&link)
        }
        LinkCommands::Update {
            issue,
            id,
            url,
            title,
        } => {
            let link = links
                .update(workspace, project, &issue, &id, &LinkRequest { title, url })
                .await
                .with_context(|| format!("Failed to update link {id}"))?;
            ctx.renderer.render_one(&link)
        }
        LinkCommands::Delete { issue, id } => {
            links
                .delete(workspace, project, &issue, &id)
                .await
                .with_context(|| format!("Failed to delete link {id}"))?;
            ctx.done(format!("Deleted link {id}"));
            Ok(())
        }
    }
}
