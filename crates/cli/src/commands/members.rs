use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct MembersArgs {
    #[command(subcommand)]
    command: MemberCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum MemberCommands {
    /// List project members
    List,
    /// Show one member
    Get {
        /// Member (user) ID
        id: String,
    },
}

pub async fn execute(args: MembersArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let (workspace, project) = ctx.scope()?;
    let members = ctx.client.members();

    match args.command {
        MemberCommands::List => {
            let items = members
                .list(workspace, project)
                .await
                .context("Failed to list members")?;
            ctx.renderer.render_list(&items)
        }
        MemberCommands::Get { id } => {
            let member = members
                .get(workspace, project, &id)
                .await
                .with_context(|| format!("Failed to get member {id}"))?;
            ctx.renderer.render_one(&member)
        }
    }
}
