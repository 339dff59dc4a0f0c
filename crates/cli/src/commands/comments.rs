use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use plane_api::CommentRequest;

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct CommentsArgs {
    #[command(subcommand)]
    command: CommentCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum CommentCommands {
    /// List comments on an issue
    List { issue: String },
    /// Show one comment
    Get { issue: String, id: String },
    /// Comment on an issue
    Create {
        issue: String,
        /// Comment body as HTML
        #[arg(long)]
        html: String,
        #[command(flatten)]
        author: Author,
    },
    /// Edit a comment
    Update {
        issue: String,
        id: String,
        #[arg(long)]
        html: Option<String>,
        #[command(flatten)]
        author: Author,
    },
    /// Delete a comment
    Delete { issue: String, id: String },
}

#[derive(Args, Debug, Clone)]
struct Author {
    /// Attribute the comment to the member with this display name
    #[arg(long = "as", value_name = "DISPLAY_NAME")]
    display_name: Option<String>,
    /// Attribute the comment to this member ID
    #[arg(long, conflicts_with = "display_name")]
    member_id: Option<String>,
}

impl Author {
    fn into_request(self, comment_html: Option<String>) -> CommentRequest {
        CommentRequest {
            comment_html,
            display_name: self.display_name,
            member_id: self.member_id,
        }
    }
}

pub async fn execute(args: CommentsArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let (workspace, project) = ctx.scope()?;
    let comments = ctx.client.comments();

    match args.command {
        CommentCommands::List { issue } => {
            let items = comments
                .list(workspace, project, &issue)
                .await
                .with_context(|| format!("Failed to list comments on issue {issue}"))?;
            ctx.renderer.render_list(&items)
        }
        CommentCommands::Get { issue, id } => {
            let comment = comments
                .get(workspace, project, &issue, &id)
                .await
                .with_context(|| format!("Failed to get comment {id}"))?;
            ctx.renderer.render_one(&comment)
        }
        CommentCommands::Create {
            issue,
            html,
            author,
        } => {
            let comment = comments
                .create(workspace, project, &issue, &author.into_request(Some(html)))
                .await
                .with_context(|| format!("Failed to comment on issue {issue}"))?;
            ctx.renderer.render_one(&comment)
        }
        CommentCommands::Update {
            issue,
            id,
            html,
            author,
        } => {
            let comment = comments
                .update(workspace, project, &issue, &id, &author.into_request(html))
                .await
                .with_context(|| format!("Failed to update comment {id}"))?;
            ctx.renderer.render_one(&comment)
        }
        CommentCommands::Delete { issue, id } => {
            comments
                .delete(workspace, project, &issue, &id)
                .await
                .with_context(|| format!("Failed to delete comment {id}"))?;
            ctx.done(format!("Deleted comment {id}"));
            Ok(())
        }
    }
}
