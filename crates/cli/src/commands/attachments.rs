use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use plane_api::AttachmentFile;

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct AttachmentsArgs {
    #[command(subcommand)]
    command: AttachmentCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum AttachmentCommands {
    /// List files attached to an issue
    List { issue: String },
    /// Upload a file to an issue
    Upload {
        issue: String,
        /// File to upload
        path: PathBuf,
        /// Override the content type guessed from the extension
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Remove an attachment
    Delete {
        issue: String,
        /// Asset ID of the attachment
        id: String,
    },
}

pub async fn execute(args: AttachmentsArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let (workspace, project) = ctx.scope()?;
    let attachments = ctx.client.attachments();

    match args.command {
        AttachmentCommands::List { issue } => {
            let items = attachments
                .list(workspace, project, &issue)
                .await
                .with_context(|| format!("Failed to list attachments on issue {issue}"))?;
            ctx.renderer.render_list(&items)
        }
        AttachmentCommands::Upload {
            issue,
            path,
            content_type,
        } => {
            let mut file = AttachmentFile::read(&path).await?;
            if let Some(content_type) = content_type {
                file = file.with_content_type(content_type);
            }
            let attachment = attachments
                .upload(workspace, project, &issue, &file)
                .await
                .with_context(|| format!("Failed to upload {}", path.display()))?;
            ctx.renderer.render_one(&attachment)
        }
        AttachmentCommands::Delete { issue, id } => {
            attachments
                .delete(workspace, project, &issue, &id)
                .await
                .with_context(|| format!("Failed to delete attachment {id}"))?;
            ctx.done(format!("Deleted attachment {id}"));
            Ok(())
        }
    }
}
