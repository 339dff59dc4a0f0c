use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use plane_api::{IssueRequest, PageQuery};

use super::CommandContext;

#[derive(Args, Debug, Clone)]
pub struct IssuesArgs {
    #[command(subcommand)]
    command: IssueCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum IssueCommands {
    /// List issues in the project
    List {
        /// Fetch a single page of this size instead of the default listing
        #[arg(long)]
        per_page: Option<u32>,
        /// Cursor from a previous page
        #[arg(long)]
        cursor: Option<String>,
    },
    /// Show one issue
    Get {
        /// Issue ID, or a sequence ID such as WEB-42 with --sequence
        id: String,
        /// Treat the ID as a workspace sequence ID
        #[arg(long)]
        sequence: bool,
    },
    /// Create an issue
    Create {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: IssueFields,
    },
    /// Update an issue; omitted fields are left unchanged
    Update {
        /// Issue ID, or a sequence ID such as WEB-42 with --sequence
        id: String,
        /// Treat the ID as a workspace sequence ID
        #[arg(long)]
        sequence: bool,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: IssueFields,
    },
    /// Delete an issue
    Delete {
        /// Issue ID
        id: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct IssueFields {
    /// Description as HTML
    #[arg(long)]
    description: Option<String>,
    /// State ID
    #[arg(long, conflicts_with = "state_name")]
    state: Option<String>,
    /// State name, resolved to its ID
    #[arg(long)]
    state_name: Option<String>,
    /// urgent, high, medium, low or none
    #[arg(long)]
    priority: Option<String>,
    /// Assignee member ID (repeatable)
    #[arg(long = "assignee")]
    assignees: Vec<String>,
    /// Assignee display name, resolved to its ID (repeatable)
    #[arg(long = "assignee-name")]
    assignee_names: Vec<String>,
    /// Label ID (repeatable)
    #[arg(long = "label")]
    labels: Vec<String>,
    /// Parent issue ID
    #[arg(long)]
    parent: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    start_date: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    target_date: Option<String>,
}

impl IssueFields {
    fn into_request(self, name: Option<String>) -> IssueRequest {
        IssueRequest {
            name,
            description_html: self.description,
            state: self.state,
            state_name: self.state_name,
            priority: self.priority,
            assignees: self.assignees,
            assignee_names: self.assignee_names,
            labels: self.labels,
            parent: self.parent,
            start_date: self.start_date,
            target_date: self.target_date,
        }
    }
}

pub async fn execute(args: IssuesArgs, ctx: &CommandContext<'_>) -> Result<()> {
    let issues = ctx.client.issues();

    match args.command {
        IssueCommands::List { per_page, cursor } => {
            let (workspace, project) = ctx.scope()?;
            if per_page.is_none() && cursor.is_none() {
                let items = issues
                    .list(workspace, project)
                    .await
                    .context("Failed to list issues")?;
                return ctx.renderer.render_list(&items);
            }

            let mut query = PageQuery::new();
            if let Some(per_page) = per_page {
                query = query.per_page(per_page);
            }
            if let Some(cursor) = cursor {
                query = query.cursor(cursor);
            }
            let page = issues
                .list_page(workspace, project, &query)
                .await
                .context("Failed to list issues")?;
            ctx.renderer.render_list(&page.results)?;
            if let Some(next) = page.next_cursor() {
                eprintln!("next page: --cursor {next}");
            }
            Ok(())
        }
        IssueCommands::Get { id, sequence } => {
            let workspace = ctx.workspace()?;
            let issue = if sequence {
                issues.get_by_sequence_id(workspace, &id).await
            } else {
                issues.get(workspace, ctx.project()?, &id).await
            }
            .with_context(|| format!("Failed to get issue {id}"))?;
            ctx.renderer.render_one(&issue)
        }
        IssueCommands::Create { name, fields } => {
            let (workspace, project) = ctx.scope()?;
            let request = fields.into_request(Some(name));
            let issue = issues
                .create(workspace, project, &request)
                .await
                .context("Failed to create issue")?;
            ctx.renderer.render_one(&issue)
        }
        IssueCommands::Update {
            id,
            sequence,
            name,
            fields,
        } => {
            let workspace = ctx.workspace()?;
            let request = fields.into_request(name);
            let issue = if sequence {
                issues.update_by_sequence_id(workspace, &id, &request).await
            } else {
                issues.update(workspace, ctx.project()?, &id, &request).await
            }
            .with_context(|| format!("Failed to update issue {id}"))?;
            ctx.renderer.render_one(&issue)
        }
        IssueCommands::Delete { id } => {
            let (workspace, project) = ctx.scope()?;
            issues
                .delete(workspace, project, &id)
                .await
                .with_context(|| format!("Failed to delete issue {id}"))?;
            ctx.done(format!("Deleted issue {id}"));
            Ok(())
        }
    }
}
