pub mod attachments;
pub mod auth;
pub mod comments;
pub mod cycles;
pub mod issues;
pub mod labels;
pub mod links;
pub mod members;
pub mod modules;
pub mod projects;
pub mod states;
pub mod worklogs;

use anyhow::{anyhow, Result};
use plane_api::ApiClient;
use plane_output::{OutputFormat, OutputRenderer};

/// Everything a resource command needs: the client, the renderer and the
/// workspace/project the invocation is scoped to.
pub struct CommandContext<'a> {
    pub client: ApiClient,
    pub renderer: &'a OutputRenderer,
    workspace: Option<String>,
    project: Option<String>,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        client: ApiClient,
        renderer: &'a OutputRenderer,
        workspace: Option<String>,
        project: Option<String>,
    ) -> Self {
        Self {
            client,
            renderer,
            workspace,
            project,
        }
    }

    pub fn workspace(&self) -> Result<&str> {
        self.workspace.as_deref().ok_or_else(|| {
            anyhow!("No workspace selected. Pass --workspace or set PLANE_WORKSPACE_SLUG")
        })
    }

    pub fn project(&self) -> Result<&str> {
        self.project
            .as_deref()
            .ok_or_else(|| anyhow!("No project selected. Pass --project or set PLANE_PROJECT_ID"))
    }

    /// Workspace and project together, for project-scoped commands.
    pub fn scope(&self) -> Result<(&str, &str)> {
        Ok((self.workspace()?, self.project()?))
    }

    /// Confirmation line for commands that return no record. Silent in quiet mode.
    pub fn done(&self, message: impl AsRef<str>) {
        if self.renderer.format() != OutputFormat::Quiet {
            println!("{}", message.as_ref());
        }
    }
}
