use serde::Serialize;

use crate::error::Result;
use crate::models::Project;
use crate::pagination::Listing;
use crate::ApiClient;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateProject {
    pub name: String,
    /// Short uppercase prefix used in sequence IDs, e.g. `WEB` for `WEB-42`.
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields left as `None` are not sent and keep their current value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub struct Projects<'a> {
    client: &'a ApiClient,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, workspace: &str) -> Result<Vec<Project>> {
        let listing: Listing<Project> = self
            .client
            .get(&format!("/workspaces/{workspace}/projects/"))
            .await?;
        Ok(listing.into_results())
    }

    pub async fn get(&self, workspace: &str, project_id: &str) -> Result<Project> {
        self.client
            .get(&format!("/workspaces/{workspace}/projects/{project_id}/"))
            .await
    }

    pub async fn create(&self, workspace: &str, request: &CreateProject) -> Result<Project> {
        self.client
            .post(&format!("/workspaces/{workspace}/projects/"), request)
            .await
    }

    pub async fn update(
        &self,
        workspace: &str,
        project_id: &str,
        request: &UpdateProject,
    ) -> Result<Project> {
        self.client
            .patch(
                &format!("/workspaces/{workspace}/projects/{project_id}/"),
                request,
            )
            .await
    }

    pub async fn delete(&self, workspace: &str, project_id: &str) -> Result<()> {
        self.client
            .delete(&format!("/workspaces/{workspace}/projects/{project_id}/"))
            .await
    }
}
