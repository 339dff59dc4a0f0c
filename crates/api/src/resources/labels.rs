use serde::Serialize;

use super::project_path;
use crate::error::Result;
use crate::models::Label;
use crate::pagination::Listing;
use crate::ApiClient;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LabelRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hex colour, e.g. `#ff5a5f`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

pub struct Labels<'a> {
    client: &'a ApiClient,
}

impl<'a> Labels<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, workspace: &str, project_id: &str) -> Result<Vec<Label>> {
        let listing: Listing<Label> = self
            .client
            .get(&format!("{}/labels/", project_path(workspace, project_id)))
            .await?;
        Ok(listing.into_results())
    }

    pub async fn get(&self, workspace: &str, project_id: &str, label_id: &str) -> Result<Label> {
        self.client
            .get(&format!(
                "{}/labels/{label_id}/",
                project_path(workspace, project_id)
            ))
            .await
    }

    pub async fn create(
        &self,
        workspace: &str,
        project_id: &str,
        request: &LabelRequest,
    ) -> Result<Label> {
        self.client
            .post(
                &format!("{}/labels/", project_path(workspace, project_id)),
                request,
            )
            .await
    }

    pub async fn update(
        &self,
        workspace: &str,
        project_id: &str,
        label_id: &str,
        request: &LabelRequest,
    ) -> Result<Label> {
        self.client
            .patch(
                &format!(
                    "{}/labels/{label_id}/",
                    project_path(workspace, project_id)
                ),
                request,
            )
            .await
    }

    pub async fn delete(&self, workspace: &str, project_id: &str, label_id: &str) -> Result<()> {
        self.client
            .delete(&format!(
                "{}/labels/{label_id}/",
                project_path(workspace, project_id)
            ))
            .await
    }
}
