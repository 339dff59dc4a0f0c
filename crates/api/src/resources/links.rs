use serde::Serialize;

use super::issue_path;
use crate::error::Result;
use crate::models::Link;
use crate::pagination::Listing;
use crate::ApiClient;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// External URLs attached to an issue.
pub struct Links<'a> {
    client: &'a ApiClient,
}

impl<'a> Links<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, workspace: &str, project_id: &str, issue_id: &str) -> Result<Vec<Link>> {
        let path = format!("{}/links/", issue_path(workspace, project_id, issue_id));
        let listing: Listing<Link> = self.client.get(&path).await?;
        Ok(listing.into_results())
    }

    pub async fn get(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        link_id: &str,
    ) -> Result<Link> {
        let path = format!("{}/links/{link_id}/", issue_path(workspace, project_id, issue_id));
        self.client.get(&path).await
    }

    pub async fn create(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        request: &LinkRequest,
    ) -> Result<Link> {
        let path = format!("{}/links/", issue_path(workspace, project_id, issue_id));
        self.client.post(&path, request).await
    }

    pub async fn update(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        link_id: &str,
        request: &LinkRequest,
    ) -> Result<Link> {
        let path = format!("{}/links/{link_id}/", issue_path(workspace, project_id, issue_id));
        self.client.patch(&path, request).await
    }

    pub async fn delete(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        link_id: &str,
    ) -> Result<()> {
        let path = format!("{}/links/{link_id}/", issue_path(workspace, project_id, issue_id));
        self.client.delete(&path).await
    }
}
