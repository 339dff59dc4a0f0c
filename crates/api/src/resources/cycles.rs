use serde::Serialize;

use super::{project_path, IssueIds};
use crate::error::Result;
use crate::models::{Cycle, Issue};
use crate::pagination::Listing;
use crate::ApiClient;

/// Create or patch body; `None` fields are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

pub struct Cycles<'a> {
    client: &'a ApiClient,
}

impl<'a> Cycles<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn path(workspace: &str, project_id: &str) -> String {
        format!("{}/cycles/", project_path(workspace, project_id))
    }

    fn item_path(workspace: &str, project_id: &str, cycle_id: &str) -> String {
        format!("{}{cycle_id}/", Self::path(workspace, project_id))
    }

    pub async fn list(&self, workspace: &str, project_id: &str) -> Result<Vec<Cycle>> {
        let listing: Listing<Cycle> = self.client.get(&Self::path(workspace, project_id)).await?;
        Ok(listing.into_results())
    }

    pub async fn get(&self, workspace: &str, project_id: &str, cycle_id: &str) -> Result<Cycle> {
        self.client
            .get(&Self::item_path(workspace, project_id, cycle_id))
            .await
    }

    pub async fn create(
        &self,
        workspace: &str,
        project_id: &str,
        request: &CycleRequest,
    ) -> Result<Cycle> {
        self.client
            .post(&Self::path(workspace, project_id), request)
            .await
    }

    pub async fn update(
        &self,
        workspace: &str,
        project_id: &str,
        cycle_id: &str,
        request: &CycleRequest,
    ) -> Result<Cycle> {
        self.client
            .patch(&Self::item_path(workspace, project_id, cycle_id), request)
            .await
    }

    pub async fn delete(&self, workspace: &str, project_id: &str, cycle_id: &str) -> Result<()> {
        self.client
            .delete(&Self::item_path(workspace, project_id, cycle_id))
            .await
    }

    pub async fn list_issues(
        &self,
        workspace: &str,
        project_id: &str,
        cycle_id: &str,
    ) -> Result<Vec<Issue>> {
        let path = format!(
            "{}cycle-issues/",
            Self::item_path(workspace, project_id, cycle_id)
        );
        let listing: Listing<Issue> = self.client.get(&path).await?;
        Ok(listing.into_results())
    }

    /// Attach all `issue_ids` in one call. Whether repeats are harmless is up to the server.
    pub async fn add_issues(
        &self,
        workspace: &str,
        project_id: &str,
        cycle_id: &str,
        issue_ids: &[String],
    ) -> Result<()> {
        let path = format!(
            "{}cycle-issues/",
            Self::item_path(workspace, project_id, cycle_id)
        );
        let _: serde::de::IgnoredAny = self
            .client
            .post(&path, &IssueIds { issues: issue_ids })
            .await?;
        Ok(())
    }

    pub async fn remove_issue(
        &self,
        workspace: &str,
        project_id: &str,
        cycle_id: &str,
        issue_id: &str,
    ) -> Result<()> {
        self.client
            .delete(&format!(
                "{}cycle-issues/{issue_id}/",
                Self::item_path(workspace, project_id, cycle_id)
            ))
            .await
    }
}
