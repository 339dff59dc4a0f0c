use serde::Serialize;

use super::{issue_path, project_path};
use crate::error::Result;
use crate::models::{Worklog, WorklogTotal};
use crate::pagination::Listing;
use crate::ApiClient;

/// Durations are whole minutes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorklogRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

pub struct Worklogs<'a> {
    client: &'a ApiClient,
}

impl<'a> Worklogs<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
    ) -> Result<Vec<Worklog>> {
        let path = format!("{}/worklogs/", issue_path(workspace, project_id, issue_id));
        let listing: Listing<Worklog> = self.client.get(&path).await?;
        Ok(listing.into_results())
    }

    pub async fn get(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        worklog_id: &str,
    ) -> Result<Worklog> {
        let path = format!(
            "{}/worklogs/{worklog_id}/",
            issue_path(workspace, project_id, issue_id)
        );
        self.client.get(&path).await
    }

    pub async fn create(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        request: &WorklogRequest,
    ) -> Result<Worklog> {
        let path = format!("{}/worklogs/", issue_path(workspace, project_id, issue_id));
        self.client.post(&path, request).await
    }

    pub async fn update(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        worklog_id: &str,
        request: &WorklogRequest,
    ) -> Result<Worklog> {
        let path = format!(
            "{}/worklogs/{worklog_id}/",
            issue_path(workspace, project_id, issue_id)
        );
        self.client.patch(&path, request).await
    }

    pub async fn delete(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        worklog_id: &str,
    ) -> Result<()> {
        let path = format!(
            "{}/worklogs/{worklog_id}/",
            issue_path(workspace, project_id, issue_id)
        );
        self.client.delete(&path).await
    }

    /// Per-issue totals, summed by the server.
    pub async fn total_time(&self, workspace: &str, project_id: &str) -> Result<Vec<WorklogTotal>> {
        let listing: Listing<WorklogTotal> = self
            .client
            .get(&format!("{}/total-worklogs/", project_path(workspace, project_id)))
            .await?;
        Ok(listing.into_results())
    }
}
