use serde::de::IgnoredAny;
use serde::Serialize;

use super::{project_path, IssueIds};
use crate::error::Result;
use crate::models::{Issue, Module};
use crate::pagination::Listing;
use crate::ApiClient;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ModuleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// backlog, planned, in-progress, paused, completed or cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
}

pub struct Modules<'a> {
    client: &'a ApiClient,
}

impl<'a> Modules<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn item_path(workspace: &str, project_id: &str, module_id: &str) -> String {
        format!("{}/modules/{module_id}/", project_path(workspace, project_id))
    }

    pub async fn list(&self, workspace: &str, project_id: &str) -> Result<Vec<Module>> {
        let listing: Listing<Module> = self
            .client
            .get(&format!("{}/modules/", project_path(workspace, project_id)))
            .await?;
        Ok(listing.into_results())
    }

    pub async fn get(&self, workspace: &str, project_id: &str, module_id: &str) -> Result<Module> {
        self.client
            .get(&Self::item_path(workspace, project_id, module_id))
            .await
    }

    pub async fn create(
        &self,
        workspace: &str,
        project_id: &str,
        request: &ModuleRequest,
    ) -> Result<Module> {
        self.client
            .post(
                &format!("{}/modules/", project_path(workspace, project_id)),
                request,
            )
            .await
    }

    pub async fn update(
        &self,
        workspace: &str,
        project_id: &str,
        module_id: &str,
        request: &ModuleRequest,
    ) -> Result<Module> {
        self.client
            .patch(&Self::item_path(workspace, project_id, module_id), request)
            .await
    }

    pub async fn delete(&self, workspace: &str, project_id: &str, module_id: &str) -> Result<()> {
        self.client
            .delete(&Self::item_path(workspace, project_id, module_id))
            .await
    }

    pub async fn list_issues(
        &self,
        workspace: &str,
        project_id: &str,
        module_id: &str,
    ) -> Result<Vec<Issue>> {
        let path = format!(
            "{}module-issues/",
            Self::item_path(workspace, project_id, module_id)
        );
        let listing: Listing<Issue> = self.client.get(&path).await?;
        Ok(listing.into_results())
    }

    pub async fn add_issues(
        &self,
        workspace: &str,
        project_id: &str,
        module_id: &str,
        issue_ids: &[String],
    ) -> Result<()> {
        let path = format!(
            "{}module-issues/",
            Self::item_path(workspace, project_id, module_id)
        );
        let _: IgnoredAny = self
            .client
            .post(&path, &IssueIds { issues: issue_ids })
            .await?;
        Ok(())
    }

    pub async fn remove_issue(
        &self,
        workspace: &str,
        project_id: &str,
        module_id: &str,
        issue_id: &str,
    ) -> Result<()> {
        self.client
            .delete(&format!(
                "{}module-issues/{issue_id}/",
                Self::item_path(workspace, project_id, module_id)
            ))
            .await
    }
}
