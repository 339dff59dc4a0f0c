use serde::Serialize;
use tracing::debug;

use super::{issue_path, project_path};
use crate::error::{ApiError, OperationContext, Result};
use crate::models::Issue;
use crate::pagination::{Listing, PageQuery, PagedResponse};
use crate::resolve::NameResolver;
use crate::ApiClient;

/// Fields for creating or patching an issue.
///
/// `state_name` and `assignee_names` never go on the wire; they are resolved
/// to IDs first, and only when the matching ID field is empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip)]
    pub state_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
    #[serde(skip)]
    pub assignee_names: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
}

impl IssueRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    fn needs_resolution(&self) -> bool {
        (self.state.is_none() && self.state_name.is_some())
            || (self.assignees.is_empty() && !self.assignee_names.is_empty())
    }

    /// Copy of the request with every name swapped for its ID.
    async fn resolved(&self, resolver: &NameResolver<'_>) -> Result<IssueRequest> {
        let mut request = self.clone();

        if request.state.is_none() {
            if let Some(name) = request.state_name.take() {
                request.state = Some(resolver.state_id(&name).await?);
            }
        }

        if request.assignees.is_empty() && !request.assignee_names.is_empty() {
            request.assignees = resolver.member_ids(&request.assignee_names).await?;
        }
        request.assignee_names.clear();

        Ok(request)
    }
}

pub struct Issues<'a> {
    client: &'a ApiClient,
}

impl<'a> Issues<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, workspace: &str, project_id: &str) -> Result<Vec<Issue>> {
        let listing: Listing<Issue> = self
            .client
            .get(&format!("{}/issues/", project_path(workspace, project_id)))
            .await?;
        Ok(listing.into_results())
    }

    /// Fetch exactly one page. Cursors are handed back, never followed.
    pub async fn list_page(
        &self,
        workspace: &str,
        project_id: &str,
        query: &PageQuery,
    ) -> Result<PagedResponse<Issue>> {
        let path = query.apply(&format!("{}/issues/", project_path(workspace, project_id)));
        self.client.get(&path).await
    }

    pub async fn get(&self, workspace: &str, project_id: &str, issue_id: &str) -> Result<Issue> {
        self.client
            .get(&format!("{}/", issue_path(workspace, project_id, issue_id)))
            .await
    }

    /// Look an issue up by its workspace-wide sequence identifier, e.g. `WEB-42`.
    pub async fn get_by_sequence_id(&self, workspace: &str, sequence_id: &str) -> Result<Issue> {
        self.client
            .get(&format!("/workspaces/{workspace}/issues/{sequence_id}/"))
            .await
    }

    pub async fn create(
        &self,
        workspace: &str,
        project_id: &str,
        request: &IssueRequest,
    ) -> Result<Issue> {
        if request.name.as_deref().map_or(true, str::is_empty) {
            return Err(ApiError::InvalidRequest(
                "an issue needs a name".to_string(),
            ));
        }

        let resolver = NameResolver::new(self.client, workspace, project_id);
        let body = request
            .resolved(&resolver)
            .await
            .during(|| format!("creating issue in project {project_id}"))?;

        self.client
            .post(&format!("{}/issues/", project_path(workspace, project_id)), &body)
            .await
    }

    pub async fn update(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        request: &IssueRequest,
    ) -> Result<Issue> {
        let resolver = NameResolver::new(self.client, workspace, project_id);
        let body = request
            .resolved(&resolver)
            .await
            .during(|| format!("updating issue {issue_id}"))?;

        self.client
            .patch(
                &format!("{}/", issue_path(workspace, project_id, issue_id)),
                &body,
            )
            .await
    }

    /// Patch an issue addressed by sequence identifier.
    ///
    /// Names are resolved against the issue's own project, so the issue is
    /// fetched first whenever the request carries names.
    pub async fn update_by_sequence_id(
        &self,
        workspace: &str,
        sequence_id: &str,
        request: &IssueRequest,
    ) -> Result<Issue> {
        let body = if request.needs_resolution() {
            let current = self
                .get_by_sequence_id(workspace, sequence_id)
                .await
                .during(|| format!("looking up issue {sequence_id}"))?;

            let project_id = current.project.ok_or_else(|| {
                ApiError::InvalidRequest(format!(
                    "issue {sequence_id} does not report its project"
                ))
            })?;
            debug!(sequence_id, project = %project_id, "Resolving names for issue");

            let resolver = NameResolver::new(self.client, workspace, &project_id);
            request
                .resolved(&resolver)
                .await
                .during(|| format!("updating issue {sequence_id}"))?
        } else {
            request.clone()
        };

        self.client
            .patch(
                &format!("/workspaces/{workspace}/issues/{sequence_id}/"),
                &body,
            )
            .await
    }

    pub async fn delete(&self, workspace: &str, project_id: &str, issue_id: &str) -> Result<()> {
        self.client
            .delete(&format!("{}/", issue_path(workspace, project_id, issue_id)))
            .await
    }
}
