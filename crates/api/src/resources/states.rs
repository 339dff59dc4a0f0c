use serde::Serialize;

use super::project_path;
use crate::error::Result;
use crate::models::State;
use crate::pagination::Listing;
use crate::ApiClient;

#[derive(Debug, Clone, Default, Serialize)]
pub struct StateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

pub struct States<'a> {
    client: &'a ApiClient,
}

impl<'a> States<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn collection(workspace: &str, project_id: &str) -> String {
        format!("{}/states/", project_path(workspace, project_id))
    }

    pub async fn list(&self, workspace: &str, project_id: &str) -> Result<Vec<State>> {
        let listing: Listing<State> = self
            .client
            .get(&Self::collection(workspace, project_id))
            .await?;
        Ok(listing.into_results())
    }

    pub async fn get(&self, workspace: &str, project_id: &str, state_id: &str) -> Result<State> {
        self.client
            .get(&format!("{}{state_id}/", Self::collection(workspace, project_id)))
            .await
    }

    pub async fn create(
        &self,
        workspace: &str,
        project_id: &str,
        request: &StateRequest,
    ) -> Result<State> {
        self.client
            .post(&Self::collection(workspace, project_id), request)
            .await
    }

    pub async fn update(
        &self,
        workspace: &str,
        project_id: &str,
        state_id: &str,
        request: &StateRequest,
    ) -> Result<State> {
        self.client
            .patch(
                &format!("{}{state_id}/", Self::collection(workspace, project_id)),
                request,
            )
            .await
    }

    pub async fn delete(&self, workspace: &str, project_id: &str, state_id: &str) -> Result<()> {
        self.client
            .delete(&format!("{}{state_id}/", Self::collection(workspace, project_id)))
            .await
    }
}
