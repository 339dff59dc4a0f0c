use super::project_path;
use crate::error::{ApiError, Result};
use crate::models::Member;
use crate::pagination::Listing;
use crate::ApiClient;

pub struct Members<'a> {
    client: &'a ApiClient,
}

impl<'a> Members<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, workspace: &str, project_id: &str) -> Result<Vec<Member>> {
        let listing: Listing<Member> = self
            .client
            .get(&format!("{}/members/", project_path(workspace, project_id)))
            .await?;
        Ok(listing.into_results())
    }

    /// The server has no single-member route, so this filters the full listing.
    pub async fn get(&self, workspace: &str, project_id: &str, member_id: &str) -> Result<Member> {
        self.list(workspace, project_id)
            .await?
            .into_iter()
            .find(|member| member.id == member_id)
            .ok_or_else(|| ApiError::NotFound {
                kind: "member",
                key: member_id.to_string(),
            })
    }
}
