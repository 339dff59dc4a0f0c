use serde::Serialize;
use tracing::{debug, warn};

use super::issue_path;
use crate::error::{OperationContext, Result};
use crate::models::Comment;
use crate::pagination::Listing;
use crate::resolve::NameResolver;
use crate::ApiClient;

/// Comment body plus optional attribution.
///
/// `member_id` wins over `display_name`. With neither set the comment is
/// written as whoever owns the API key.
#[derive(Debug, Clone, Default)]
pub struct CommentRequest {
    pub comment_html: Option<String>,
    pub display_name: Option<String>,
    pub member_id: Option<String>,
}

impl CommentRequest {
    pub fn new(comment_html: impl Into<String>) -> Self {
        Self {
            comment_html: Some(comment_html.into()),
            ..Self::default()
        }
    }

    pub fn by_member(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

/// Create writes the author to `created_by`, patches write it to `actor`.
#[derive(Debug, Default, Serialize)]
struct CommentBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    comment_html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_by: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actor: Option<&'a str>,
}

pub struct Comments<'a> {
    client: &'a ApiClient,
}

impl<'a> Comments<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    async fn author(
        &self,
        workspace: &str,
        project_id: &str,
        request: &CommentRequest,
    ) -> Result<Option<String>> {
        if let Some(id) = &request.member_id {
            return Ok(Some(id.clone()));
        }
        match &request.display_name {
            Some(name) => NameResolver::new(self.client, workspace, project_id)
                .member_id(name)
                .await
                .map(Some),
            None => Ok(None),
        }
    }

    pub async fn list(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
    ) -> Result<Vec<Comment>> {
        let path = format!("{}/comments/", issue_path(workspace, project_id, issue_id));
        let listing: Listing<Comment> = self.client.get(&path).await?;
        Ok(listing.into_results())
    }

    pub async fn get(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        comment_id: &str,
    ) -> Result<Comment> {
        let path = format!(
            "{}/comments/{comment_id}/",
            issue_path(workspace, project_id, issue_id)
        );
        self.client.get(&path).await
    }

    /// Post a comment, attributing it to the requested member when one is given.
    ///
    /// Some servers ignore `created_by` on create. When the returned record
    /// names a different author, the comment is patched with `actor`; if that
    /// patch fails the original record is returned and a warning logged.
    pub async fn create(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        request: &CommentRequest,
    ) -> Result<Comment> {
        let author = self
            .author(workspace, project_id, request)
            .await
            .during(|| format!("creating comment on issue {issue_id}"))?;

        let body = CommentBody {
            comment_html: request.comment_html.as_deref(),
            created_by: author.as_deref(),
            ..CommentBody::default()
        };
        let path = format!("{}/comments/", issue_path(workspace, project_id, issue_id));
        let created: Comment = self.client.post(&path, &body).await?;

        let Some(author) = author else {
            return Ok(created);
        };
        if created.created_by.as_deref() == Some(author.as_str()) {
            return Ok(created);
        }

        debug!(comment = %created.id, author = %author, "Re-attributing comment");
        let correction = CommentBody {
            actor: Some(&author),
            ..CommentBody::default()
        };
        let item = format!("{path}{}/", created.id);
        match self.client.patch::<Comment, _>(&item, &correction).await {
            Ok(corrected) => Ok(corrected),
            Err(err) => {
                warn!(
                    comment = %created.id,
                    author = %author,
                    error = %err,
                    "Could not attribute comment, keeping server default"
                );
                Ok(created)
            }
        }
    }

    pub async fn update(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        comment_id: &str,
        request: &CommentRequest,
    ) -> Result<Comment> {
        let actor = self
            .author(workspace, project_id, request)
            .await
            .during(|| format!("updating comment {comment_id}"))?;

        let body = CommentBody {
            comment_html: request.comment_html.as_deref(),
            actor: actor.as_deref(),
            ..CommentBody::default()
        };
        let path = format!(
            "{}/comments/{comment_id}/",
            issue_path(workspace, project_id, issue_id)
        );
        self.client.patch(&path, &body).await
    }

    pub async fn delete(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        comment_id: &str,
    ) -> Result<()> {
        let path = format!(
            "{}/comments/{comment_id}/",
            issue_path(workspace, project_id, issue_id)
        );
        self.client.delete(&path).await
    }
}
