//! Issue attachments and the direct-to-storage upload flow.
//!
//! An upload takes three sequential calls: the API hands out single-use
//! storage credentials, the bytes are posted straight to object storage as a
//! multipart form, and the API is told the asset is in place. A failure at
//! any step ends the upload. Nothing is rolled back; unused credentials
//! expire on the server.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tracing::{debug, info};

use super::issue_path;
use crate::error::{ApiError, OperationContext, Result};
use crate::models::{Attachment, UploadCredentials, UploadData};
use crate::pagination::Listing;
use crate::{log_request, log_response, ApiClient};

const FILE_FIELD: &str = "file";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Body of the credentials request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: u64,
}

/// A file held in memory, ready to upload.
#[derive(Debug, Clone)]
pub struct AttachmentFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AttachmentFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Read a file from disk, naming it after the last path component.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ApiError::InvalidRequest(format!("{} has no file name", path.display()))
            })?;

        Ok(Self::new(file_name, bytes))
    }

    fn upload_request(&self) -> UploadRequest {
        UploadRequest {
            name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            size: self.bytes.len() as u64,
        }
    }
}

/// Best guess at a MIME type from the file extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("txt" | "log") => "text/plain",
        Some("md") => "text/markdown",
        Some("csv") => "text/csv",
        Some("html" | "htm") => "text/html",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        Some("gz") => "application/gzip",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

pub struct Attachments<'a> {
    client: &'a ApiClient,
}

impl<'a> Attachments<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn collection(workspace: &str, project_id: &str, issue_id: &str) -> String {
        format!(
            "{}/issue-attachments/",
            issue_path(workspace, project_id, issue_id)
        )
    }

    pub async fn list(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
    ) -> Result<Vec<Attachment>> {
        let listing: Listing<Attachment> = self
            .client
            .get(&Self::collection(workspace, project_id, issue_id))
            .await?;
        Ok(listing.into_results())
    }

    /// Step one: ask the API for a storage destination for this file.
    pub async fn upload_credentials(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        request: &UploadRequest,
    ) -> Result<UploadCredentials> {
        let path = format!(
            "{}get-upload-url/",
            Self::collection(workspace, project_id, issue_id)
        );
        self.client.post(&path, request).await
    }

    /// Step two: post the bytes to object storage.
    ///
    /// The credential fields go first, verbatim, then the file under `file`.
    /// Only 200, 201 and 204 count as success. The API key is never sent here.
    pub async fn upload_to_storage(&self, target: &UploadData, file: &AttachmentFile) -> Result<()> {
        let mut form = Form::new();
        for (key, value) in &target.fields {
            form = form.text(key.clone(), value.clone());
        }

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|err| {
                ApiError::InvalidRequest(format!(
                    "content type '{}': {err}",
                    file.content_type
                ))
            })?;
        form = form.part(FILE_FIELD, part);

        debug!(url = %target.url, file = %file.file_name, bytes = file.bytes.len(), "Uploading to storage");
        let storage = self.client.storage_client();
        let request = storage
            .post(&target.url)
            .multipart(form)
            .build()
            .map_err(ApiError::RequestFailed)?;

        // Multipart bodies are streamed, so the wire log shows headers only.
        let wire = self.client.debug_enabled();
        if wire {
            log_request(&request);
        }

        let response = storage
            .execute(request)
            .await
            .map_err(ApiError::RequestFailed)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .unwrap_or_default();

        if wire {
            log_response(status, &headers, &body);
        }

        if matches!(
            status,
            StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT
        ) {
            return Ok(());
        }

        Err(ApiError::UploadFailed {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    /// Step three: tell the API the asset has landed.
    ///
    /// Some servers answer with the updated record, others with 204 and no
    /// body; the latter comes back as `None`.
    pub async fn complete_upload(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        asset_id: &str,
    ) -> Result<Option<Attachment>> {
        let path = format!(
            "{}{asset_id}/",
            Self::collection(workspace, project_id, issue_id)
        );
        self.client
            .request(Method::PATCH, &path, Option::<&()>::None)
            .await
    }

    /// The record for an upload whose completion came back without a body.
    ///
    /// Prefers the attachment handed out with the credentials, otherwise
    /// finds the asset in the issue's attachment listing.
    async fn completed_record(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        credentials: &UploadCredentials,
    ) -> Result<Attachment> {
        if let Some(attachment) = &credentials.attachment {
            return Ok(Attachment {
                is_uploaded: true,
                ..attachment.clone()
            });
        }

        debug!(asset = %credentials.asset_id, "Completion had no body, listing attachments");
        self.list(workspace, project_id, issue_id)
            .await?
            .into_iter()
            .find(|attachment| attachment.id == credentials.asset_id)
            .ok_or_else(|| ApiError::NotFound {
                kind: "attachment",
                key: credentials.asset_id.clone(),
            })
    }

    /// Run all three steps for an in-memory file.
    pub async fn upload(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        file: &AttachmentFile,
    ) -> Result<Attachment> {
        let credentials = self
            .upload_credentials(workspace, project_id, issue_id, &file.upload_request())
            .await
            .during(|| format!("requesting upload credentials for {}", file.file_name))?;

        self.upload_to_storage(&credentials.upload_data, file)
            .await
            .during(|| format!("uploading {} to storage", file.file_name))?;

        let completed = self
            .complete_upload(workspace, project_id, issue_id, &credentials.asset_id)
            .await
            .during(|| format!("completing upload of asset {}", credentials.asset_id))?;

        let attachment = match completed {
            Some(attachment) => attachment,
            None => self
                .completed_record(workspace, project_id, issue_id, &credentials)
                .await
                .during(|| format!("fetching completed asset {}", credentials.asset_id))?,
        };

        info!(
            issue = %issue_id,
            asset = %attachment.id,
            file = %file.file_name,
            size = file.bytes.len(),
            "Attachment uploaded"
        );
        Ok(attachment)
    }

    /// Read `path` and upload it.
    pub async fn upload_file(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        path: impl AsRef<Path>,
    ) -> Result<Attachment> {
        let file = AttachmentFile::read(path).await?;
        self.upload(workspace, project_id, issue_id, &file).await
    }

    pub async fn delete(
        &self,
        workspace: &str,
        project_id: &str,
        issue_id: &str,
        asset_id: &str,
    ) -> Result<()> {
        let path = format!(
            "{}{asset_id}/",
            Self::collection(workspace, project_id, issue_id)
        );
        self.client.delete(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_type_guess() {
        assert_eq!(content_type_for("report.PDF"), "application/pdf");
        assert_eq!(content_type_for("shot.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("notes"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for("archive.tar.unknown"), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_upload_request_wire_shape() {
        let file = AttachmentFile::new("a.txt", vec![0; 100]);
        assert_eq!(
            serde_json::to_value(file.upload_request()).unwrap(),
            json!({"name": "a.txt", "type": "text/plain", "size": 100})
        );
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = std::env::temp_dir().join("plane-api-no-such-dir");
        let err = AttachmentFile::read(dir.join("missing.bin")).await.unwrap_err();
        assert!(matches!(err, ApiError::Io { .. }));
    }
}
