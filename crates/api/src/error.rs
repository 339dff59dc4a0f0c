use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error {status} on {path}{}", detail(.message))]
    Api {
        status: u16,
        path: String,
        message: Option<String>,
    },

    #[error("Invalid response format from {path}: {source}")]
    InvalidResponse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} '{key}' not found")]
    NotFound { kind: &'static str, key: String },

    #[error("{count} {kind} records are named '{name}'")]
    AmbiguousName {
        kind: &'static str,
        name: String,
        count: usize,
    },

    #[error("Storage upload failed with status {status}: {body}")]
    UploadFailed { status: u16, body: String },

    #[error("Unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{operation}: {source}")]
    Context {
        operation: String,
        #[source]
        source: Box<ApiError>,
    },
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}

/// Error document the API returns alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorEnvelope {
    /// Only a JSON object is an envelope. Derived struct impls would also
    /// accept a positional array such as `["Invalid uuid"]`.
    fn parse(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(body).ok()? {
            object @ Value::Object(_) => serde_json::from_value(object).ok(),
            _ => None,
        }
    }
}

impl ApiError {
    /// Classify a non-2xx response body.
    ///
    /// Prefers the envelope's `error` field, then `message`, then the raw body.
    pub(crate) fn from_response(status: u16, path: impl Into<String>, body: &[u8]) -> Self {
        let raw = String::from_utf8_lossy(body).into_owned();
        let message = ErrorEnvelope::parse(body)
            .and_then(|envelope| {
                envelope
                    .error
                    .filter(|e| !e.is_empty())
                    .or(envelope.message.filter(|m| !m.is_empty()))
            })
            .unwrap_or(raw);

        ApiError::Api {
            status,
            path: path.into(),
            message: Some(message),
        }
    }

    /// Wrap the error with the operation that produced it.
    pub fn during(self, operation: impl Into<String>) -> Self {
        ApiError::Context {
            operation: operation.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with any operation context peeled off.
    pub fn root(&self) -> &ApiError {
        let mut current = self;
        while let ApiError::Context { source, .. } = current {
            current = source;
        }
        current
    }

    pub fn status(&self) -> Option<u16> {
        match self.root() {
            ApiError::Api { status, .. } | ApiError::UploadFailed { status, .. } => Some(*status),
            ApiError::RequestFailed(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for lookups that missed, whether by name, by id or by a 404 from the API.
    pub fn is_not_found(&self) -> bool {
        match self.root() {
            ApiError::NotFound { .. } => true,
            ApiError::Api { status, .. } => *status == 404,
            _ => false,
        }
    }

    /// Message extracted from an API error response, if any.
    pub fn api_message(&self) -> Option<&str> {
        match self.root() {
            ApiError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self.root() {
            ApiError::Api { status: 401, .. } | ApiError::Api { status: 403, .. } => {
                Some("Verify your API key using: plane auth login")
            }
            ApiError::Api { status: 404, .. } => Some("Check the workspace slug and resource IDs"),
            ApiError::NotFound { .. } => Some("Check the spelling and case of the name or ID"),
            ApiError::AmbiguousName { .. } => Some("Pass the ID instead of the name"),
            ApiError::UploadFailed { .. } => {
                Some("The upload credentials may have expired; request new ones")
            }
            ApiError::RequestFailed(_) => Some("Check your network connection and base URL"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Attach operation context to a failing result.
pub trait OperationContext<T> {
    fn during<F, S>(self, operation: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> OperationContext<T> for Result<T> {
    fn during<F, S>(self, operation: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|err| err.during(operation()))
    }
}
