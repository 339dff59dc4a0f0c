//! Async client for the Plane project-management REST API.
//!
//! [`ApiClient`] owns the transport: it builds requests against the
//! configured base URL, attaches the API key, and classifies responses into
//! [`ApiError`]s. Resource endpoints hang off it as borrowed views, e.g.
//! `client.issues().list("acme", project_id)`.

pub mod error;
pub mod models;
pub mod pagination;
pub mod resolve;
pub mod resources;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Request, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

pub use error::{ApiError, OperationContext, Result};
pub use pagination::{Listing, PageQuery, PagedResponse};
pub use resolve::NameResolver;
pub use resources::{
    AttachmentFile, CommentRequest, CreateProject, CycleRequest, IssueRequest, LabelRequest,
    LinkRequest, ModuleRequest, StateRequest, UpdateProject, UploadRequest, WorklogRequest,
};

pub const DEFAULT_BASE_URL: &str = "https://api.plane.so/api/v1";
pub const API_KEY_HEADER: &str = "X-API-Key";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const WIRE_TARGET: &str = "plane_api::wire";

/// Status, headers and decoded body of a completed round trip.
#[derive(Debug)]
pub struct Exchange<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: T,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    storage: Client,
    base_url: Url,
    api_key: String,
    debug: Arc<AtomicBool>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("debug", &self.debug_enabled())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = normalize_base_url(base_url.as_ref())?;

        Ok(Self {
            client: build_http_client(DEFAULT_TIMEOUT)?,
            storage: build_http_client(DEFAULT_TIMEOUT)?,
            base_url,
            api_key: String::new(),
            debug: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Client for the hosted service at [`DEFAULT_BASE_URL`].
    pub fn plane(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::new(DEFAULT_BASE_URL)?.with_api_key(api_key))
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Per-request deadline for both the API host and the storage leg.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = build_http_client(timeout)?;
        self.storage = build_http_client(timeout)?;
        Ok(self)
    }

    pub fn with_debug(self, debug: bool) -> Self {
        self.set_debug(debug);
        self
    }

    /// Toggle wire logging. Safe while requests are in flight; clones share the flag.
    pub fn set_debug(&self, debug: bool) {
        self.debug.store(debug, Ordering::SeqCst);
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.load(Ordering::SeqCst)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, Option::<&()>::None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// Delete a resource, discarding whatever body the server sends back.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let _: IgnoredAny = self
            .request(Method::DELETE, path, Option::<&()>::None)
            .await?;
        Ok(())
    }

    pub async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let request = self.build_request(method, path, body)?;
        Ok(self.execute(request).await?.body)
    }

    /// Build a request for `path` beneath the base URL.
    ///
    /// A body is serialized as JSON and marks the request as JSON content.
    /// Every request accepts JSON and carries the API key.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Request> {
        let url = self.endpoint(path)?;

        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key);

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(ApiError::Serialization)?;
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(payload);
        }

        builder
            .build()
            .map_err(|err| ApiError::InvalidRequest(err.to_string()))
    }

    /// Send a request and decode a 2xx body as JSON.
    ///
    /// An empty body decodes as JSON `null`, so `()`, `Option<_>` and
    /// [`IgnoredAny`] destinations accept endpoints that return no content.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<Exchange<T>> {
        let exchange = self.round_trip(request).await?;
        let body = decode_json(&exchange.path, &exchange.body)?;

        Ok(Exchange {
            status: exchange.status,
            headers: exchange.headers,
            body,
        })
    }

    /// Send a request and hand back the 2xx body verbatim.
    pub async fn execute_raw(&self, request: Request) -> Result<Exchange<Vec<u8>>> {
        let exchange = self.round_trip(request).await?;

        Ok(Exchange {
            status: exchange.status,
            headers: exchange.headers,
            body: exchange.body,
        })
    }

    pub(crate) fn storage_client(&self) -> &Client {
        &self.storage
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.strip_prefix('/').unwrap_or(path))
            .map_err(ApiError::InvalidUrl)
    }

    async fn round_trip(&self, request: Request) -> Result<RawExchange> {
        let path = request.url().path().to_string();
        let wire = self.debug_enabled();

        debug!(method = %request.method(), url = %request.url(), "Sending request");
        if wire {
            log_request(&request);
        }

        let response = self
            .client
            .execute(request)
            .await
            .map_err(ApiError::RequestFailed)?;

        let status = response.status();
        let headers = response.headers().clone();

        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(_) if !status.is_success() => {
                return Err(ApiError::Api {
                    status: status.as_u16(),
                    path,
                    message: None,
                });
            }
            Err(err) => return Err(ApiError::RequestFailed(err)),
        };

        if wire {
            log_response(status, &headers, &body);
        }

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), path, &body));
        }

        Ok(RawExchange {
            status,
            headers,
            path,
            body,
        })
    }
}

struct RawExchange {
    status: StatusCode,
    headers: HeaderMap,
    path: String,
    body: Vec<u8>,
}

fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(format!("plane-api-rs/{}", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(ApiError::RequestFailed)
}

/// Parse the base URL and make sure relative API paths land beneath it.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{trimmed}/"))?;

    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidRequest(format!(
            "base URL '{raw}' cannot carry API paths"
        )));
    }
    Ok(url)
}

fn decode_json<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<T> {
    let decoded = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice(b"null")
    } else {
        serde_json::from_slice(body)
    };

    decoded.map_err(|source| ApiError::InvalidResponse {
        path: path.to_string(),
        source,
    })
}

fn describe_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if name.as_str().eq_ignore_ascii_case(API_KEY_HEADER) {
                "<redacted>"
            } else {
                value.to_str().unwrap_or("<binary>")
            };
            format!("{name}: {shown}")
        })
        .collect::<Vec<_>>()
        .join("; ")
}

pub(crate) fn log_request(request: &Request) {
    let body = request
        .body()
        .and_then(|b| b.as_bytes())
        .map(|b| String::from_utf8_lossy(b).into_owned())
        .unwrap_or_default();

    info!(
        target: WIRE_TARGET,
        method = %request.method(),
        url = %request.url(),
        headers = %describe_headers(request.headers()),
        body = %body,
        "REQUEST"
    );
}

pub(crate) fn log_response(status: StatusCode, headers: &HeaderMap, body: &[u8]) {
    info!(
        target: WIRE_TARGET,
        status = status.as_u16(),
        headers = %describe_headers(headers),
        body = %String::from_utf8_lossy(body),
        "RESPONSE"
    );
}
