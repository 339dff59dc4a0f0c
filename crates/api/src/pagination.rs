use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Cursor-paged envelope returned by the larger list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub prev_cursor: Option<String>,
    #[serde(default)]
    pub next_page_results: Option<bool>,
    #[serde(default)]
    pub prev_page_results: Option<bool>,
}

impl<T> PagedResponse<T> {
    pub fn has_next(&self) -> bool {
        self.next_page_results.unwrap_or(false)
    }

    /// Cursor for the following page, only when the server says one exists.
    pub fn next_cursor(&self) -> Option<&str> {
        if !self.has_next() {
            return None;
        }
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// A list response in either shape the API uses: a bare array or the paged envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Paged(PagedResponse<T>),
}

impl<T> Listing<T> {
    pub fn into_results(self) -> Vec<T> {
        match self {
            Listing::Bare(items) => items,
            Listing::Paged(page) => page.results,
        }
    }
}

/// Selects a single page; the client never walks cursors on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub per_page: Option<u32>,
    pub cursor: Option<String>,
}

impl PageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub(crate) fn apply(&self, path: &str) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(per_page) = self.per_page {
            query.append_pair("per_page", &per_page.to_string());
        }
        if let Some(cursor) = &self.cursor {
            query.append_pair("cursor", cursor);
        }

        let query = query.finish();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }
}
