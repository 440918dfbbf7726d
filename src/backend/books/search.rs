//! Open Library Search Client
//!
//! Thin proxy over `GET {base}/search.json`. Results are reshaped into
//! [`BookSearchResult`] so the frontend can add a hit to a group without a
//! second lookup.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::backend::books::types::BookSearchResult;
use crate::backend::error::BackendError;

const SEARCH_FIELDS: &str = "key,title,author_name,isbn,cover_i,first_publish_year";
const COVERS_URL: &str = "https://covers.openlibrary.org/b/id";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Open Library API client
#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    key: Option<String>,
    title: Option<String>,
    #[serde(default)]
    author_name: Vec<String>,
    #[serde(default)]
    isbn: Vec<String>,
    cover_i: Option<i64>,
    first_publish_year: Option<i32>,
}

impl From<SearchDoc> for BookSearchResult {
    fn from(doc: SearchDoc) -> Self {
        BookSearchResult {
            title: doc.title.unwrap_or_else(|| "Unknown Title".to_string()),
            author: doc
                .author_name
                .into_iter()
                .next()
                .unwrap_or_else(|| "Unknown".to_string()),
            isbn: doc.isbn.into_iter().next(),
            // "/works/OL123W" -> "OL123W"
            open_library_id: doc
                .key
                .as_deref()
                .and_then(|key| key.rsplit('/').next())
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            cover_url: doc
                .cover_i
                .map(|cover| format!("{}/{}-M.jpg", COVERS_URL, cover)),
            publish_year: doc.first_publish_year,
        }
    }
}

impl OpenLibraryClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Search books by free text
    ///
    /// # Errors
    ///
    /// `BackendError::Upstream` on connection failure, a non-2xx answer, or
    /// an unparseable body.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<BookSearchResult>, BackendError> {
        let url = format!("{}/search.json", self.base_url);
        let limit = limit.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("limit", limit.as_str()), ("fields", SEARCH_FIELDS)])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                tracing::warn!("Open Library search failed: {:?}", e);
                BackendError::upstream(format!("Failed to search books: {}", e))
            })?;

        let body: SearchResponse = response.json().await.map_err(|e| {
            tracing::warn!("Open Library returned an unreadable body: {:?}", e);
            BackendError::upstream(format!("Failed to search books: {}", e))
        })?;

        Ok(body.docs.into_iter().map(BookSearchResult::from).collect())
    }
}
