//! Read-only access to the Open Library API.

pub mod schema;

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::{
    error::{Error, Result},
    gateway::schema::{AuthorResponse, SearchResponse},
    types::{AuthorDetail, BookRecord, PageSize},
};

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

/// One page of an author search.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SearchPage {
    /// Number of matches the remote reports across all pages.
    pub total_found: u64,
    pub records:     Vec<BookRecord>,
}

/// Where books and author details come from.
///
/// Every call is an independent request; nothing is cached or retried.
#[allow(async_fn_in_trait)]
pub trait BookSource {
    async fn search_books_by_author(
        &self,
        author_term: &str,
        page: u32,
        page_size: PageSize,
    ) -> Result<SearchPage>;

    async fn fetch_author_detail(&self, author_key: &str) -> Result<AuthorDetail>;
}

/// [BookSource] backed by the public Open Library HTTP API.
#[derive(Debug, Clone)]
pub struct OpenLibrary {
    client:   reqwest::Client,
    base_url: String,
    timeout:  Option<Duration>,
}

impl Default for OpenLibrary {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl OpenLibrary {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client:   reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout:  None,
        }
    }

    /// Abort requests that take longer than `timeout`. Unset by default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut builder = self.client.get(&url).query(query);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let request = builder
            .build()
            .map_err(|source| Error::RemoteFetch { url: url.clone(), source })?;
        let url = request.url().to_string();
        debug!("GET {url}");

        let response = self.client.execute(request).await.map_err(|source| {
            error!("Request to {url} failed: {source}");
            Error::RemoteFetch { url: url.clone(), source }
        })?;
        let status = response.status();
        if !status.is_success() {
            error!("Request to {url} returned {status}");
            return Err(Error::Status {
                url,
                status: status.as_u16(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|source| Error::RemoteFetch { url: url.clone(), source })?;

        let de = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(de).map_err(|source| {
            error!("Unexpected response from {url} at {}", source.path());
            Error::Parse { url, source }
        })
    }
}

impl BookSource for OpenLibrary {
    async fn search_books_by_author(
        &self,
        author_term: &str,
        page: u32,
        page_size: PageSize,
    ) -> Result<SearchPage> {
        let url = format!("{}/search.json", self.base_url);
        let query = [
            ("author", author_term.to_string()),
            ("page", page.to_string()),
            ("limit", page_size.to_string()),
        ];
        let response: SearchResponse = self.get_json(url, &query).await?;
        debug!(
            "Search for {author_term:?} found {} books, {} on page {page}",
            response.total_found(),
            response.docs.len()
        );
        Ok(SearchPage {
            total_found: response.total_found(),
            records:     response.docs.into_iter().map(BookRecord::from).collect(),
        })
    }

    async fn fetch_author_detail(&self, author_key: &str) -> Result<AuthorDetail> {
        let author_key = author_key.trim_start_matches("/authors/");
        let url = format!("{}/authors/{author_key}.json", self.base_url);
        let response: AuthorResponse = self.get_json(url, &[]).await?;
        Ok(response.into())
    }
}
