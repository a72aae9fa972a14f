//! One load sequence: search, fetch every author concurrently, join.

use futures::future::{join_all, try_join_all};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    gateway::BookSource,
    types::{AuthorDetail, BookRecord, EnrichedBookRecord, PageSize},
};

/// What to do when one author of a page can't be looked up.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrichmentPolicy {
    /// Enrich that book with `N/A` details and keep going.
    #[default]
    Degrade,
    /// Abort the whole load on the first failure.
    FailFast,
}

/// Snapshot of the query a load sequence was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub sequence:    u64,
    pub author_term: String,
    pub page:        u32,
    pub page_size:   PageSize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage {
    pub sequence:    u64,
    pub total_found: u64,
    pub records:     Vec<EnrichedBookRecord>,
}

pub async fn load_page<S: BookSource>(
    source: &S,
    request: &LoadRequest,
    policy: EnrichmentPolicy,
) -> Result<LoadedPage> {
    info!(
        "Loading #{}: author {:?}, page {}, {} per page",
        request.sequence, request.author_term, request.page, request.page_size
    );
    let page = source
        .search_books_by_author(&request.author_term, request.page, request.page_size)
        .await?;
    let records = enrich(source, page.records, policy).await?;
    debug!("Load #{} enriched {} books", request.sequence, records.len());
    Ok(LoadedPage {
        sequence: request.sequence,
        total_found: page.total_found,
        records,
    })
}

/// Join every book with its primary author's details.
///
/// Lookups run concurrently. The output has the same length and order as
/// `books`.
pub async fn enrich<S: BookSource>(
    source: &S,
    books: Vec<BookRecord>,
    policy: EnrichmentPolicy,
) -> Result<Vec<EnrichedBookRecord>> {
    let lookups = books.iter().map(|book| async move {
        match book.primary_author_key() {
            Ok(author_key) => source.fetch_author_detail(author_key).await,
            Err(e) => Err(e),
        }
    });

    let details = match policy {
        EnrichmentPolicy::FailFast => try_join_all(lookups).await?,
        EnrichmentPolicy::Degrade => join_all(lookups)
            .await
            .into_iter()
            .zip(&books)
            .map(|(detail, book)| {
                detail.unwrap_or_else(|e| {
                    warn!("No author details for {}: {e}", book.key);
                    AuthorDetail::unavailable()
                })
            })
            .collect(),
    };

    Ok(books
        .into_iter()
        .zip(details)
        .map(|(book, detail)| EnrichedBookRecord::enrich(book, detail))
        .collect())
}
