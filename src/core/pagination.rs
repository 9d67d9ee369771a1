//! Single-page and exhaustive page fetching for list endpoints.

use crate::Result;
use crate::api::client::{HttpClient, RequestOptions, decode};
use crate::api::models::Page;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Progress of an exhaustive fetch. Lives only for the duration of the loop.
#[derive(Debug)]
pub struct PaginationState<T> {
    pub limit: u64,
    pub offset: u64,
    pub total_filtered_records: u64,
    pub accumulated: Vec<T>,
    extra: Map<String, Value>,
}

impl<T> PaginationState<T> {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit,
            offset,
            total_filtered_records: 0,
            accumulated: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Fold one page in and advance the offset. Returns true while more pages remain.
    pub fn absorb(&mut self, page: Page<T>) -> bool {
        let received = page.page_items.len();
        self.total_filtered_records = page.total_filtered_records;
        self.accumulated.extend(page.page_items);
        self.extra = page.extra;
        self.offset += self.limit;

        received > 0 && self.offset < self.total_filtered_records
    }

    pub fn into_page(self) -> Page<T> {
        Page {
            page_items: self.accumulated,
            total_filtered_records: self.total_filtered_records,
            extra: self.extra,
        }
    }
}

fn page_query(
    query: &[(String, String)],
    limit: Option<u64>,
    offset: Option<u64>,
) -> Vec<(String, String)> {
    let mut pairs = query.to_vec();
    if let Some(limit) = limit {
        pairs.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(offset) = offset {
        pairs.push(("offset".to_string(), offset.to_string()));
    }
    pairs
}

/// Fetch exactly one page and return it untouched.
pub async fn fetch_page<T>(
    client: &dyn HttpClient,
    path: &str,
    query: &[(String, String)],
    limit: Option<u64>,
    offset: Option<u64>,
) -> Result<Page<T>>
where
    T: DeserializeOwned,
{
    let opts = RequestOptions::with_query(page_query(query, limit, offset));
    let response = client.get(path, opts).await?;
    decode(response, path)
}

/// Fetch every page of `page_size` items starting at `start_offset`.
///
/// The total is re-read from each response and the result reports the last
/// one seen. Any failed page aborts the whole fetch.
pub async fn fetch_all<T>(
    client: &dyn HttpClient,
    path: &str,
    query: &[(String, String)],
    page_size: u64,
    start_offset: u64,
) -> Result<Page<T>>
where
    T: DeserializeOwned + Send,
{
    let mut state = PaginationState::new(page_size, start_offset);

    loop {
        let page: Page<T> =
            fetch_page(client, path, query, Some(state.limit), Some(state.offset)).await?;
        let more = state.absorb(page);
        tracing::debug!(
            "{}: {} of {} records fetched",
            path,
            state.accumulated.len(),
            state.total_filtered_records
        );
        if !more {
            break;
        }
    }

    Ok(state.into_page())
}
