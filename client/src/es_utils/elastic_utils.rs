use std::collections::BTreeMap;

use async_trait::async_trait;
use common::collection::Collection;
use serde::{Deserialize, Serialize};

use crate::error::{QueryRole, SearchError};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSearchResult {
    pub hits: RawSearchResultHits,
    #[serde(default)]
    pub aggregations: BTreeMap<String, RawAggregation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSearchResultHits {
    pub total: RawTotalHits,
    #[serde(default)]
    pub hits: Vec<RawSearchResultHit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTotalHits {
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSearchResultHit {
    pub _source: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawAggregation {
    #[serde(default)]
    pub buckets: Vec<RawBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBucket {
    pub key: String,
    pub doc_count: u64,
}


// Error payload shape returned by the backend on failed queries.
#[derive(Debug, Deserialize)]
struct RawErrorPayload {
    error: Option<RawErrorReason>,
}

#[derive(Debug, Deserialize)]
struct RawErrorReason {
    reason: Option<String>,
}

// Directory documents are `{ index, title }` records.
#[derive(Debug, Clone, Deserialize)]
struct RawDirectoryRecord {
    index: String,
    title: String,
}


/// Transport port for the search backend. The engine issues the two
/// per-operation queries and the one-off directory fetch through it; tests
/// substitute an in-memory implementation.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(
        &self,
        role: QueryRole,
        indices: &[String],
        body: &serde_json::Value,
    ) -> Result<RawSearchResult, SearchError>;

    async fn fetch_directory(&self) -> Result<Vec<Collection>, SearchError>;
}


/// Runs the primary and count queries concurrently. Either failure
/// short-circuits the operation; the error names the failing query.
pub async fn run_query_pair<B: SearchBackend>(
    backend: &B,
    primary_indices: &[String],
    primary: &serde_json::Value,
    count_indices: &[String],
    count: &serde_json::Value,
) -> Result<(RawSearchResult, RawSearchResult), SearchError> {
    futures::try_join!(
        backend.search(QueryRole::Primary, primary_indices, primary),
        backend.search(QueryRole::Count, count_indices, count),
    )
}


/// Production transport backed by `reqwest`.
pub struct HttpSearchBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSearchBackend {
    /// `base_url` is expected origin-normalized, see
    /// `SearchConfig::validated`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), client: reqwest::Client::new() }
    }

    async fn read_body(response: reqwest::Response, role: QueryRole) -> Result<String, SearchError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::Network { role, source: Box::new(e) })?;
        if !status.is_success() {
            // Surface the backend's own reason when the payload carries one.
            let reason = serde_json::from_str::<RawErrorPayload>(&text)
                .ok()
                .and_then(|payload| payload.error)
                .and_then(|error| error.reason)
                .unwrap_or_else(|| text.chars().take(200).collect());
            return Err(SearchError::BackendQuery { role, status: status.as_u16(), reason });
        }
        Ok(text)
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(
        &self,
        role: QueryRole,
        indices: &[String],
        body: &serde_json::Value,
    ) -> Result<RawSearchResult, SearchError> {
        let endpoint = format!("{}/{}/_search", self.base_url, indices.join(","));
        let response = self
            .client
            .post(&endpoint)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| SearchError::Network { role, source: Box::new(e) })?;
        let text = Self::read_body(response, role).await?;
        tracing::debug!(%role, response_len = text.len(), "search response received");
        serde_json::from_str(&text)
            .map_err(|e| SearchError::MalformedResponse { role, detail: e.to_string() })
    }

    async fn fetch_directory(&self) -> Result<Vec<Collection>, SearchError> {
        let role = QueryRole::Directory;
        let endpoint = format!("{}/directory_/_search", self.base_url);
        let response = self
            .client
            .get(&endpoint)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SearchError::Network { role, source: Box::new(e) })?;
        let text = Self::read_body(response, role).await?;
        let listing: RawSearchResult = serde_json::from_str(&text)
            .map_err(|e| SearchError::MalformedResponse { role, detail: e.to_string() })?;
        listing
            .hits
            .hits
            .into_iter()
            .map(|hit| {
                let record: RawDirectoryRecord = serde_json::from_value(hit._source)
                    .map_err(|e| SearchError::MalformedResponse { role, detail: e.to_string() })?;
                Ok(Collection::new(record.index, record.title))
            })
            .collect()
    }
}
