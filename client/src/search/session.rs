//! One search operation end to end, plus the state-changing entry points
//! that re-enter it.

use std::sync::atomic::{AtomicU64, Ordering};

use common::{
    collection::CollectionDirectory,
    facet_model::Facet,
    page_window::ResultsHeader,
    search_state::SearchState,
};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{
    config::SearchConfig,
    error::SearchError,
    es_utils::{SearchBackend, run_query_pair},
    search::{build_query_pair, compute_results_header, merge_aggregations, order_facet_values, resolve_indices},
    state_store::StateStore,
    url_state,
};


/// Everything a rendering layer needs to draw one settled operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Issue order of the operation that produced this outcome.
    pub sequence: u64,
    /// The state snapshot the operation ran against.
    pub state: SearchState,
    pub total_hits: u64,
    /// Raw `_source` documents, projection already applied by the backend.
    pub documents: Vec<serde_json::Value>,
    pub facets: Vec<Facet>,
    pub header: ResultsHeader,
    pub applied_filter_count: u64,
    /// How many other collections exist, for the single-collection page's
    /// cross-search call to action. Zero in multi mode.
    pub additional_collection_count: u64,
}

/// Published to subscribers after every settled operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchUpdate {
    /// Nothing has settled yet.
    #[default]
    Pending,
    Results(SearchOutcome),
    /// The operation failed; the UI falls back to its neutral error state.
    Failed,
}


/// A connected search session: validated config, the immutable collection
/// directory, the transport, and the state store the URL stands behind.
pub struct SearchSession<B, S> {
    config: SearchConfig,
    backend: B,
    store: S,
    directory: CollectionDirectory,
    issued: AtomicU64,
    applied: AtomicU64,
    updates: watch::Sender<SearchUpdate>,
}

impl<B: SearchBackend, S: StateStore> SearchSession<B, S> {
    /// Validates the configuration and fetches the collection directory
    /// once. A missing or failing directory degrades to the empty one.
    pub async fn connect(config: SearchConfig, backend: B, store: S) -> Result<Self, SearchError> {
        let config = config.validated()?;
        let directory = match backend.fetch_directory().await {
            Ok(collections) => CollectionDirectory::new(collections),
            Err(e) => {
                warn!("collection directory unavailable, continuing without it: {e}");
                CollectionDirectory::default()
            }
        };
        let (updates, _) = watch::channel(SearchUpdate::Pending);
        Ok(Self {
            config,
            backend,
            store,
            directory,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
            updates,
        })
    }

    pub fn directory(&self) -> &CollectionDirectory {
        &self.directory
    }

    pub fn state(&self) -> SearchState {
        self.store.read()
    }

    /// The rendering layer's subscription point.
    pub fn subscribe(&self) -> watch::Receiver<SearchUpdate> {
        self.updates.subscribe()
    }

    /// Seeds the store from a raw URL query string, logging any decode
    /// warnings.
    pub fn apply_query_string(&self, query_string: &str) {
        let (state, warnings) = url_state::decode(query_string, self.config.default_page_size);
        for warning in &warnings {
            warn!("{warning}");
        }
        self.store.write(state);
    }

    /// Serializes the current state for the embedder's address bar.
    pub fn query_string(&self) -> String {
        url_state::encode(&self.store.read(), self.config.default_page_size)
    }

    /// Runs one full search operation against the current state: resolve
    /// indices, synthesize the query pair, execute both queries
    /// concurrently, merge and order facets, compute the results header.
    pub async fn execute(&self) -> Result<SearchOutcome, SearchError> {
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let state = self.store.read();

        let indices = resolve_indices(&state, &self.config, &self.directory);
        let all_indices: Vec<String> = if self.directory.is_empty() {
            indices.clone()
        } else {
            self.directory.ids().map(str::to_string).collect()
        };

        let queries = build_query_pair(&state, &self.config, &self.directory);
        info!(sequence, indices = %indices.join(","), "executing search operation");
        let (primary, count) =
            run_query_pair(&self.backend, &indices, &queries.primary, &all_indices, &queries.count)
                .await?;

        let collection_buckets = count
            .aggregations
            .get("collection")
            .map(|aggregation| aggregation.buckets.clone())
            .unwrap_or_default();
        let mut facets = merge_aggregations(
            &primary.aggregations,
            &collection_buckets,
            &self.directory,
            &state,
            &self.config,
        )?;
        order_facet_values(&mut facets, &state, &self.directory);

        let total_hits = primary.hits.total.value;
        let header = compute_results_header(total_hits, state.start, state.size);
        let documents = primary.hits.hits.into_iter().map(|hit| hit._source).collect();
        let additional_collection_count = if self.config.multi {
            0
        } else {
            self.directory.len().saturating_sub(1) as u64
        };

        Ok(SearchOutcome {
            sequence,
            total_hits,
            documents,
            facets,
            header,
            applied_filter_count: state.applied_filter_count(),
            additional_collection_count,
            state,
        })
    }

    /// Runs one operation and publishes its outcome. Responses from
    /// operations issued earlier than the newest applied one are dropped,
    /// so the most recently issued operation wins at the render boundary
    /// regardless of arrival order. Failures are published as a neutral
    /// failed update and never propagate.
    pub async fn refresh(&self) {
        match self.execute().await {
            Ok(outcome) => {
                if self.applied.fetch_max(outcome.sequence, Ordering::SeqCst) < outcome.sequence {
                    let _ = self.updates.send(SearchUpdate::Results(outcome));
                } else {
                    info!(sequence = outcome.sequence, "dropping stale search response");
                }
            }
            Err(e) => {
                error!("search operation failed: {e}");
                let _ = self.updates.send(SearchUpdate::Failed);
            }
        }
    }

    /// Text box submit.
    pub async fn submit_query(&self, query_text: &str) {
        self.store.write(self.store.read().with_query_text(query_text));
        self.refresh().await;
    }

    /// Field facet value click.
    pub async fn toggle_filter(&self, field: &str, value: &str) {
        self.store.write(self.store.read().with_toggled_filter(field, value));
        self.refresh().await;
    }

    /// Collection facet value click. The rendered value is the display
    /// title; the state keeps ids, so unknown titles are ignored with a
    /// warning.
    pub async fn toggle_collection(&self, title: &str) {
        match self.directory.id_of(title) {
            Some(id) => {
                let state = self.store.read().with_toggled_collection(id);
                self.store.write(state);
                self.refresh().await;
            }
            None => warn!(title, "ignoring toggle for unknown collection title"),
        }
    }

    /// Page-size selector change.
    pub async fn set_page_size(&self, size: u64) {
        if size == 0 {
            warn!("ignoring page size 0");
            return;
        }
        self.store.write(self.store.read().with_size(size));
        self.refresh().await;
    }

    /// Paginator click.
    pub async fn goto(&self, start: u64) {
        self.store.write(self.store.read().with_start(start));
        self.refresh().await;
    }

    /// Clear-filters click.
    pub async fn clear_filters(&self) {
        self.store.write(self.store.read().with_cleared_filters());
        self.refresh().await;
    }
}
