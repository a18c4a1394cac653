//! End-to-end search operations over an in-memory backend and state store.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use client::config::SearchConfig;
use client::error::{QueryRole, SearchError};
use client::es_utils::{
    RawAggregation, RawBucket, RawSearchResult, RawSearchResultHit, RawSearchResultHits,
    RawTotalHits, SearchBackend,
};
use client::search::{SearchSession, SearchUpdate};
use client::state_store::InMemoryStateStore;
use common::collection::Collection;
use common::facet_model::Facet;
use common::page_window::ResultsHeader;
use common::search_state::SearchState;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};


/// Canned backend; records every search call it receives.
struct FakeBackend {
    directory: Result<Vec<Collection>, ()>,
    total_hits: u64,
    documents: Vec<Value>,
    field_buckets: BTreeMap<String, Vec<(String, u64)>>,
    collection_counts: Vec<(String, u64)>,
    /// Sleep applied to primary queries whose text is "slow".
    slow_query_delay: Duration,
    calls: Arc<Mutex<Vec<(QueryRole, Vec<String>)>>>,
}

impl FakeBackend {
    fn new() -> Self {
        Self {
            directory: Ok(vec![
                Collection::new("docs_a", "Docs A"),
                Collection::new("docs_b", "Docs B"),
                Collection::new("docs_c", "Docs C"),
            ]),
            total_hits: 42,
            documents: vec![json!({ "title": "first" }), json!({ "title": "second" })],
            field_buckets: BTreeMap::from([(
                "color".to_string(),
                vec![("red".to_string(), 5), ("blue".to_string(), 2)],
            )]),
            collection_counts: vec![("docs_a".to_string(), 9)],
            slow_query_delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle that survives the backend moving into the session.
    fn calls_handle(&self) -> Arc<Mutex<Vec<(QueryRole, Vec<String>)>>> {
        self.calls.clone()
    }

    fn aggregation(buckets: &[(String, u64)]) -> RawAggregation {
        RawAggregation {
            buckets: buckets
                .iter()
                .map(|(key, doc_count)| RawBucket { key: key.clone(), doc_count: *doc_count })
                .collect(),
        }
    }
}

#[async_trait]
impl SearchBackend for FakeBackend {
    async fn search(
        &self,
        role: QueryRole,
        indices: &[String],
        body: &Value,
    ) -> Result<RawSearchResult, SearchError> {
        self.calls.lock().unwrap().push((role, indices.to_vec()));

        if role == QueryRole::Primary && body["query"]["simple_query_string"]["query"] == "slow" {
            tokio::time::sleep(self.slow_query_delay).await;
        }

        let mut aggregations = BTreeMap::new();
        let hits = match role {
            QueryRole::Count => {
                aggregations
                    .insert("collection".to_string(), Self::aggregation(&self.collection_counts));
                RawSearchResultHits { total: RawTotalHits { value: self.total_hits }, hits: vec![] }
            }
            _ => {
                for (field, buckets) in &self.field_buckets {
                    aggregations.insert(field.clone(), Self::aggregation(buckets));
                }
                RawSearchResultHits {
                    total: RawTotalHits { value: self.total_hits },
                    hits: self
                        .documents
                        .iter()
                        .map(|doc| RawSearchResultHit { _source: doc.clone() })
                        .collect(),
                }
            }
        };
        Ok(RawSearchResult { hits, aggregations })
    }

    async fn fetch_directory(&self) -> Result<Vec<Collection>, SearchError> {
        self.directory.clone().map_err(|_| SearchError::Network {
            role: QueryRole::Directory,
            source: "connection refused".into(),
        })
    }
}

fn multi_config() -> SearchConfig {
    SearchConfig {
        base_url: "http://localhost:9200".to_string(),
        multi: true,
        faceted_fields: vec!["color".to_string()],
        ..SearchConfig::default()
    }
}


#[tokio::test]
async fn operation_produces_a_complete_outcome() {
    let backend = FakeBackend::new();
    let store = InMemoryStateStore::new(
        SearchState::default()
            .with_query_text("cats")
            .with_toggled_collection("docs_c")
            .with_toggled_filter("color", "blue"),
    );
    let session = SearchSession::connect(multi_config(), backend, store).await.unwrap();

    let outcome = session.execute().await.unwrap();

    assert_eq!(outcome.sequence, 1);
    assert_eq!(outcome.total_hits, 42);
    assert_eq!(outcome.documents, vec![json!({ "title": "first" }), json!({ "title": "second" })]);
    assert_eq!(outcome.applied_filter_count, 2);
    assert_eq!(outcome.additional_collection_count, 0);

    // collection facet first, complete over the directory, selected title
    // on top, then backend-count order with zero-fill
    let Facet::Collection { values } = &outcome.facets[0] else {
        panic!("expected the collection facet first");
    };
    let collection_view: Vec<(&str, u64, bool)> =
        values.iter().map(|v| (v.value.as_str(), v.count, v.selected)).collect();
    assert_eq!(
        collection_view,
        vec![("Docs C", 0, true), ("Docs A", 9, false), ("Docs B", 0, false)]
    );

    let Facet::Field { name, display_name, values } = &outcome.facets[1] else {
        panic!("expected the color facet second");
    };
    assert_eq!(name, "color");
    assert_eq!(display_name, "Color");
    let color_view: Vec<(&str, u64, bool)> =
        values.iter().map(|v| (v.value.as_str(), v.count, v.selected)).collect();
    assert_eq!(color_view, vec![("blue", 2, true), ("red", 5, false)]);

    let ResultsHeader::Results { start_index, end_index, total_hits, .. } = outcome.header else {
        panic!("expected a results header");
    };
    assert_eq!((start_index, end_index, total_hits), (1, 10, 42));
}

#[tokio::test]
async fn primary_targets_selection_and_count_targets_everything() {
    let backend = FakeBackend::new();
    let calls = backend.calls_handle();
    let store = InMemoryStateStore::new(SearchState::default().with_toggled_collection("docs_c"));
    let session = SearchSession::connect(multi_config(), backend, store).await.unwrap();

    session.execute().await.unwrap();

    let calls = calls.lock().unwrap();
    let primary = calls.iter().find(|(role, _)| *role == QueryRole::Primary).unwrap();
    let count = calls.iter().find(|(role, _)| *role == QueryRole::Count).unwrap();
    assert_eq!(primary.1, vec!["docs_c".to_string()]);
    assert_eq!(
        count.1,
        vec!["docs_a".to_string(), "docs_b".to_string(), "docs_c".to_string()]
    );
}

#[tokio::test]
async fn directory_failure_degrades_to_an_empty_directory() {
    let backend = FakeBackend { directory: Err(()), ..FakeBackend::new() };
    let config = SearchConfig {
        multi: false,
        index: Some("docs_a".to_string()),
        ..multi_config()
    };
    let session = SearchSession::connect(config, backend, InMemoryStateStore::default())
        .await
        .unwrap();

    assert!(session.directory().is_empty());

    let outcome = session.execute().await.unwrap();
    assert_eq!(outcome.additional_collection_count, 0);
    assert!(matches!(&outcome.facets[0], Facet::Field { name, .. } if name == "color"));
}

#[tokio::test]
async fn refresh_publishes_and_transitions_reset_paging() {
    let backend = FakeBackend::new();
    let store = InMemoryStateStore::new(SearchState::default().with_start(20));
    let session = SearchSession::connect(multi_config(), backend, store).await.unwrap();
    let mut updates = session.subscribe();

    assert_eq!(*updates.borrow(), SearchUpdate::Pending);
    session.toggle_filter("color", "red").await;

    assert!(updates.has_changed().unwrap());
    let update = updates.borrow_and_update().clone();
    let SearchUpdate::Results(outcome) = update else {
        panic!("expected a published result");
    };
    assert_eq!(outcome.state.start, 0);
    assert!(outcome.state.filters.contains("color", "red"));
}

#[tokio::test]
async fn collection_toggle_maps_titles_back_to_ids() {
    let backend = FakeBackend::new();
    let session =
        SearchSession::connect(multi_config(), backend, InMemoryStateStore::default()).await.unwrap();

    session.toggle_collection("Docs B").await;
    assert_eq!(session.state().selected_collections, vec!["docs_b".to_string()]);

    // unknown titles change nothing
    session.toggle_collection("Ghost Collection").await;
    assert_eq!(session.state().selected_collections, vec!["docs_b".to_string()]);
}

#[tokio::test]
async fn query_string_helpers_round_trip_through_the_store() {
    let backend = FakeBackend::new();
    let session =
        SearchSession::connect(multi_config(), backend, InMemoryStateStore::default()).await.unwrap();

    session.apply_query_string("?q=cats&color[]=red&start=20");
    let state = session.state();
    assert_eq!(state.query_text, "cats");
    assert_eq!(state.start, 20);
    assert_eq!(session.query_string(), "q=cats&color%5B%5D=red&start=20");
}

#[tokio::test]
async fn latest_issued_operation_wins_regardless_of_arrival_order() {
    let backend = FakeBackend {
        slow_query_delay: Duration::from_millis(150),
        ..FakeBackend::new()
    };
    let session = Arc::new(
        SearchSession::connect(multi_config(), backend, InMemoryStateStore::default())
            .await
            .unwrap(),
    );
    let updates = session.subscribe();

    let slow_session = session.clone();
    let slow = tokio::spawn(async move { slow_session.submit_query("slow").await });
    tokio::time::sleep(Duration::from_millis(30)).await;
    session.submit_query("fast").await;
    slow.await.unwrap();

    // the slow response arrived last but was issued first, so it is stale
    let SearchUpdate::Results(outcome) = updates.borrow().clone() else {
        panic!("expected a published result");
    };
    assert_eq!(outcome.state.query_text, "fast");
    assert_eq!(outcome.sequence, 2);
}
