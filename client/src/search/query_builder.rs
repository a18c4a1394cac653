//! Backend query synthesis from the decoded search state.

use common::{collection::CollectionDirectory, search_state::SearchState};
use serde_json::{Value, json};

use crate::config::SearchConfig;


/// The two query bodies issued per search operation.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPair {
    pub primary: Value,
    pub count: Value,
}


/// Indices targeted by the primary query. Multi-collection mode searches
/// the selection, or the whole directory when nothing is selected; with no
/// directory at all it falls back to every index.
pub fn resolve_indices(
    state: &SearchState,
    config: &SearchConfig,
    directory: &CollectionDirectory,
) -> Vec<String> {
    if !config.multi {
        return config.index.iter().cloned().collect();
    }
    if !state.selected_collections.is_empty() {
        return state.selected_collections.clone();
    }
    if directory.is_empty() {
        return vec!["*".to_string()];
    }
    directory.ids().map(str::to_string).collect()
}

/// Builds the primary and count query bodies. Pure: identical inputs yield
/// byte-identical output (`serde_json` keeps object keys sorted).
pub fn build_query_pair(
    state: &SearchState,
    config: &SearchConfig,
    directory: &CollectionDirectory,
) -> QueryPair {
    let text_clause = if state.query_text.is_empty() {
        json!({ "match_all": {} })
    } else {
        let fields: Vec<String> = if state.fields.is_empty() {
            vec!["*".to_string()]
        } else {
            state.fields.clone()
        };
        json!({
            "simple_query_string": {
                "query": state.query_text,
                "default_operator": "and",
                "fields": fields,
            }
        })
    };

    let filter_clauses: Vec<Value> = state
        .filters
        .iter()
        .flat_map(|(field, values)| {
            let raw_field = format!("{field}.raw");
            values.iter().map(move |value| {
                let mut term = serde_json::Map::new();
                term.insert(raw_field.clone(), Value::String(value.clone()));
                json!({ "term": term })
            })
        })
        .collect();

    // An empty filter list must not produce a bool wrapper.
    let query_clause = if filter_clauses.is_empty() {
        text_clause
    } else {
        json!({ "bool": { "must": text_clause, "filter": filter_clauses } })
    };

    let mut aggs = serde_json::Map::new();
    for facet in &config.faceted_fields {
        aggs.insert(
            facet.clone(),
            json!({ "terms": { "field": format!("{facet}.raw"), "size": config.bucket_cap } }),
        );
    }

    let primary = json!({
        "from": state.start,
        "size": state.size,
        "query": query_clause,
        "aggs": aggs,
        "_source": { "excludes": config.source_excludes },
    });

    // Counts only: no documents, one bucket per known collection so the
    // aggregation can never truncate.
    let count = json!({
        "size": 0,
        "query": primary["query"],
        "aggs": {
            "collection": {
                "terms": { "field": "_index", "size": directory.len() }
            }
        },
    });

    QueryPair { primary, count }
}
