//! Reconciliation of the primary response's field aggregations with the
//! count query's per-collection aggregation.

use std::collections::{BTreeMap, HashSet};

use common::{
    collection::CollectionDirectory,
    facet_model::{Facet, FacetValue, snake_to_title_case},
    search_state::SearchState,
};

use crate::{
    config::SearchConfig,
    error::SearchError,
    es_utils::{RawAggregation, RawBucket},
};


/// Builds the facet list for one settled operation: the collection facet
/// first (multi mode), then the field facets in configured order. Field
/// facets with no returned buckets are not shown.
pub fn merge_aggregations(
    field_aggregations: &BTreeMap<String, RawAggregation>,
    collection_buckets: &[RawBucket],
    directory: &CollectionDirectory,
    state: &SearchState,
    config: &SearchConfig,
) -> Result<Vec<Facet>, SearchError> {
    let mut facets = Vec::new();

    if config.multi {
        facets.push(Facet::Collection {
            values: merge_collection_counts(collection_buckets, directory, state)?,
        });
    }

    for field in &config.faceted_fields {
        let buckets = field_aggregations
            .get(field)
            .map(|aggregation| aggregation.buckets.as_slice())
            .unwrap_or_default();
        if buckets.is_empty() {
            continue;
        }
        let selected = state.filters.get(field).unwrap_or_default();
        let values = buckets
            .iter()
            .map(|bucket| FacetValue {
                value: bucket.key.clone(),
                count: bucket.doc_count,
                selected: selected.iter().any(|v| v == &bucket.key),
            })
            .collect();
        facets.push(Facet::Field {
            name: field.clone(),
            display_name: snake_to_title_case(field),
            values,
        });
    }

    Ok(facets)
}

/// Every known collection appears exactly once: backend buckets keep their
/// counts, absent collections get a zero bucket, and ids are swapped for
/// display titles. An id the directory cannot resolve is a data-integrity
/// failure.
fn merge_collection_counts(
    buckets: &[RawBucket],
    directory: &CollectionDirectory,
    state: &SearchState,
) -> Result<Vec<FacetValue>, SearchError> {
    let mut values = Vec::with_capacity(directory.len());
    let mut represented = HashSet::new();

    for bucket in buckets {
        let title = directory
            .title_of(&bucket.key)
            .ok_or_else(|| SearchError::UnknownCollection { id: bucket.key.clone() })?;
        represented.insert(bucket.key.as_str());
        values.push(FacetValue {
            value: title.to_string(),
            count: bucket.doc_count,
            selected: state.selected_collections.iter().any(|id| id == &bucket.key),
        });
    }

    for collection in directory.collections() {
        if !represented.contains(collection.id.as_str()) {
            values.push(FacetValue {
                value: collection.title.clone(),
                count: 0,
                selected: state.selected_collections.iter().any(|id| id == &collection.id),
            });
        }
    }

    Ok(values)
}
