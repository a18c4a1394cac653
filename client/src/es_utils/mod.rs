//! Backend transport port, raw response models and the HTTP implementation.

mod elastic_utils;
pub use elastic_utils::{
    HttpSearchBackend, RawAggregation, RawBucket, RawSearchResult, RawSearchResultHit,
    RawSearchResultHits, RawTotalHits, SearchBackend, run_query_pair,
};
