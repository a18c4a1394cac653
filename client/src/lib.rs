//! Faceted-search client engine: URL-state codec, query synthesis, dual-query
//! execution and merge, facet ordering, pagination arithmetic.

pub mod config;
pub mod error;
pub mod es_utils;
pub mod search;
pub mod state_store;
pub mod url_state;
