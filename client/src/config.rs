//! Engine configuration and construction-time validation.

use common::search_const::{DEFAULT_PAGE_SIZE, FACET_BUCKET_CAP};

use crate::error::SearchError;


/// Static search setup, validated once when the session connects.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Backend base URL; normalized to its origin during validation.
    pub base_url: String,
    /// The host collection's index. Required unless `multi` is set.
    pub index: Option<String>,
    /// Multi-collection mode: search across the whole directory and show
    /// the collection facet.
    pub multi: bool,
    /// Fields surfaced as facets, in display order.
    pub faceted_fields: Vec<String>,
    /// Document fields the rendering layer shows per hit. Carried for the
    /// embedder, unused by query synthesis.
    pub display_fields: Vec<String>,
    /// Document fields stripped from returned hits.
    pub source_excludes: Vec<String>,
    pub default_page_size: u64,
    /// Per-facet bucket ceiling sent to the backend.
    pub bucket_cap: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            index: None,
            multi: false,
            faceted_fields: Vec::new(),
            display_fields: Vec::new(),
            source_excludes: vec!["full_text".to_string()],
            default_page_size: DEFAULT_PAGE_SIZE,
            bucket_cap: FACET_BUCKET_CAP,
        }
    }
}

impl SearchConfig {
    /// Checks required attributes and normalizes the backend URL to its
    /// origin, discarding any path and trailing slash.
    pub fn validated(mut self) -> Result<Self, SearchError> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| SearchError::Configuration {
            detail: format!("invalid backend url {:?}: {e}", self.base_url),
        })?;
        let origin = parsed.origin();
        if !matches!(origin, url::Origin::Tuple(..)) {
            return Err(SearchError::Configuration {
                detail: format!("backend url {:?} has no usable origin", self.base_url),
            });
        }
        self.base_url = origin.ascii_serialization();

        if !self.multi && self.index.as_deref().unwrap_or("").is_empty() {
            return Err(SearchError::Configuration {
                detail: "an index is required outside multi-collection mode".to_string(),
            });
        }
        if self.default_page_size == 0 {
            return Err(SearchError::Configuration {
                detail: "default_page_size must be positive".to_string(),
            });
        }
        if self.bucket_cap == 0 {
            return Err(SearchError::Configuration {
                detail: "bucket_cap must be positive".to_string(),
            });
        }
        Ok(self)
    }
}
