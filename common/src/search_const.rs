//! Shared search constants.

/// Result page size used when the URL does not carry a `size` parameter.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Maximum number of buckets requested per facet aggregation. Facets with
/// higher cardinality are truncated by the backend at this count.
pub const FACET_BUCKET_CAP: u64 = 25;

/// Number of page buttons shown on each side of the current page.
pub const PAGINATION_REACH: u64 = 2;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [u64; 4] = [10, 25, 50, 100];
