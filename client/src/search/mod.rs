//! Search operation pipeline: query synthesis, aggregation merge, facet
//! ordering and pagination arithmetic, composed by the session.

mod query_builder;
pub use query_builder::{QueryPair, build_query_pair, resolve_indices};

mod aggregation_merge;
pub use aggregation_merge::merge_aggregations;

mod facet_order;
pub use facet_order::{order_facet_values, order_selected_first};

mod pagination;
pub use pagination::{compute_results_header, compute_window};

mod session;
pub use session::{SearchOutcome, SearchSession, SearchUpdate};
