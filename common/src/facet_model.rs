//! Merged facet model produced after aggregation reconciliation.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub value: String,
    pub count: u64,
    pub selected: bool,
}


/// One facet ready for rendering. The collection facet is its own variant
/// so merge and toggle logic dispatch on the kind instead of matching a
/// reserved facet name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facet {
    /// Cross-collection counts; exactly one value per known collection,
    /// keyed by display title.
    Collection { values: Vec<FacetValue> },
    /// Counts over one document field, keyed by raw field value.
    Field {
        name: String,
        display_name: String,
        values: Vec<FacetValue>,
    },
}

impl Facet {
    pub fn values(&self) -> &[FacetValue] {
        match self {
            Facet::Collection { values } => values,
            Facet::Field { values, .. } => values,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Facet::Collection { .. } => "Collection",
            Facet::Field { display_name, .. } => display_name,
        }
    }
}


/// Derives a facet heading from a field name: `file_type` becomes
/// `File Type`.
pub fn snake_to_title_case(s: &str) -> String {
    s.split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
