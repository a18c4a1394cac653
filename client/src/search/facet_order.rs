//! Deterministic facet value ordering: selected values first, most
//! recently toggled on top, everything else in backend order.

use std::cmp::Reverse;

use common::{
    collection::CollectionDirectory,
    facet_model::{Facet, FacetValue},
    search_state::SearchState,
};


/// Stable sort by the value's position in the selection history,
/// descending; values never selected keep their relative backend order at
/// the back.
pub fn order_selected_first(values: &mut [FacetValue], selected_values: &[String]) {
    values.sort_by_key(|facet_value| {
        let rank = selected_values
            .iter()
            .position(|selected| selected == &facet_value.value)
            .map(|index| index as i64)
            .unwrap_or(-1);
        Reverse(rank)
    });
}

/// Applies the selection ordering to every merged facet. The collection
/// facet's values are display titles, so its selection history is mapped
/// through the directory first.
pub fn order_facet_values(
    facets: &mut [Facet],
    state: &SearchState,
    directory: &CollectionDirectory,
) {
    for facet in facets {
        match facet {
            Facet::Collection { values } => {
                let selected_titles: Vec<String> = state
                    .selected_collections
                    .iter()
                    .filter_map(|id| directory.title_of(id))
                    .map(str::to_string)
                    .collect();
                order_selected_first(values, &selected_titles);
            }
            Facet::Field { name, values, .. } => {
                let selected = state.filters.get(name).unwrap_or_default().to_vec();
                order_selected_first(values, &selected);
            }
        }
    }
}
