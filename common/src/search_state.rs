//! Shared search state models and transitions.

use serde::{Deserialize, Serialize};

use crate::search_const::DEFAULT_PAGE_SIZE;


/// Filter values per field, in the order they were most recently toggled.
///
/// Keys are plain field names: the `[]` marker of the URL form and the
/// `.raw` suffix of backend term filters are both applied at those
/// boundaries, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterMap {
    entries: Vec<(String, Vec<String>)>,
}

impl FilterMap {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of filter values across all fields.
    pub fn value_count(&self) -> u64 {
        self.entries.iter().map(|(_, values)| values.len() as u64).sum()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, values)| values.as_slice())
    }

    pub fn contains(&self, field: &str, value: &str) -> bool {
        self.get(field).is_some_and(|values| values.iter().any(|v| v == value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Appends a value to a field's list, creating the field entry at the
    /// end of the map if it is new.
    pub fn insert_value(&mut self, field: &str, value: impl Into<String>) {
        if let Some((_, values)) = self.entries.iter_mut().find(|(name, _)| name == field) {
            values.push(value.into());
        } else {
            self.entries.push((field.to_string(), vec![value.into()]));
        }
    }

    /// Removes a single value; the field entry goes with its last value.
    pub fn remove_value(&mut self, field: &str, value: &str) {
        if let Some((_, values)) = self.entries.iter_mut().find(|(name, _)| name == field) {
            values.retain(|v| v != value);
        }
        self.entries.retain(|(_, values)| !values.is_empty());
    }

    pub fn toggle(&mut self, field: &str, value: &str) {
        if self.contains(field, value) {
            self.remove_value(field, value);
        } else {
            self.insert_value(field, value);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}


/// The full search state carried by the URL. Replaced wholesale on every
/// state-changing interaction, never mutated in place across operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchState {
    pub query_text: String,
    pub filters: FilterMap,
    pub start: u64,
    pub size: u64,
    /// Collection ids in selection order; empty means "all collections".
    pub selected_collections: Vec<String>,
    /// Fields targeted by the full-text clause; empty means every field.
    pub fields: Vec<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query_text: String::new(),
            filters: FilterMap::default(),
            start: 0,
            size: DEFAULT_PAGE_SIZE,
            selected_collections: Vec::new(),
            fields: Vec::new(),
        }
    }
}

impl SearchState {
    /// Text box submit. Resets paging.
    pub fn with_query_text(mut self, query_text: impl Into<String>) -> Self {
        self.query_text = query_text.into();
        self.start = 0;
        self
    }

    /// Facet value click. Resets paging.
    pub fn with_toggled_filter(mut self, field: &str, value: &str) -> Self {
        self.filters.toggle(field, value);
        self.start = 0;
        self
    }

    /// Collection facet click. Resets paging.
    pub fn with_toggled_collection(mut self, id: &str) -> Self {
        if let Some(position) = self.selected_collections.iter().position(|c| c == id) {
            self.selected_collections.remove(position);
        } else {
            self.selected_collections.push(id.to_string());
        }
        self.start = 0;
        self
    }

    /// Page-size selector change. Resets paging.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size.max(1);
        self.start = 0;
        self
    }

    /// Paginator click.
    pub fn with_start(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    /// Clear-filters click: drops every filter and collection selection.
    pub fn with_cleared_filters(mut self) -> Self {
        self.filters.clear();
        self.selected_collections.clear();
        self.start = 0;
        self
    }

    /// Number of applied filter values, collection selections included.
    pub fn applied_filter_count(&self) -> u64 {
        self.selected_collections.len() as u64 + self.filters.value_count()
    }
}
