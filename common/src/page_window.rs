//! Pagination window and results-header models.

use serde::{Deserialize, Serialize};

use crate::search_const::PAGE_SIZE_OPTIONS;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageButtonSpec {
    /// `"prev"`, `"next"`, `"…"`, or a page number.
    pub label: String,
    /// The `start` value a click on this button navigates to.
    pub start_offset: u64,
    pub disabled: bool,
    pub is_current: bool,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub buttons: Vec<PageButtonSpec>,
    pub current_page: u64,
    pub max_page: u64,
}


/// Everything the results header renders for one settled operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultsHeader {
    NoResults,
    /// The requested `start` lies beyond the result set; the display range
    /// would end before it begins, so no window is produced.
    OutOfRange { start: u64, total_hits: u64 },
    Results {
        /// 1-indexed inclusive display range.
        start_index: u64,
        end_index: u64,
        total_hits: u64,
        window: PageWindow,
        size_options: Vec<u64>,
    },
}


/// The selector options, with the current size appended when it is not one
/// of the stock choices.
pub fn page_size_options(current: u64) -> Vec<u64> {
    let mut options = PAGE_SIZE_OPTIONS.to_vec();
    if !options.contains(&current) {
        options.push(current);
    }
    options
}
