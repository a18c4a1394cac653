//! Result-range and page-window arithmetic.

use common::{
    page_window::{PageButtonSpec, PageWindow, ResultsHeader, page_size_options},
    search_const::PAGINATION_REACH,
};


/// Computes the displayed result range and its page window. `size` must be
/// positive; a zero is clamped rather than dividing by it.
pub fn compute_results_header(total_hits: u64, start: u64, size: u64) -> ResultsHeader {
    let size = size.max(1);
    if total_hits == 0 {
        return ResultsHeader::NoResults;
    }

    let start_index = start + 1;
    if total_hits < start_index {
        return ResultsHeader::OutOfRange { start, total_hits };
    }
    let end_index = start_index + (total_hits - start_index).min(size - 1);
    let current_page = start_index / size + 1;

    ResultsHeader::Results {
        start_index,
        end_index,
        total_hits,
        window: compute_window(total_hits, size, current_page),
        size_options: page_size_options(size),
    }
}

/// Builds the page-button sequence around `current_page`: previous, an
/// explicit first page and ellipsis when far enough in, the adjacent
/// pages, an ellipsis and explicit last page when far enough from the end,
/// then next.
pub fn compute_window(total_hits: u64, size: u64, current_page: u64) -> PageWindow {
    let size = size.max(1);
    let max_page = total_hits.div_ceil(size);

    let show_first = current_page > PAGINATION_REACH + 1;
    let show_last = max_page.saturating_sub(current_page) > PAGINATION_REACH;
    let start_of = |page: u64| size * (page - 1);

    let mut buttons = Vec::new();

    buttons.push(PageButtonSpec {
        label: "prev".to_string(),
        start_offset: size * current_page.saturating_sub(2),
        disabled: current_page == 1,
        is_current: false,
    });

    if show_first {
        buttons.push(PageButtonSpec {
            label: "1".to_string(),
            start_offset: 0,
            disabled: false,
            is_current: false,
        });
        buttons.push(ellipsis());
    }

    let first_adjacent = current_page.saturating_sub(PAGINATION_REACH).max(1);
    for page in first_adjacent..=current_page + PAGINATION_REACH {
        if page > max_page {
            break;
        }
        if (page == 1 && show_first) || (page == max_page && show_last) {
            continue;
        }
        buttons.push(PageButtonSpec {
            label: page.to_string(),
            start_offset: start_of(page),
            disabled: false,
            is_current: page == current_page,
        });
    }

    if show_last {
        buttons.push(ellipsis());
        buttons.push(PageButtonSpec {
            label: max_page.to_string(),
            start_offset: start_of(max_page),
            disabled: false,
            is_current: false,
        });
    }

    buttons.push(PageButtonSpec {
        label: "next".to_string(),
        start_offset: size * current_page,
        disabled: current_page == max_page,
        is_current: false,
    });

    PageWindow { buttons, current_page, max_page }
}

fn ellipsis() -> PageButtonSpec {
    PageButtonSpec {
        label: "…".to_string(),
        start_offset: 0,
        disabled: true,
        is_current: false,
    }
}
