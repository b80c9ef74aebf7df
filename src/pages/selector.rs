//! Resolving requested pages against a real document.

use super::range::{PageIndex, PageRangeSet, to_page_index};

/// Keep the requested pages that exist in a document of `total_pages`
/// pages, in ascending order.
///
/// An empty result is a normal outcome; callers decide how to report it.
pub fn select(requested: &PageRangeSet, total_pages: usize) -> Vec<PageIndex> {
    let last = to_page_index(total_pages);
    requested
        .intervals()
        .take_while(|range| *range.start() <= last)
        .flat_map(|range| *range.start()..=(*range.end()).min(last))
        .collect()
}
