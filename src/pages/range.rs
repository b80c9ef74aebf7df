//! Page-range expressions.
//!
//! Supports individual pages and inclusive ranges, separated by commas:
//! - "1" - single page
//! - "1-5" - range of pages (inclusive)
//! - "1,3,5" - multiple individual pages
//! - "1-5,10-15" - combination of ranges
//!
//! A reversed range such as "5-3" contributes no pages; it is not an error.
//! Ranges are kept as merged intervals, so "1-4000000000" costs the same
//! as "1-4".

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{PdfOpsError, Result};

/// A 1-based page number within one document.
pub type PageIndex = u32;

/// Canonical set of 1-based page numbers: ascending, no duplicates.
///
/// Stored as disjoint, non-adjacent inclusive intervals keyed by their
/// first page, so two sets holding the same pages compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRangeSet {
    intervals: BTreeMap<PageIndex, PageIndex>,
}

impl PageRangeSet {
    /// Parse a page-range expression.
    ///
    /// Whitespace around tokens and around the `-` of a range is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::MalformedRange`] naming the offending token
    /// when a token is empty, is not an integer or `start-end` pair, or
    /// refers to page 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfops::pages::PageRangeSet;
    ///
    /// let set = PageRangeSet::parse("1-3,5,7").unwrap();
    /// assert_eq!(set.to_vec(), vec![1, 2, 3, 5, 7]);
    /// assert!(PageRangeSet::parse("5-3").unwrap().is_empty());
    /// ```
    pub fn parse(expression: &str) -> Result<Self> {
        let mut set = Self::default();

        for token in expression.split(',') {
            let token = token.trim();

            if let Some((start, end)) = token.split_once('-') {
                let start = parse_page(start, token)?;
                let end = parse_page(end, token)?;
                set.insert_range(start, end);
            } else {
                let page = parse_page(token, token)?;
                set.insert_range(page, page);
            }
        }

        Ok(set)
    }

    /// Build a set from already-validated page numbers. Zero is discarded.
    pub fn from_pages(pages: impl IntoIterator<Item = PageIndex>) -> Self {
        let mut set = Self::default();
        for page in pages.into_iter().filter(|page| *page >= 1) {
            set.insert_range(page, page);
        }
        set
    }

    /// Every page from 1 to `total` inclusive.
    pub fn all(total: usize) -> Self {
        let mut set = Self::default();
        set.insert_range(1, to_page_index(total));
        set
    }

    /// Add the pages `start..=end`, merging with overlapping or adjacent
    /// intervals. An empty range (`start > end`) adds nothing.
    fn insert_range(&mut self, mut start: PageIndex, mut end: PageIndex) {
        if start > end {
            return;
        }

        // An interval starting before `start` may overlap or touch it.
        if let Some((&before_start, &before_end)) = self.intervals.range(..start).next_back()
            && before_end.saturating_add(1) >= start
        {
            start = before_start;
            end = end.max(before_end);
            self.intervals.remove(&before_start);
        }

        // Swallow every interval starting inside or right after the new one.
        let reach = end.saturating_add(1);
        let absorbed: Vec<(PageIndex, PageIndex)> = self
            .intervals
            .range(start..=reach)
            .map(|(&s, &e)| (s, e))
            .collect();
        for (absorbed_start, absorbed_end) in absorbed {
            end = end.max(absorbed_end);
            self.intervals.remove(&absorbed_start);
        }

        self.intervals.insert(start, end);
    }

    /// Check if a page number is included.
    pub fn contains(&self, page: PageIndex) -> bool {
        self.intervals
            .range(..=page)
            .next_back()
            .is_some_and(|(_, &end)| page <= end)
    }

    /// Number of pages in the set.
    pub fn len(&self) -> usize {
        self.intervals
            .iter()
            .map(|(&start, &end)| (end - start) as usize + 1)
            .sum()
    }

    /// Whether the set holds no pages.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// The merged intervals, ascending.
    pub fn intervals(&self) -> impl Iterator<Item = RangeInclusive<PageIndex>> + '_ {
        self.intervals.iter().map(|(&start, &end)| start..=end)
    }

    /// Iterate the pages in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PageIndex> + '_ {
        self.intervals().flatten()
    }

    /// The pages as an ascending vector.
    pub fn to_vec(&self) -> Vec<PageIndex> {
        self.iter().collect()
    }
}

impl FromStr for PageRangeSet {
    type Err = PdfOpsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Canonical form: comma-joined ascending intervals, `a-b` for runs and a
/// bare number for single pages.
impl fmt::Display for PageRangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .intervals
            .iter()
            .map(|(start, end)| {
                if start == end {
                    start.to_string()
                } else {
                    format!("{start}-{end}")
                }
            })
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

/// Saturating conversion of a page count to the largest page number.
pub(crate) fn to_page_index(count: usize) -> PageIndex {
    PageIndex::try_from(count).unwrap_or(PageIndex::MAX)
}

fn parse_page(part: &str, token: &str) -> Result<PageIndex> {
    let part = part.trim();
    let page: PageIndex = part
        .parse()
        .map_err(|err| PdfOpsError::malformed_range(token, format!("'{part}': {err}")))?;

    if page == 0 {
        return Err(PdfOpsError::malformed_range(
            token,
            "page numbers start at 1",
        ));
    }

    Ok(page)
}
