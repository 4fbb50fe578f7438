//! Pagination and the computed result view.

use std::num::NonZeroUsize;

use serde::Serialize;

/// Splits an ordered sequence into one page.
///
/// Pages are 1-based; page 0 is treated as page 1. Returns the items of the
/// requested page and the total page count, `ceil(len / page_size)`. A page
/// past the end yields no items.
pub fn paginate<T>(ordered: Vec<T>, page: usize, page_size: NonZeroUsize) -> (Vec<T>, usize) {
    let size = page_size.get();
    let total_pages = ordered.len().div_ceil(size);
    let start = page.max(1).saturating_sub(1).saturating_mul(size);
    if start >= ordered.len() {
        return (Vec::new(), total_pages);
    }
    let items = ordered.into_iter().skip(start).take(size).collect();
    (items, total_pages)
}

/// The paginated, ordered subset of records matching a query.
#[derive(Debug, PartialEq, Serialize)]
pub struct ResultView<'a, T> {
    /// Records on the requested page, in query order.
    pub items: Vec<&'a T>,
    /// Number of records matching search and filters, across all pages.
    pub total_matched: usize,
    /// The page these items belong to (1-based).
    pub page: usize,
    /// Page size the view was computed with.
    pub page_size: usize,
    /// Total number of pages (0 when nothing matched).
    pub total_pages: usize,
}

impl<'a, T> ResultView<'a, T> {
    /// Returns `true` if the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }

    /// Returns the 1-based inclusive item range shown, for
    /// "Showing X-Y of Z" labels. `None` when the page is empty.
    pub fn showing(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page - 1) * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }
}
