//! Query builder and executor.
//!
//! The [`Query`] struct holds the current state of a list page (search
//! text, accepted filter values, numeric bounds, sort key and page) and
//! runs it against a record slice with [`run_query`]. [`QueryUpdate`]
//! expresses the changes a user makes to that state.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{QueryError, Result};
use crate::filter::{filter, AcceptedValues, Bound, FilterValue, Filters};
use crate::op::Op;
use crate::page::{paginate, ResultView};
use crate::record::Record;
use crate::search::search;
use crate::sort::{sort, Dir, SortKey};
use crate::value::Number;

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => panic!("default page size must be non-zero"),
};

/// The state of one list page.
///
/// # Example
///
/// ```
/// use influbazzar_query::{Query, Op};
///
/// let query = Query::new()
///     .search("kapoor")
///     .filter("category", ["Beauty", "Tech"])
///     .bound("followers", Op::Gte, 10000i64)
///     .order_desc("engagement")
///     .page(2)
///     .build();
///
/// assert_eq!(query.page_number(), 2);
/// assert_eq!(query.sort_key().unwrap().field, "engagement");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    #[serde(rename = "search", skip_serializing_if = "String::is_empty")]
    search_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_fields: Option<Vec<String>>,
    #[serde(flatten)]
    filters: Filters,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<SortKey>,
    page: usize,
    page_size: NonZeroUsize,
}

impl Default for Query {
    fn default() -> Self {
        Query {
            search_text: String::new(),
            search_fields: None,
            filters: Filters::default(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Query {
    /// Creates a new empty query.
    ///
    /// An empty query returns the first page of all records in input order.
    pub fn new() -> Self {
        Query::default()
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Sets the free-text search.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Overrides the record schema's searchable fields.
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the accepted values for a filter field.
    pub fn filter<V, I>(mut self, field: &str, values: I) -> Self
    where
        V: Into<FilterValue>,
        I: IntoIterator<Item = V>,
    {
        self.filters = self.filters.accept(field, values);
        self
    }

    /// Sets a filter field from a single dropdown selection.
    ///
    /// `"all"` clears the constraint.
    pub fn select(mut self, field: &str, selection: &str) -> Self {
        self.filters
            .accepted
            .insert(field.to_string(), AcceptedValues::selection(selection));
        self
    }

    /// Adds a numeric bound.
    pub fn bound(mut self, field: &str, op: Op, value: impl Into<Number>) -> Self {
        self.filters = self.filters.bound(field, op, value);
        self
    }

    /// Sets the sort key.
    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        self.sort = Some(SortKey::new(field, dir));
        self
    }

    /// Sorts ascending by a field.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Sorts descending by a field.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    /// Sets the 1-based page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    pub fn page_size(mut self, size: NonZeroUsize) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the page size from an unchecked count.
    ///
    /// Returns an error if `size` is zero.
    pub fn try_page_size(self, size: usize) -> Result<Self> {
        let size = NonZeroUsize::new(size).ok_or(QueryError::ZeroPageSize)?;
        Ok(self.page_size(size))
    }

    /// Finalizes the query (no-op, for API clarity).
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the search text.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Returns the explicit search fields, if set.
    pub fn searched_fields(&self) -> Option<&[String]> {
        self.search_fields.as_deref()
    }

    /// Returns the filters and bounds.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Returns the sort key, if any.
    pub fn sort_key(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    /// Returns the requested page number.
    pub fn page_number(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Returns `true` if the query narrows or reorders nothing.
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.filters.is_empty() && self.sort.is_none()
    }

    // ========================================================================
    // Updates
    // ========================================================================

    /// Applies a user change to the query.
    ///
    /// Any change to search, filters, sort or page size returns to page 1.
    pub fn apply(&mut self, update: QueryUpdate) {
        trace!(?update, "applying query update");
        match update {
            QueryUpdate::Search(text) => self.search_text = text,
            QueryUpdate::SetFilter { field, values } => {
                self.filters.accepted.insert(field, values);
            }
            QueryUpdate::ToggleFilter { field, value } => {
                self.filters.accepted.entry(field).or_default().toggle(value);
            }
            QueryUpdate::ClearFilter(field) => {
                self.filters.accepted.remove(&field);
            }
            QueryUpdate::ClearFilters => self.filters.accepted.clear(),
            QueryUpdate::AddBound(bound) => self.filters.bounds.push(bound),
            QueryUpdate::ClearBounds => self.filters.bounds.clear(),
            QueryUpdate::Sort(key) => self.sort = Some(key),
            QueryUpdate::ClearSort => self.sort = None,
            QueryUpdate::PageSize(size) => self.page_size = size,
            QueryUpdate::Page(page) => {
                self.page = page;
                return;
            }
            QueryUpdate::NextPage => {
                self.page = self.page.max(1).saturating_add(1);
                return;
            }
            QueryUpdate::PreviousPage => {
                self.page = self.page.saturating_sub(1).max(1);
                return;
            }
        }
        self.page = 1;
    }

    /// Runs this query against a record slice.
    pub fn run<'a, T: Record>(&self, records: &'a [T]) -> ResultView<'a, T> {
        run_query(records, self)
    }

    /// Counts the records matching search and filters, ignoring pagination.
    pub fn count<T: Record>(&self, records: &[T]) -> usize {
        run_query(records, self).total_matched
    }
}

/// A change a user makes to a list page.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryUpdate {
    /// Replace the search text.
    Search(String),
    /// Replace the accepted values of one field.
    SetFilter { field: String, values: AcceptedValues },
    /// Add or remove one accepted value.
    ToggleFilter { field: String, value: FilterValue },
    /// Remove the constraint on one field.
    ClearFilter(String),
    /// Remove every accepted-value constraint.
    ClearFilters,
    /// Add a numeric bound.
    AddBound(Bound),
    /// Remove every numeric bound.
    ClearBounds,
    /// Replace the sort key.
    Sort(SortKey),
    /// Return to input order.
    ClearSort,
    /// Change the page size.
    PageSize(NonZeroUsize),
    /// Jump to a page.
    Page(usize),
    /// Advance one page.
    NextPage,
    /// Go back one page, stopping at page 1.
    PreviousPage,
}

/// Computes the visible page of `records` for `query`.
///
/// Search runs first, then filters, then the sort, then pagination. Sort
/// keys the record schema does not declare sortable are ignored, except
/// dotted paths into a nested object. The input slice is never modified.
///
/// # Example
///
/// ```
/// use influbazzar_query::{run_query, Number, Query, Record, Value};
///
/// struct Faq {
///     question: &'static str,
///     views: u32,
/// }
///
/// impl Record for Faq {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "question" => Value::String(self.question),
///             "views" => Value::Number(Number::from(self.views)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let faqs = [
///     Faq { question: "How do payouts work?", views: 40 },
///     Faq { question: "How do I verify my account?", views: 90 },
/// ];
///
/// let query = Query::new().search_fields(["question"]).search("verify");
/// let view = run_query(&faqs, &query);
/// assert_eq!(view.total_matched, 1);
/// assert_eq!(view.items[0].views, 90);
/// ```
pub fn run_query<'a, T: Record>(records: &'a [T], query: &Query) -> ResultView<'a, T> {
    let schema = T::schema();
    let searched = match &query.search_fields {
        Some(fields) => search(records, &query.search_text, fields.as_slice()),
        None => search(records, &query.search_text, schema.searchable),
    };
    let matched = filter(searched, &query.filters);
    let total_matched = matched.len();

    let ordered = match &query.sort {
        Some(key) if schema.can_sort(&key.field) || reaches_nested(&matched, &key.field) => {
            sort(matched, key)
        }
        Some(key) => {
            debug!(field = %key.field, "ignoring sort on undeclared field");
            matched
        }
        None => matched,
    };

    let page = query.page.max(1);
    let (items, total_pages) = paginate(ordered, page, query.page_size);
    debug!(
        total = records.len(),
        matched = total_matched,
        page,
        total_pages,
        "ran list query"
    );

    ResultView {
        items,
        total_matched,
        page,
        page_size: query.page_size.get(),
        total_pages,
    }
}

/// Whether `path` is dotted and its head is a nested object on some record.
fn reaches_nested<T: Record>(records: &[&T], path: &str) -> bool {
    match path.split_once('.') {
        Some((head, _)) => records.iter().any(|r| r.field_value(head).is_nested()),
        None => false,
    }
}
