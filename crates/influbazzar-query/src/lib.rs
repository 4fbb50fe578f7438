//! In-memory list query engine.
//!
//! Every list page in Influbazzar (creators, campaigns, earnings, FAQs)
//! derives what it shows from the same steps: a free-text search over
//! declared fields, accepted-value filters per field, an optional sort key
//! and a page. This crate implements that pipeline once, for any type
//! implementing [`Record`].
//!
//! # Quick Start
//!
//! ```rust
//! use influbazzar_query::{Number, Query, Record, Schema, Value};
//!
//! struct Creator {
//!     name: String,
//!     category: String,
//!     engagement: f64,
//! }
//!
//! impl Record for Creator {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "name" => Value::String(&self.name),
//!             "category" => Value::String(&self.category),
//!             "engagement" => Value::Number(Number::F64(self.engagement)),
//!             _ => Value::None,
//!         }
//!     }
//!
//!     fn schema() -> Schema {
//!         Schema {
//!             searchable: &["name"],
//!             filterable: &["category"],
//!             sortable: &["engagement"],
//!         }
//!     }
//! }
//!
//! let creators = vec![
//!     Creator { name: "Ajay Singh".into(), category: "Tech".into(), engagement: 6.8 },
//!     Creator { name: "Sneha Kapoor".into(), category: "Beauty".into(), engagement: 7.2 },
//!     Creator { name: "Rajat Verma".into(), category: "Fitness".into(), engagement: 5.9 },
//! ];
//!
//! let view = Query::new()
//!     .filter("category", ["Beauty", "Tech"])
//!     .order_desc("engagement")
//!     .run(&creators);
//!
//! assert_eq!(view.total_matched, 2);
//! assert_eq!(view.items[0].name, "Sneha Kapoor");
//! ```
//!
//! # Pipeline
//!
//! ```text
//! records ─▶ search ─▶ filter ─▶ sort ─▶ paginate ─▶ ResultView
//! ```
//!
//! - **Search**: case-insensitive substring over the schema's searchable
//!   fields. Empty text matches everything.
//! - **Filter**: each field with a non-empty accepted set must match one of
//!   its values; list fields match if any element is accepted. Numeric
//!   [`Bound`]s must all hold. Empty sets impose nothing.
//! - **Sort**: stable; records missing the key go last in either direction.
//! - **Paginate**: 1-based pages, `total_pages = ceil(matched / page_size)`.
//!
//! Each step is also available on its own ([`search`], [`filter`], [`sort`],
//! [`paginate`]) and [`facets`] counts distinct values for dropdowns.
//!
//! # Field Types
//!
//! | Type | Search | Filter | Sort |
//! |------|--------|--------|------|
//! | String | substring | exact | lexicographic, case-sensitive |
//! | Number | decimal form | numeric equality, bounds | numeric |
//! | Enum | label | label | label |
//! | Bool | no | `true`/`false` | `false < true` |
//! | List | any element | any element | element-wise |

mod error;
mod facets;
mod filter;
mod op;
mod page;
mod query;
mod record;
mod search;
mod sort;
mod value;

pub use error::{QueryError, Result};
pub use facets::{facets, FacetCount};
pub use filter::{filter, parse_filter, AcceptedValues, Bound, FilterValue, Filters, ALL};
pub use op::Op;
pub use page::{paginate, ResultView};
pub use query::{run_query, Query, QueryUpdate, DEFAULT_PAGE_SIZE};
pub use record::{lookup, Record, RecordEnum, Schema};
pub use search::{search, SearchText};
pub use sort::{compare_values, sort, Dir, SortKey};
pub use value::{Number, Value};
