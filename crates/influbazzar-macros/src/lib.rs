//! Proc macros for Influbazzar.
//!
//! # Available Macros
//!
//! - [`Record`] - Generate field access and the search/filter/sort schema
//!   for the list query engine in `influbazzar-query`

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for listable structs.
///
/// This macro generates an implementation of the `Record` trait from
/// `influbazzar-query`, so a struct can be searched, filtered, sorted and
/// paginated by field name. Field roles are declared once on the struct
/// instead of being repeated on every list page.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String` | Text field (`String` or `&str`) |
/// | `Number` | Numeric field, any primitive number type |
/// | `Enum` | Enum field, requires a `RecordEnum` impl |
/// | `Bool` | Boolean field |
/// | `List` | `Vec<String>` field; search and filters look at each element |
/// | `Nested` | Field whose type also implements `Record`, reachable as `outer.inner` |
/// | `search` | Include in free-text search |
/// | `filter` | Offer as a filter field |
/// | `sort` | Allow as a sort key |
/// | `optional` | The field is an `Option<_>`; `None` reads as a missing value |
/// | `skip` | Exclude this field from queries |
/// | `rename = "..."` | Use a custom name for queries |
/// | `ty = "..."` | Give the type as a string, e.g. `ty = "enum"` |
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Field name constants (e.g., `Creator::NAME`, `Creator::FOLLOWERS`)
/// 2. `Record::field_value()` matching on the query names
/// 3. `Record::schema()` listing searchable, filterable and sortable fields
///
/// # Example
///
/// ```ignore
/// use influbazzar_macros::Record;
/// use influbazzar_query::{Query, Record};
///
/// #[derive(Record)]
/// struct Creator {
///     #[record(String, search, sort)]
///     name: String,
///
///     #[record(String, search, filter)]
///     category: String,
///
///     #[record(Number, sort)]
///     followers: u64,
///
///     #[record(Number, optional, sort)]
///     rating: Option<f64>,
///
///     #[record(List, filter)]
///     platforms: Vec<String>,
///
///     #[record(skip)]
///     internal_id: u64,
/// }
///
/// let view = Query::new()
///     .filter(Creator::CATEGORY, ["Beauty"])
///     .order_desc(Creator::FOLLOWERS)
///     .run(&creators);
/// ```
///
/// # Enum Fields
///
/// For enum fields, implement `RecordEnum` on your enum type:
///
/// ```ignore
/// use influbazzar_query::RecordEnum;
///
/// enum CampaignStatus { Active, Completed }
///
/// impl RecordEnum for CampaignStatus {
///     fn label(&self) -> &'static str {
///         match self {
///             CampaignStatus::Active => "Active",
///             CampaignStatus::Completed => "Completed",
///         }
///     }
/// }
///
/// #[derive(Record)]
/// struct Campaign {
///     #[record(Enum, filter)]
///     status: CampaignStatus,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
