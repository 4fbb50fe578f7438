//! Traits for record field access.
//!
//! This module provides the [`Record`] trait, implemented by the
//! `#[derive(Record)]` macro from `influbazzar-macros`, and the [`Schema`]
//! that declares which fields each list page may search, filter and sort.

use crate::value::Value;

/// Trait for types that can be listed by the query engine.
///
/// This trait is typically derived using `#[derive(Record)]` from the
/// `influbazzar-macros` crate, but can also be implemented manually.
///
/// # Derive Usage
///
/// ```ignore
/// use influbazzar_macros::Record;
///
/// #[derive(Record)]
/// struct Creator {
///     #[record(String, search, sort)]
///     name: String,
///     #[record(String, filter)]
///     category: String,
///     #[record(Number, sort)]
///     engagement: f64,
/// }
///
/// assert_eq!(Creator::schema().searchable, &["name"]);
/// ```
///
/// # Manual Implementation
///
/// ```
/// use influbazzar_query::{Number, Record, Schema, Value};
///
/// struct Faq {
///     question: String,
///     views: u32,
/// }
///
/// impl Record for Faq {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "question" => Value::String(&self.question),
///             "views" => Value::Number(Number::from(self.views)),
///             _ => Value::None,
///         }
///     }
///
///     fn schema() -> Schema {
///         Schema {
///             searchable: &["question"],
///             filterable: &[],
///             sortable: &["views"],
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field for query comparison.
    ///
    /// Returns [`Value::None`] if the field doesn't exist or is not
    /// queryable.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Returns the field roles declared for this record type.
    fn schema() -> Schema
    where
        Self: Sized,
    {
        Schema::EMPTY
    }
}

/// Field roles declared once per entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Schema {
    /// Fields matched by free-text search.
    pub searchable: &'static [&'static str],
    /// Fields that accept a set of allowed values.
    pub filterable: &'static [&'static str],
    /// Fields that can be used as a sort key.
    pub sortable: &'static [&'static str],
}

impl Schema {
    /// A schema declaring no fields.
    pub const EMPTY: Schema = Schema {
        searchable: &[],
        filterable: &[],
        sortable: &[],
    };

    /// Returns `true` if `field` may be used as a sort key.
    ///
    /// A schema that declares no sortable fields accepts every key.
    pub fn can_sort(&self, field: &str) -> bool {
        self.sortable.is_empty() || self.sortable.contains(&field)
    }

    /// Returns `true` if `field` may be filtered on.
    ///
    /// A schema that declares no filterable fields accepts every field.
    pub fn can_filter(&self, field: &str) -> bool {
        self.filterable.is_empty() || self.filterable.contains(&field)
    }
}

/// Helper trait for exposing enum variants as labels.
///
/// Used by the `#[derive(Record)]` macro when a field is marked with
/// `#[record(Enum)]`. Labels are what filters match against and what
/// enum sorting compares.
///
/// # Example
///
/// ```
/// use influbazzar_query::RecordEnum;
///
/// enum CampaignStatus {
///     Active,
///     Completed,
/// }
///
/// impl RecordEnum for CampaignStatus {
///     fn label(&self) -> &'static str {
///         match self {
///             CampaignStatus::Active => "Active",
///             CampaignStatus::Completed => "Completed",
///         }
///     }
/// }
/// ```
pub trait RecordEnum {
    /// Returns the display label for this variant.
    fn label(&self) -> &'static str;
}

/// Resolves a possibly dotted field path against a record.
///
/// `"stats.top_city"` reads `stats` and, when it is a [`Value::Nested`]
/// object, reads `top_city` from it. Any other shape yields
/// [`Value::None`].
pub fn lookup<'a>(record: &'a dyn Record, path: &str) -> Value<'a> {
    match path.split_once('.') {
        None => record.field_value(path),
        Some((head, rest)) => match record.field_value(head) {
            Value::Nested(inner) => lookup(inner, rest),
            _ => Value::None,
        },
    }
}
