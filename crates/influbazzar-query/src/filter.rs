//! Accepted-value filters and numeric bounds.
//!
//! A filter field constrains a record to a set of accepted values. An empty
//! set imposes no constraint, which is how "All Categories" style dropdowns
//! are expressed. [`Bound`]s add numeric range checks such as
//! `followers >= 10000`. Records with a missing or mismatched field never
//! pass a constraint on that field.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::op::Op;
use crate::record::{lookup, Record};
use crate::value::{Number, Value};

/// Dropdown value meaning "no constraint".
pub const ALL: &str = "all";

/// A single accepted value for a filter field.
///
/// Text values also match numbers and booleans by their textual form, since
/// UI selections arrive as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// Text value, compared exactly.
    Text(String),
}

impl FilterValue {
    /// Tests this accepted value against a field value.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        match (self, value) {
            (FilterValue::Text(t), Value::String(s)) => t.as_str() == *s,
            (FilterValue::Text(t), Value::Enum(label)) => t.as_str() == *label,
            (FilterValue::Text(t), Value::List(items)) => items.iter().any(|item| item == t),
            (FilterValue::Text(t), Value::Bool(b)) => t.parse::<bool>().ok() == Some(*b),
            (FilterValue::Text(t), Value::Number(n)) => parse_number(t)
                .and_then(|parsed| n.compare(parsed))
                .is_some_and(|ordering| ordering == Ordering::Equal),
            (FilterValue::Number(expected), Value::Number(n)) => {
                n.compare(*expected) == Some(Ordering::Equal)
            }
            (FilterValue::Bool(expected), Value::Bool(b)) => expected == b,
            _ => false,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Bool(b) => write!(f, "{}", b),
            FilterValue::Number(n) => write!(f, "{}", n),
            FilterValue::Text(t) => f.write_str(t),
        }
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl From<Number> for FilterValue {
    fn from(n: Number) -> Self {
        FilterValue::Number(n)
    }
}

macro_rules! filter_value_from_number {
    ($($source:ty),+) => {
        $(
            impl From<$source> for FilterValue {
                fn from(n: $source) -> Self {
                    FilterValue::Number(Number::from(n))
                }
            }
        )+
    };
}

filter_value_from_number!(i32, i64, u32, u64, usize, f64);

/// Set of accepted values for one filter field, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AcceptedValues(Vec<FilterValue>);

impl AcceptedValues {
    /// Creates an empty set (no constraint).
    pub fn new() -> Self {
        AcceptedValues(Vec::new())
    }

    /// Builds a set from a dropdown selection.
    ///
    /// The [`ALL`] sentinel (any case) and the empty string mean no
    /// constraint.
    pub fn selection(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            AcceptedValues::new()
        } else {
            AcceptedValues(vec![FilterValue::from(value)])
        }
    }

    /// Adds a value; duplicates are ignored.
    pub fn insert(&mut self, value: impl Into<FilterValue>) -> bool {
        let value = value.into();
        if self.0.contains(&value) {
            false
        } else {
            self.0.push(value);
            true
        }
    }

    /// Removes a value, returning `true` if it was present.
    pub fn remove(&mut self, value: &FilterValue) -> bool {
        let before = self.0.len();
        self.0.retain(|v| v != value);
        self.0.len() != before
    }

    /// Adds the value if absent, removes it if present.
    pub fn toggle(&mut self, value: impl Into<FilterValue>) {
        let value = value.into();
        if !self.remove(&value) {
            self.0.push(value);
        }
    }

    /// Returns `true` if the value is in the set.
    pub fn contains(&self, value: &FilterValue) -> bool {
        self.0.contains(value)
    }

    /// Returns `true` if the set is empty (no constraint).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of accepted values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the accepted values.
    pub fn iter(&self) -> impl Iterator<Item = &FilterValue> {
        self.0.iter()
    }

    /// Tests a field value against the set.
    ///
    /// An empty set accepts everything, including missing fields.
    pub fn accepts(&self, value: &Value<'_>) -> bool {
        self.0.is_empty() || self.0.iter().any(|accepted| accepted.matches(value))
    }
}

impl<V: Into<FilterValue>> FromIterator<V> for AcceptedValues {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut set = AcceptedValues::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl fmt::Display for AcceptedValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(","))
    }
}

/// A numeric range constraint on one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    /// The field to compare (dotted paths reach nested objects).
    pub field: String,
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against.
    pub value: Number,
}

impl Bound {
    /// Creates a new bound.
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<Number>) -> Self {
        Bound {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Evaluates this bound against a field value.
    ///
    /// Non-numeric and missing values never match; neither does NaN.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match field_value {
            Value::Number(n) => n
                .compare(self.value)
                .is_some_and(|ordering| self.op.eval_ordering(ordering)),
            _ => false,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.op.symbol(), self.value)
    }
}

impl FromStr for Bound {
    type Err = QueryError;

    /// Parses `field<op>number`, e.g. `followers>=10000` or `rate<5000`.
    fn from_str(spec: &str) -> Result<Self> {
        let invalid = |reason| QueryError::InvalidBound {
            spec: spec.to_string(),
            reason,
        };

        let op_start = spec
            .find(['<', '>', '=', '!'])
            .ok_or_else(|| invalid("missing comparison operator"))?;
        let field = spec[..op_start].trim();
        if field.is_empty() {
            return Err(invalid("missing field name"));
        }

        let rest = &spec[op_start..];
        let op = Op::ALL
            .into_iter()
            .find(|op| rest.starts_with(op.symbol()))
            .ok_or_else(|| invalid("unknown comparison operator"))?;
        let value = parse_number(rest[op.symbol().len()..].trim())
            .ok_or_else(|| invalid("value is not a number"))?;

        Ok(Bound::new(field, op, value))
    }
}

/// Parses an integer or decimal number.
pub(crate) fn parse_number(s: &str) -> Option<Number> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(Number::I64(n));
    }
    if let Ok(n) = s.parse::<u64>() {
        return Some(Number::U64(n));
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite()).map(Number::F64)
}

/// Parses `field=value[,value...]` into a field name and accepted set.
///
/// An empty value list (`category=`) or the [`ALL`] sentinel yields an
/// empty set, i.e. no constraint.
pub fn parse_filter(spec: &str) -> Result<(String, AcceptedValues)> {
    let (field, values) = spec
        .split_once('=')
        .ok_or_else(|| QueryError::InvalidFilter(spec.to_string()))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(QueryError::InvalidFilter(spec.to_string()));
    }

    let accepted: AcceptedValues = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
        .collect();
    Ok((field.to_string(), accepted))
}

/// The active filter fields and bounds of a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    /// Accepted values per field.
    #[serde(default, rename = "filters", skip_serializing_if = "BTreeMap::is_empty")]
    pub accepted: BTreeMap<String, AcceptedValues>,
    /// Numeric range constraints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<Bound>,
}

impl Filters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Filters::default()
    }

    /// Sets the accepted values for a field, replacing any previous set.
    pub fn accept<V, I>(mut self, field: &str, values: I) -> Self
    where
        V: Into<FilterValue>,
        I: IntoIterator<Item = V>,
    {
        self.accepted
            .insert(field.to_string(), values.into_iter().collect());
        self
    }

    /// Adds a numeric bound.
    pub fn bound(mut self, field: &str, op: Op, value: impl Into<Number>) -> Self {
        self.bounds.push(Bound::new(field, op, value));
        self
    }

    /// Returns `true` if no field or bound constrains anything.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty() && self.accepted.values().all(AcceptedValues::is_empty)
    }

    /// Returns the fields with a non-empty accepted set.
    pub fn active_fields(&self) -> impl Iterator<Item = (&str, &AcceptedValues)> {
        self.accepted
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(field, set)| (field.as_str(), set))
    }

    /// Tests a record against every active field and bound.
    pub fn matches<T: Record>(&self, record: &T) -> bool {
        self.active_fields()
            .all(|(field, set)| set.accepts(&lookup(record, field)))
            && self
                .bounds
                .iter()
                .all(|bound| bound.matches(&lookup(record, &bound.field)))
    }

    /// Human-readable summary, e.g. `category=Beauty,Tech; followers>=10000`.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self
            .active_fields()
            .map(|(field, set)| format!("{}={}", field, set))
            .collect();
        parts.extend(self.bounds.iter().map(ToString::to_string));
        parts.join("; ")
    }
}

/// Keeps the records that pass every active filter field and bound.
pub fn filter<'a, T, I>(records: I, filters: &Filters) -> Vec<&'a T>
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|record| filters.matches(*record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Creator {
        name: &'static str,
        category: String,
        followers: u64,
        verified: bool,
        platforms: Vec<String>,
    }

    impl Record for Creator {
        fn field_value(&self, field: &str) -> Value<'_> {
            match field {
                "name" => Value::String(self.name),
                "category" => Value::String(&self.category),
                "followers" => Value::Number(Number::U64(self.followers)),
                "verified" => Value::Bool(self.verified),
                "platforms" => Value::List(&self.platforms),
                _ => Value::None,
            }
        }
    }

    fn creator(name: &'static str, category: &str, followers: u64, platforms: &[&str]) -> Creator {
        Creator {
            name,
            category: category.to_string(),
            followers,
            verified: followers > 50000,
            platforms: platforms.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn creators() -> Vec<Creator> {
        vec![
            creator("Sneha", "Beauty", 89000, &["Instagram", "YouTube"]),
            creator("Ajay", "Tech", 125000, &["YouTube"]),
            creator("Rajat", "Fitness", 45000, &["Instagram"]),
        ]
    }

    fn names(records: &[&Creator]) -> Vec<&'static str> {
        records.iter().map(|c| c.name).collect()
    }

    #[test]
    fn single_category_filter() {
        let creators = creators();
        let filters = Filters::new().accept("category", ["Beauty"]);
        assert_eq!(names(&filter(&creators, &filters)), vec!["Sneha"]);
    }

    #[test]
    fn multiple_accepted_values() {
        let creators = creators();
        let filters = Filters::new().accept("category", ["Beauty", "Tech"]);
        assert_eq!(names(&filter(&creators, &filters)), vec!["Sneha", "Ajay"]);
    }

    #[test]
    fn empty_set_imposes_no_constraint() {
        let creators = creators();
        let filters = Filters::new().accept("category", Vec::<String>::new());
        assert!(filters.is_empty());
        assert_eq!(filter(&creators, &filters).len(), 3);
    }

    #[test]
    fn list_fields_intersect() {
        let creators = creators();
        let filters = Filters::new().accept("platforms", ["Instagram"]);
        assert_eq!(names(&filter(&creators, &filters)), vec!["Sneha", "Rajat"]);
    }

    #[test]
    fn filters_combine_with_and() {
        let creators = creators();
        let filters = Filters::new()
            .accept("platforms", ["YouTube"])
            .accept("category", ["Tech", "Fitness"]);
        assert_eq!(names(&filter(&creators, &filters)), vec!["Ajay"]);
    }

    #[test]
    fn missing_field_excludes_record() {
        let creators = creators();
        let filters = Filters::new().accept("language", ["Hindi"]);
        assert!(filter(&creators, &filters).is_empty());
    }

    #[test]
    fn text_matches_bool_and_number_fields() {
        let creators = creators();
        let verified = Filters::new().accept("verified", ["true"]);
        assert_eq!(names(&filter(&creators, &verified)), vec!["Sneha", "Ajay"]);

        let exact = Filters::new().accept("followers", ["45000"]);
        assert_eq!(names(&filter(&creators, &exact)), vec!["Rajat"]);
    }

    #[test]
    fn typed_values_match_their_kind_only() {
        let creators = creators();
        let filters = Filters::new().accept("verified", [false]);
        assert_eq!(names(&filter(&creators, &filters)), vec!["Rajat"]);

        let mismatch = Filters::new().accept("category", [5i64]);
        assert!(filter(&creators, &mismatch).is_empty());
    }

    #[test]
    fn bounds_apply_numerically() {
        let creators = creators();
        let filters = Filters::new()
            .bound("followers", Op::Gte, 50000u64)
            .bound("followers", Op::Lt, 100000u64);
        assert_eq!(names(&filter(&creators, &filters)), vec!["Sneha"]);
    }

    #[test]
    fn bound_on_non_numeric_field_excludes() {
        let creators = creators();
        let filters = Filters::new().bound("category", Op::Gt, 0i64);
        assert!(filter(&creators, &filters).is_empty());
    }

    #[test]
    fn accepted_values_toggle() {
        let mut set = AcceptedValues::new();
        set.toggle("Beauty");
        set.toggle("Tech");
        assert_eq!(set.len(), 2);
        set.toggle("Beauty");
        assert_eq!(set.len(), 1);
        assert!(set.contains(&FilterValue::from("Tech")));
        assert!(!set.insert("Tech"));
    }

    #[test]
    fn selection_sentinel() {
        assert!(AcceptedValues::selection("All").is_empty());
        assert!(AcceptedValues::selection("").is_empty());
        assert_eq!(AcceptedValues::selection("Beauty").len(), 1);
    }

    #[test]
    fn parse_filter_specs() {
        let (field, set) = parse_filter("category=Beauty, Tech").unwrap();
        assert_eq!(field, "category");
        assert_eq!(set.to_string(), "Beauty,Tech");

        let (_, all) = parse_filter("category=all").unwrap();
        assert!(all.is_empty());

        let (_, none) = parse_filter("category=").unwrap();
        assert!(none.is_empty());

        assert_eq!(
            parse_filter("category"),
            Err(QueryError::InvalidFilter("category".to_string()))
        );
        assert!(parse_filter("=Beauty").is_err());
    }

    #[test]
    fn parse_bounds() {
        let bound: Bound = "followers>=10000".parse().unwrap();
        assert_eq!(bound, Bound::new("followers", Op::Gte, 10000i64));

        let bound: Bound = "rating > 4.5".parse().unwrap();
        assert_eq!(bound, Bound::new("rating", Op::Gt, 4.5f64));

        let bound: Bound = "budget!=0".parse().unwrap();
        assert_eq!(bound.op, Op::Ne);

        assert!("followers".parse::<Bound>().is_err());
        assert!(">=5".parse::<Bound>().is_err());
        assert!("followers>=many".parse::<Bound>().is_err());
    }

    #[test]
    fn summary_lists_active_constraints() {
        let filters = Filters::new()
            .accept("category", ["Beauty", "Tech"])
            .accept("location", Vec::<String>::new())
            .bound("followers", Op::Gte, 10000i64);
        assert_eq!(filters.summary(), "category=Beauty,Tech; followers>=10000");
    }
}
