//! Ordering types and the stable sort.
//!
//! Provides [`Dir`] for sort direction, [`SortKey`] for field-based ordering
//! and [`sort`], which decorates each record with its original position so
//! ties keep insertion order regardless of the underlying sort algorithm.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::record::{lookup, Record};
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Dir::Asc),
            "desc" | "descending" => Ok(Dir::Desc),
            _ => Err(QueryError::InvalidDirection(s.to_string())),
        }
    }
}

/// A sort key: the field to order by and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl SortKey {
    /// Creates a new ascending sort key for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortKey::new(field, Dir::Asc)
    }

    /// Creates a new descending sort key for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortKey::new(field, Dir::Desc)
    }

    /// Creates a new sort key with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortKey {
            field: field.into(),
            dir,
        }
    }

    /// Compares two records under this key.
    ///
    /// Records missing the field sort after those that have it, in either
    /// direction. Values of different kinds compare equal.
    pub fn compare<T: Record>(&self, a: &T, b: &T) -> Ordering {
        let va = lookup(a, &self.field);
        let vb = lookup(b, &self.field);
        match (va.is_none(), vb.is_none()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => compare_values(&va, &vb)
                .map(|ordering| self.dir.apply(ordering))
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.field, self.dir)
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    /// Parses `field` (ascending) or `field:asc|desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, dir) = match s.split_once(':') {
            Some((field, dir)) => (field.trim(), dir.parse::<Dir>()?),
            None => (s.trim(), Dir::Asc),
        };
        if field.is_empty() {
            return Err(QueryError::InvalidSortKey(s.to_string()));
        }
        Ok(SortKey::new(field, dir))
    }
}

/// Compares two values of the same kind.
///
/// Strings compare lexicographically and case-sensitively, numbers
/// numerically (NaN last), enums by label, booleans `false < true`, lists
/// element by element. Returns `None` for values of different kinds and for
/// nested objects.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => Some(a.total_cmp(*b)),
        (Value::Enum(a), Value::Enum(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::List(a), Value::List(b)) => Some(a.cmp(b)),
        (Value::None, Value::None) => Some(Ordering::Equal),
        _ => None,
    }
}

/// Orders records by `key`, keeping equal records in their input order.
///
/// Each record is paired with its original index and the index breaks ties,
/// so the result is stable in both directions. A key no record has leaves
/// the input order untouched.
pub fn sort<'a, T, I>(records: I, key: &SortKey) -> Vec<&'a T>
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut decorated: Vec<(usize, &'a T)> = records.into_iter().enumerate().collect();
    decorated.sort_unstable_by(|(ia, a), (ib, b)| key.compare(*a, *b).then(ia.cmp(ib)));
    decorated.into_iter().map(|(_, record)| record).collect()
}
