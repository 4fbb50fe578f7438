//! Free-text search over declared fields.

use crate::record::{lookup, Record};

/// Prepared, lower-cased search needle.
///
/// Lower-cased once per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchText {
    needle: String,
}

impl SearchText {
    /// Prepares a search needle from raw user input.
    pub fn new(text: &str) -> Self {
        SearchText {
            needle: text.to_lowercase(),
        }
    }

    /// Returns `true` if the needle is empty (matches everything).
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Tests whether any of `fields` contains the needle, case-insensitively.
    pub fn matches<T, S>(&self, record: &T, fields: &[S]) -> bool
    where
        T: Record,
        S: AsRef<str>,
    {
        if self.needle.is_empty() {
            return true;
        }
        fields.iter().any(|field| {
            lookup(record, field.as_ref())
                .search_texts()
                .iter()
                .any(|text| text.to_lowercase().contains(&self.needle))
        })
    }
}

/// Keeps the records whose searchable fields contain `text`.
///
/// Matching is a case-insensitive substring test. An empty `text` keeps
/// every record; an empty `fields` list with non-empty text keeps none.
pub fn search<'a, T, I, S>(records: I, text: &str, fields: &[S]) -> Vec<&'a T>
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
    S: AsRef<str>,
{
    let needle = SearchText::new(text);
    records
        .into_iter()
        .filter(|record| needle.matches(*record, fields))
        .collect()
}
