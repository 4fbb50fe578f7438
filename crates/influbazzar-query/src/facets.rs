//! Distinct-value counts for building filter dropdowns.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::{lookup, Record};
use crate::value::Value;

/// One distinct value of a field and how many records carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Counts the distinct values of `field` across `records`.
///
/// Values appear in the order they are first seen. Each element of a list
/// field counts once per record; records missing the field are skipped.
pub fn facets<'a, T, I>(records: I, field: &str) -> Vec<FacetCount>
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut counts: Vec<FacetCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        for text in facet_texts(lookup(record, field)) {
            match index.get(&text) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(text.clone(), counts.len());
                    counts.push(FacetCount {
                        value: text,
                        count: 1,
                    });
                }
            }
        }
    }
    counts
}

fn facet_texts(value: Value<'_>) -> Vec<String> {
    match value {
        Value::Bool(b) => vec![b.to_string()],
        Value::List(items) => {
            let mut texts: Vec<String> = Vec::with_capacity(items.len());
            for item in items {
                if !texts.contains(item) {
                    texts.push(item.clone());
                }
            }
            texts
        }
        other => other
            .search_texts()
            .into_iter()
            .map(|text| text.into_owned())
            .collect(),
    }
}
