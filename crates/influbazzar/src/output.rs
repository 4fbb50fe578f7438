//! Output modes and rendering.
//!
//! [`OutputMode`] determines how command output is formatted, from a styled
//! terminal table to structured data serialization.

use clap::ValueEnum;
use console::{measure_text_width, pad_str, Alignment, Style};
use influbazzar_query::{FacetCount, ResultView};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::Listing;

/// Controls how output is rendered.
///
/// This is the user-facing enum for the `--output` CLI flag.
///
/// - `Auto` - Detect terminal capabilities (TTY → Term, pipe → Text)
/// - `Term` - Always apply terminal styling
/// - `Text` - Never apply styling
/// - `Json`, `Yaml`, `Csv` - Serialize data directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Auto-detect: TTY gets Term, pipe gets Text
    #[default]
    Auto,
    /// Always use terminal styling
    Term,
    /// Plain text table
    Text,
    /// Serialize data as JSON
    Json,
    /// Serialize data as YAML
    Yaml,
    /// Serialize items as CSV rows
    Csv,
}

impl OutputMode {
    /// Returns true if this is a structured output mode (JSON, YAML, CSV).
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml | OutputMode::Csv)
    }

    /// Resolves Auto mode to concrete Term or Text based on TTY detection.
    ///
    /// For non-Auto modes, returns self unchanged.
    pub fn resolve_auto(&self) -> OutputMode {
        match self {
            OutputMode::Auto => {
                if atty::is(atty::Stream::Stdout) {
                    OutputMode::Term
                } else {
                    OutputMode::Text
                }
            }
            other => *other,
        }
    }

    /// Whether text output should carry ANSI styling.
    pub fn is_styled(&self) -> bool {
        self.resolve_auto() == OutputMode::Term
    }
}

/// Errors that can occur during serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(String),

    #[error("Not a structured output mode")]
    NotStructured,
}

/// Serializes data to the specified structured format.
///
/// Returns an error if the output mode is not a structured mode.
pub fn serialize_structured<T: Serialize + ?Sized>(
    data: &T,
    mode: OutputMode,
) -> Result<String, SerializeError> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputMode::Csv => serialize_csv(data),
        _ => Err(SerializeError::NotStructured),
    }
}

/// Serializes data to CSV format.
///
/// The data is first converted to JSON, then flattened for CSV output.
pub fn serialize_csv<T: Serialize + ?Sized>(data: &T) -> Result<String, SerializeError> {
    let json_value = serde_json::to_value(data)?;
    flatten_json_to_csv(&json_value)
}

/// Lays a JSON value out as a table: an array of objects becomes one row per
/// object under the first object's keys, an object becomes key/value rows and
/// anything else a single `value` column.
fn flatten_json_to_csv(value: &Value) -> Result<String, SerializeError> {
    let (headers, rows): (Vec<&str>, Vec<Vec<String>>) = match value {
        Value::Array(arr) if arr.is_empty() => return Ok(String::new()),
        Value::Array(arr) => match arr.first() {
            Some(Value::Object(first)) => {
                let headers: Vec<&str> = first.keys().map(String::as_str).collect();
                let rows = arr
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|obj| {
                        headers
                            .iter()
                            .map(|h| obj.get(*h).map(value_to_string).unwrap_or_default())
                            .collect()
                    })
                    .collect();
                (headers, rows)
            }
            _ => (
                vec!["value"],
                arr.iter().map(|item| vec![value_to_string(item)]).collect(),
            ),
        },
        Value::Object(obj) => (
            vec!["key", "value"],
            obj.iter()
                .map(|(k, v)| vec![k.clone(), value_to_string(v)])
                .collect(),
        ),
        scalar => (vec!["value"], vec![vec![value_to_string(scalar)]]),
    };
    write_csv(&headers, &rows)
}

/// Converts a JSON value to a cell string.
fn value_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

// ============================================================================
// Text rendering
// ============================================================================

/// Renders a result page in the given mode.
///
/// JSON and YAML serialize the whole view. CSV and the text table show the
/// listing's columns for the items on the page; the table adds a
/// "Showing X-Y of Z" footer.
pub fn render_view<T: Listing>(
    view: &ResultView<'_, T>,
    mode: OutputMode,
) -> Result<String, SerializeError> {
    match mode {
        OutputMode::Csv => write_csv(T::COLUMNS, &column_rows::<T>(&view.items)?),
        m if m.is_structured() => serialize_structured(view, m),
        m => {
            let styled = m.is_styled();
            if view.is_empty() {
                let message = if view.total_matched == 0 {
                    format!("No {} match.", T::PLURAL)
                } else {
                    format!(
                        "Page {} is past the end ({} pages).",
                        view.page, view.total_pages
                    )
                };
                return Ok(dim(styled).apply_to(message).to_string());
            }
            let rows = column_rows::<T>(&view.items)?;
            let mut out = render_table(T::COLUMNS, &rows, styled);
            if let Some((first, last)) = view.showing() {
                let footer = format!(
                    "Showing {}-{} of {} {} · page {} of {}",
                    first, last, view.total_matched, T::PLURAL, view.page, view.total_pages
                );
                out.push('\n');
                out.push_str(&dim(styled).apply_to(footer).to_string());
            }
            Ok(out)
        }
    }
}

/// Extracts the listing's columns from each item as cell strings.
fn column_rows<T: Listing>(items: &[&T]) -> Result<Vec<Vec<String>>, SerializeError> {
    items
        .iter()
        .map(|item| -> Result<Vec<String>, SerializeError> {
            let json = serde_json::to_value(item)?;
            Ok(T::COLUMNS
                .iter()
                .map(|col| json.get(*col).map(value_to_string).unwrap_or_default())
                .collect())
        })
        .collect()
}

fn write_csv(headers: &[&str], rows: &[Vec<String>]) -> Result<String, SerializeError> {
    let csv_err = |e: csv::Error| SerializeError::Csv(e.to_string());
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(headers).map_err(csv_err)?;
    for row in rows {
        wtr.write_record(row).map_err(csv_err)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| SerializeError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SerializeError::Csv(e.to_string()))
}

/// Renders facet counts in the given mode.
pub fn render_facets(
    field: &str,
    facets: &[FacetCount],
    mode: OutputMode,
) -> Result<String, SerializeError> {
    if mode.is_structured() {
        return serialize_structured(facets, mode);
    }
    let styled = mode.is_styled();
    if facets.is_empty() {
        return Ok(dim(styled)
            .apply_to(format!("No values for '{}'.", field))
            .to_string());
    }
    let rows: Vec<Vec<String>> = facets
        .iter()
        .map(|f| vec![f.value.clone(), f.count.to_string()])
        .collect();
    Ok(render_table(&[field, "count"], &rows, styled))
}

/// Renders an aligned table with an upper-cased header row.
pub fn render_table(columns: &[&str], rows: &[Vec<String>], styled: bool) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| measure_text_width(c)).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let header_style = Style::new().bold().force_styling(styled);
    let header: Vec<String> = columns.iter().map(|c| c.to_uppercase()).collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        header_style
            .apply_to(join_row(&header, &widths))
            .to_string(),
    );
    for row in rows {
        lines.push(join_row(row, &widths));
    }
    lines.join("\n")
}

fn join_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_str(cell, *width, Alignment::Left, None).into_owned())
        .collect();
    padded.join("  ").trim_end().to_string()
}

fn dim(styled: bool) -> Style {
    Style::new().dim().force_styling(styled)
}
