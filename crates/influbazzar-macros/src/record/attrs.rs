//! Attribute parsing for the Record derive macro.
//!
//! This module provides parsers for the `#[record(...)]` field attributes
//! used by the `Record` derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

/// The value type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    /// String field: `#[record(String)]`
    String,
    /// Number field: `#[record(Number)]`
    Number,
    /// Enum field: `#[record(Enum)]`
    Enum,
    /// Boolean field: `#[record(Bool)]`
    Bool,
    /// List of strings: `#[record(List)]`
    List,
    /// Nested record: `#[record(Nested)]`
    Nested,
}

const EXPECTED_TYPES: &str = "String, Number, Enum, Bool, List, Nested";

impl RecordType {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "String" | "string" => Some(RecordType::String),
            "Number" | "number" => Some(RecordType::Number),
            "Enum" | "enum" | "enumeration" => Some(RecordType::Enum),
            "Bool" | "bool" | "boolean" => Some(RecordType::Bool),
            "List" | "list" => Some(RecordType::List),
            "Nested" | "nested" => Some(RecordType::Nested),
            _ => None,
        }
    }

    /// Parse a record type from an identifier.
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        let name = ident.to_string();
        RecordType::from_name(&name).ok_or_else(|| {
            Error::new(
                ident.span(),
                format!(
                    "unknown record type: '{}'. Expected one of: {}",
                    name, EXPECTED_TYPES
                ),
            )
        })
    }

    /// Parse a record type from a string literal (`ty = "enum"`).
    pub fn from_literal(s: &str, span: Span) -> Result<Self> {
        RecordType::from_name(s).ok_or_else(|| {
            Error::new(
                span,
                format!(
                    "unknown record type: '{}'. Expected one of: {}",
                    s, EXPECTED_TYPES
                ),
            )
        })
    }
}

/// Field-level attributes from `#[record(...)]`.
#[derive(Debug, Clone)]
pub struct RecordAttr {
    /// The value type of this field.
    pub record_type: Option<RecordType>,
    /// Exclude this field entirely.
    pub skip: bool,
    /// Field wraps its value in `Option`.
    pub optional: bool,
    /// Custom field name for queries (default: field name).
    pub rename: Option<String>,
    /// Matched by free-text search.
    pub search: bool,
    /// Offered as a filter field.
    pub filter: bool,
    /// Usable as a sort key.
    pub sort: bool,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for RecordAttr {
    fn default() -> Self {
        RecordAttr {
            record_type: None,
            skip: false,
            optional: false,
            rename: None,
            search: false,
            filter: false,
            sort: false,
            span: Span::call_site(),
        }
    }
}

impl RecordAttr {
    /// Returns `true` if any of search, filter or sort was requested.
    pub fn has_roles(&self) -> bool {
        self.search || self.filter || self.sort
    }
}

fn string_literal(value: &syn::Expr, what: &str) -> Result<syn::LitStr> {
    match value {
        syn::Expr::Lit(syn::ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        other => Err(Error::new(
            other.span(),
            format!("{} must be a string literal", what),
        )),
    }
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) => {
                    let Some(ident) = p.get_ident() else {
                        return Err(Error::new(
                            p.span(),
                            "expected a record type, a role (search, filter, sort), optional, or skip",
                        ));
                    };
                    match ident.to_string().as_str() {
                        "skip" => attr.skip = true,
                        "optional" => attr.optional = true,
                        "search" => attr.search = true,
                        "filter" => attr.filter = true,
                        "sort" => attr.sort = true,
                        _ => {
                            attr.record_type = Some(RecordType::from_ident(ident)?);
                            attr.span = ident.span();
                        }
                    }
                }

                Meta::NameValue(nv) => {
                    if nv.path.is_ident("rename") {
                        attr.rename = Some(string_literal(&nv.value, "rename")?.value());
                    } else if nv.path.is_ident("ty") {
                        let lit = string_literal(&nv.value, "ty")?;
                        attr.record_type = Some(RecordType::from_literal(&lit.value(), lit.span())?);
                        attr.span = lit.span();
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename or ty",
                        ));
                    }
                }

                Meta::List(_) => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown record attribute. Expected a type, search, filter, sort, optional, skip, rename = \"...\", or ty = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[record(...)]` attributes from a field's attributes.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    for attr in attrs {
        if attr.path().is_ident("record") {
            return attr.parse_args::<RecordAttr>();
        }
    }
    Ok(RecordAttr::default())
}
