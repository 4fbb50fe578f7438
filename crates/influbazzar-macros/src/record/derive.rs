//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates an implementation of the `Record` trait, its
//! `Schema`, and field name constants for type-safe query building.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, LitStr, Result};

use super::attrs::{parse_record_attrs, RecordType};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut searchable: Vec<LitStr> = Vec::new();
    let mut filterable: Vec<LitStr> = Vec::new();
    let mut sortable: Vec<LitStr> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_record_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let record_type = match attrs.record_type {
            Some(t) => t,
            None if attrs.has_roles() => {
                return Err(Error::new(
                    field.span(),
                    "search, filter and sort require a record type, e.g. #[record(String, search)]",
                ))
            }
            None => continue,
        };

        if record_type == RecordType::Nested && attrs.has_roles() {
            return Err(Error::new(
                attrs.span,
                "nested fields cannot be searched, filtered or sorted directly; use a dotted path",
            ));
        }

        let query_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let name_lit = LitStr::new(&query_name, field_name.span());
        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));

        field_constants.push(quote! {
            /// Field name constant for type-safe queries.
            pub const #const_name: &'static str = #query_name;
        });

        if attrs.search {
            searchable.push(name_lit.clone());
        }
        if attrs.filter {
            filterable.push(name_lit.clone());
        }
        if attrs.sort {
            sortable.push(name_lit);
        }

        let value_expr = if attrs.optional {
            let inner = value_tokens(record_type, quote! { value }, true);
            quote! {
                match &self.#field_name {
                    ::core::option::Option::Some(value) => #inner,
                    ::core::option::Option::None => ::influbazzar_query::Value::None,
                }
            }
        } else {
            value_tokens(record_type, quote! { self.#field_name }, false)
        };

        field_matches.push(quote! {
            #query_name => #value_expr,
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::influbazzar_query::Record for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::influbazzar_query::Value<'_> {
                match field {
                    #(#field_matches)*
                    _ => ::influbazzar_query::Value::None,
                }
            }

            fn schema() -> ::influbazzar_query::Schema {
                ::influbazzar_query::Schema {
                    searchable: &[#(#searchable),*],
                    filterable: &[#(#filterable),*],
                    sortable: &[#(#sortable),*],
                }
            }
        }
    };

    Ok(expanded)
}

/// Builds the `Value` expression for one field.
///
/// `place` is either `self.field` or, for optional fields, a `value`
/// binding that is already a reference.
fn value_tokens(record_type: RecordType, place: TokenStream, by_ref: bool) -> TokenStream {
    let borrowed = if by_ref {
        quote! { #place }
    } else {
        quote! { &#place }
    };
    let copied = if by_ref {
        quote! { *#place }
    } else {
        quote! { #place }
    };

    match record_type {
        RecordType::String => quote! {
            ::influbazzar_query::Value::String(::core::convert::AsRef::<str>::as_ref(#borrowed))
        },
        RecordType::Number => quote! {
            ::influbazzar_query::Value::Number(::influbazzar_query::Number::from(#copied))
        },
        RecordType::Enum => quote! {
            ::influbazzar_query::Value::Enum(
                ::influbazzar_query::RecordEnum::label(#borrowed)
            )
        },
        RecordType::Bool => quote! {
            ::influbazzar_query::Value::Bool(#copied)
        },
        RecordType::List => quote! {
            ::influbazzar_query::Value::List(&(#borrowed)[..])
        },
        RecordType::Nested => quote! {
            ::influbazzar_query::Value::Nested(#borrowed)
        },
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(tokens: &str) -> Result<String> {
        let input: DeriveInput = syn::parse_str(tokens)?;
        record_derive_impl(input).map(|t| t.to_string())
    }

    #[test]
    fn screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("name"), "NAME");
        assert_eq!(to_screaming_snake_case("total_earned"), "TOTAL_EARNED");
        assert_eq!(to_screaming_snake_case("minFollowers"), "MIN_FOLLOWERS");
        assert_eq!(to_screaming_snake_case("audience-city"), "AUDIENCE_CITY");
    }

    #[test]
    fn schema_lists_roles_in_field_order() {
        let out = expand(
            r#"
            struct Creator {
                #[record(String, search, sort)]
                name: String,
                #[record(String, search, filter)]
                category: String,
                #[record(Number, sort)]
                followers: u64,
            }
            "#,
        )
        .unwrap();
        assert!(out.contains(r#"searchable : & ["name" , "category"]"#));
        assert!(out.contains(r#"filterable : & ["category"]"#));
        assert!(out.contains(r#"sortable : & ["name" , "followers"]"#));
        assert!(out.contains("pub const FOLLOWERS"));
    }

    #[test]
    fn unannotated_and_skipped_fields_are_omitted() {
        let out = expand(
            r#"
            struct Faq {
                #[record(String, search)]
                question: String,
                answer: String,
                #[record(skip)]
                internal: u32,
            }
            "#,
        )
        .unwrap();
        assert!(out.contains("QUESTION"));
        assert!(!out.contains("ANSWER"));
        assert!(!out.contains("INTERNAL"));
    }

    #[test]
    fn rename_changes_query_name() {
        let out = expand(
            r#"
            struct Creator {
                #[record(Number, sort, rename = "engagement")]
                engagement_rate: f64,
            }
            "#,
        )
        .unwrap();
        assert!(out.contains("pub const ENGAGEMENT"));
        assert!(out.contains(r#""engagement" =>"#));
    }

    #[test]
    fn roles_without_type_are_rejected() {
        let err = expand(
            r#"
            struct Creator {
                #[record(search)]
                name: String,
            }
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("require a record type"));
    }

    #[test]
    fn nested_roles_are_rejected() {
        let err = expand(
            r#"
            struct Creator {
                #[record(Nested, filter)]
                stats: Stats,
            }
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("nested fields"));
    }

    #[test]
    fn tuple_structs_are_rejected() {
        let err = expand("struct Pair(String, u32);").unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn enums_are_rejected() {
        let err = expand("enum Status { Active, Completed }").unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }
}
