//! Derive macros for `logredact`.
//!
//! This crate generates the conversion code behind `#[derive(ToValue)]`. It:
//! - reads `#[value(...)]` container, variant and field attributes
//! - emits a `ToValue` implementation that builds a `logredact::Value`
//!
//! It does **not** redact anything. Redaction runs at log time in the main
//! `logredact` crate, on the values produced here.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_display_bounds, add_value_bounds};

/// Derives `logredact::ToValue` for structs and enums.
///
/// The generated value is what the redacting filter walks, so every text leaf
/// it contains is scanned when the value is attached to a log event.
///
/// # Shapes
///
/// - Named structs become a `Value::Mapping` keyed by field name.
/// - Tuple structs with one field stand for that field. Other tuple structs
///   become a `Value::Tuple`.
/// - Unit structs become `Value::Null`.
/// - Enum variants are tagged by name: unit variants become `Value::Text`,
///   other variants a one-entry mapping from the name to the content.
///
/// # Container Attributes
///
/// - `#[value(untagged)]` (enums only): emit variant content without the name.
///   Unit variants become `Value::Null`.
///
/// # Field Attributes
///
/// - **No annotation**: the field is converted with `ToValue`.
/// - `#[value(display)]`: the field is rendered with `Display` into text. Use
///   this for external types that print well but do not implement `ToValue`.
/// - `#[value(skip)]`: the field is left out.
/// - `#[value(rename = "key")]`: use `key` instead of the field name. Also
///   accepted on enum variants.
///
/// Unions are rejected at compile time.
#[proc_macro_derive(ToValue, attributes(value))]
pub fn derive_to_value(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the logredact crate root.
///
/// Handles crate renaming (e.g., `redact = { package = "logredact", ... }`)
/// and internal usage, which relies on `extern crate self as logredact`.
fn crate_root() -> TokenStream {
    match crate_name("logredact") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::logredact },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item_ident = syn::parse_str::<syn::Path>(item).expect("logredact crate path should parse");
    quote! { #root::#item_ident }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { untagged } = parse_container_options(&attrs)?;

    let (body, value_generics, display_generics) = match data {
        Data::Struct(data) => {
            if untagged {
                return Err(syn::Error::new(
                    data.struct_token.span(),
                    "`untagged` only applies to enums",
                ));
            }
            let output = derive_struct(data, &generics)?;
            (output.body, output.value_generics, output.display_generics)
        }
        Data::Enum(data) => {
            let output = derive_enum(&ident, data, &generics, untagged)?;
            (output.body, output.value_generics, output.display_generics)
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`ToValue` cannot be derived for unions",
            ));
        }
    };

    let bounded = add_value_bounds(generics, &value_generics);
    let bounded = add_display_bounds(bounded, &display_generics);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();
    let to_value = crate_path("ToValue");
    let value = crate_path("Value");

    Ok(quote! {
        impl #impl_generics #to_value for #ident #ty_generics #where_clause {
            fn to_value(&self) -> #value {
                #body
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(tokens: TokenStream) -> Result<String> {
        let input: DeriveInput = syn::parse2(tokens).expect("should parse as DeriveInput");
        expand(input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn struct_expands_to_mapping() {
        let out = expand_str(quote! {
            struct Payment { card: String, amount: u64 }
        })
        .unwrap();
        assert!(out.contains("ToValue for Payment"));
        assert!(out.contains("Mapping"));
        assert!(out.contains("\"card\""));
        assert!(out.contains("\"amount\""));
    }

    #[test]
    fn skipped_fields_are_not_emitted() {
        let out = expand_str(quote! {
            struct Session { user: String, #[value(skip)] secret: String }
        })
        .unwrap();
        assert!(out.contains("\"user\""));
        assert!(!out.contains("\"secret\""));
    }

    #[test]
    fn rename_changes_the_key() {
        let out = expand_str(quote! {
            struct Login { #[value(rename = "user")] user_name: String }
        })
        .unwrap();
        assert!(out.contains("\"user\""));
        assert!(!out.contains("\"user_name\""));
    }

    #[test]
    fn enum_variants_are_tagged() {
        let out = expand_str(quote! {
            enum Source { Web, Card(String), #[value(rename = "tel")] Phone { number: String } }
        })
        .unwrap();
        assert!(out.contains("\"Web\""));
        assert!(out.contains("\"Card\""));
        assert!(out.contains("\"tel\""));
        assert!(!out.contains("\"Phone\""));
    }

    #[test]
    fn untagged_enum_omits_names() {
        let out = expand_str(quote! {
            #[value(untagged)]
            enum Id { Numeric(u64), Named(String) }
        })
        .unwrap();
        assert!(!out.contains("\"Numeric\""));
        assert!(!out.contains("\"Named\""));
    }

    #[test]
    fn generic_bounds_follow_strategy() {
        let out = expand_str(quote! {
            struct Wrapper<T, U, M> {
                inner: T,
                #[value(display)]
                label: U,
                _marker: ::core::marker::PhantomData<M>,
            }
        })
        .unwrap();
        let header = &out[..out.find("for Wrapper").unwrap()];
        assert!(header.contains("T : :: logredact :: ToValue"));
        assert!(header.contains("U : :: core :: fmt :: Display"));
        assert!(!header.contains("M :"));
    }

    #[test]
    fn untagged_struct_errors() {
        let err = expand_str(quote! {
            #[value(untagged)]
            struct Plain { a: u8 }
        })
        .unwrap_err();
        assert!(err.to_string().contains("only applies to enums"));
    }

    #[test]
    fn union_errors() {
        let err = expand_str(quote! {
            union Bits { a: u32, b: f32 }
        })
        .unwrap_err();
        assert!(err.to_string().contains("cannot be derived for unions"));
    }

    #[test]
    fn invalid_field_attribute_errors() {
        let err = expand_str(quote! {
            struct Bad { #[value(redact)] a: String }
        })
        .unwrap_err();
        assert!(err.to_string().contains("unknown field option"));
    }

    #[test]
    fn skip_on_variant_errors() {
        let err = expand_str(quote! {
            enum Bad { #[value(skip)] A }
        })
        .unwrap_err();
        assert!(err.to_string().contains("variants only accept `rename`"));
    }
}
