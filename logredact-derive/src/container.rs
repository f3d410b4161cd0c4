//! Container-level attribute parsing for `#[derive(ToValue)]`.
//!
//! This module handles attributes on the struct/enum itself, not on fields.

use syn::{Attribute, Meta, Result};

/// Options parsed from container-level `#[value(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// If true, enum variants emit their content without the variant name.
    pub(crate) untagged: bool,
}

/// Parses container-level `#[value(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("value") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                // Bare #[value] on container - no meaning, ignore
            }
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("untagged") {
                        options.untagged = true;
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `untagged`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for container-level #[value]",
                ));
            }
        }
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::DeriveInput;

    use super::*;

    fn parse_attrs(tokens: proc_macro2::TokenStream) -> Vec<Attribute> {
        let input: DeriveInput = syn::parse2(quote! {
            #tokens
            enum Dummy {}
        })
        .expect("should parse as DeriveInput");
        input.attrs
    }

    #[test]
    fn no_attribute_returns_defaults() {
        let attrs = parse_attrs(quote! {});
        let options = parse_container_options(&attrs).unwrap();
        assert!(!options.untagged);
    }

    #[test]
    fn untagged_is_parsed() {
        let attrs = parse_attrs(quote! { #[value(untagged)] });
        let options = parse_container_options(&attrs).unwrap();
        assert!(options.untagged);
    }

    #[test]
    fn unknown_option_errors() {
        let attrs = parse_attrs(quote! { #[value(unknown_option)] });
        let result = parse_container_options(&attrs);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown container option"));
    }

    #[test]
    fn name_value_errors() {
        let attrs = parse_attrs(quote! { #[value = "x"] });
        assert!(parse_container_options(&attrs).is_err());
    }

    #[test]
    fn bare_value_on_container_is_ignored() {
        let attrs = parse_attrs(quote! { #[value] });
        let options = parse_container_options(&attrs).unwrap();
        assert!(!options.untagged);
    }
}
