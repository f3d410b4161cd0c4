//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for generics that appear in emitted fields.
//! `PhantomData<T>` is skipped when collecting, so marker parameters never
//! need to implement `ToValue`:
//!
//! ```ignore
//! #[derive(ToValue)]
//! struct TypedId<T> {
//!     id: String,
//!     _marker: PhantomData<T>,  // T gets no bound
//! }
//! ```

use syn::{parse_quote, Ident};

use crate::crate_path;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            let Some(segment) = path.path.segments.last() else {
                return;
            };
            if segment.ident == "PhantomData" {
                return;
            }

            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                for arg in &args.args {
                    if let syn::GenericArgument::Type(inner_ty) = arg {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }
            }

            for param in generics.type_params() {
                if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                    result.push(param.ident.clone());
                }
            }
        }
        syn::Type::Reference(reference) => {
            collect_generics_from_type(&reference.elem, generics, result);
        }
        syn::Type::Slice(slice) => collect_generics_from_type(&slice.elem, generics, result),
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_generics_from_type(elem, generics, result);
            }
        }
        _ => {}
    }
}

/// Adds `ToValue` bounds to generic parameters used in converted fields.
pub(crate) fn add_value_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            let to_value_path = crate_path("ToValue");
            param.bounds.push(parse_quote!(#to_value_path));
        }
    }
    generics
}

/// Adds `Display` bounds to generic parameters used in `#[value(display)]` fields.
pub(crate) fn add_display_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(::core::fmt::Display));
        }
    }
    generics
}

#[cfg(test)]
mod tests {
    use quote::{quote, ToTokens};

    use super::*;

    fn generics(tokens: proc_macro2::TokenStream) -> syn::Generics {
        let input: syn::DeriveInput = syn::parse2(quote! { struct Dummy #tokens; })
            .expect("should parse as DeriveInput");
        input.generics
    }

    fn collect(ty: proc_macro2::TokenStream, generics: &syn::Generics) -> Vec<String> {
        let ty: syn::Type = syn::parse2(ty).expect("should parse as a type");
        let mut result = Vec::new();
        collect_generics_from_type(&ty, generics, &mut result);
        result.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn finds_nested_parameters() {
        let g = generics(quote! { <T, U, V> });
        assert_eq!(collect(quote! { Vec<Option<T>> }, &g), ["T"]);
        assert_eq!(collect(quote! { (T, &'static [U]) }, &g), ["T", "U"]);
        assert!(collect(quote! { String }, &g).is_empty());
    }

    #[test]
    fn phantom_data_adds_nothing() {
        let g = generics(quote! { <T> });
        assert!(collect(quote! { PhantomData<T> }, &g).is_empty());
        assert!(collect(quote! { ::core::marker::PhantomData<T> }, &g).is_empty());
    }

    #[test]
    fn bounds_only_on_used_parameters() {
        let g = generics(quote! { <T, U> });
        let used = vec![Ident::new("T", proc_macro2::Span::call_site())];
        let bounded = add_display_bounds(g, &used);
        let rendered = bounded.to_token_stream().to_string();
        assert!(rendered.contains("Display"));
        assert!(!rendered.contains("U :"));
    }
}
