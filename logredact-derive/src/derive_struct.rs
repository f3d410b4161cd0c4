//! Struct-specific `ToValue` derivation.
//!
//! Named structs become mappings keyed by field name, tuple structs become
//! tuples (or the lone field itself), and unit structs become `Null`.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{ext::IdentExt, spanned::Spanned, DataStruct, Fields, Result};

use crate::{
    crate_path,
    transform::{generate_field_value, mapping_expr, unnamed_expr, DeriveContext},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) body: TokenStream,
    pub(crate) value_generics: Vec<Ident>,
    pub(crate) display_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    data: DataStruct,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let mut value_generics = Vec::new();
    let mut display_generics = Vec::new();
    let mut ctx = DeriveContext {
        generics,
        value_generics: &mut value_generics,
        display_generics: &mut display_generics,
    };

    let body = match data.fields {
        Fields::Named(fields) => derive_named_struct(&mut ctx, fields)?,
        Fields::Unnamed(fields) => derive_unnamed_struct(&mut ctx, fields)?,
        Fields::Unit => {
            let value = crate_path("Value");
            quote! { #value::Null }
        }
    };

    Ok(StructDeriveOutput {
        body,
        value_generics,
        display_generics,
    })
}

fn derive_named_struct(
    ctx: &mut DeriveContext<'_>,
    fields: syn::FieldsNamed,
) -> Result<TokenStream> {
    let mut bindings = Vec::new();
    let mut emitted = Vec::new();

    for field in &fields.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let key = ident.unraw().to_string();
        if let Some(value) = generate_field_value(ctx, field, &ident, key, field.span())? {
            bindings.push(ident);
            emitted.push(value);
        }
    }

    let map = mapping_expr(&emitted);
    Ok(quote! {
        let Self { #(#bindings,)* .. } = self;
        #map
    })
}

fn derive_unnamed_struct(
    ctx: &mut DeriveContext<'_>,
    fields: syn::FieldsUnnamed,
) -> Result<TokenStream> {
    let mut patterns = Vec::new();
    let mut emitted = Vec::new();

    for (index, field) in fields.unnamed.iter().enumerate() {
        let binding = format_ident!("field_{}", index);
        match generate_field_value(ctx, field, &binding, index.to_string(), field.span())? {
            Some(value) => {
                patterns.push(quote! { #binding });
                emitted.push(value);
            }
            None => patterns.push(quote! { _ }),
        }
    }

    let expr = unnamed_expr(fields.unnamed.len(), &emitted);
    Ok(quote! {
        let Self(#(#patterns),*) = self;
        #expr
    })
}
