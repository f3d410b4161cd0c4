//! Enum-specific `ToValue` derivation.
//!
//! This module generates match arms for each variant and collects generic
//! parameters that require trait bounds.
//!
//! Tagged enums (the default) render a unit variant as its name and any other
//! variant as a one-entry mapping from its name to its content. With
//! `#[value(untagged)]` only the content is emitted and unit variants become
//! `Null`.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{format_ident, quote};
use syn::{ext::IdentExt, spanned::Spanned, DataEnum, Fields, Result};

use crate::{
    crate_path,
    strategy::parse_variant_rename,
    transform::{generate_field_value, mapping_expr, unnamed_expr, DeriveContext},
};

pub(crate) struct EnumDeriveOutput {
    pub(crate) body: TokenStream,
    pub(crate) value_generics: Vec<Ident>,
    pub(crate) display_generics: Vec<Ident>,
}

/// Context for deriving a single enum variant.
struct VariantContext<'a> {
    name: &'a Ident,
    variant_ident: &'a Ident,
    tag: String,
    untagged: bool,
}

impl VariantContext<'_> {
    /// Wraps a variant's content according to the tagging mode.
    fn wrap(&self, content: TokenStream) -> TokenStream {
        if self.untagged {
            return content;
        }
        let value = crate_path("Value");
        let map = crate_path("Map");
        let tag = &self.tag;
        let tagged = Ident::new("tagged", Span::mixed_site());
        quote! {{
            let mut #tagged = #map::new();
            #tagged.insert(::std::string::String::from(#tag), #content);
            #value::Mapping(#tagged)
        }}
    }
}

pub(crate) fn derive_enum(
    name: &Ident,
    data: DataEnum,
    generics: &syn::Generics,
    untagged: bool,
) -> Result<EnumDeriveOutput> {
    let mut arms = Vec::new();
    let mut value_generics = Vec::new();
    let mut display_generics = Vec::new();

    for variant in &data.variants {
        let variant_ident = &variant.ident;
        let tag = parse_variant_rename(&variant.attrs)?
            .unwrap_or_else(|| variant_ident.unraw().to_string());
        let variant_ctx = VariantContext {
            name,
            variant_ident,
            tag,
            untagged,
        };
        let mut derive_ctx = DeriveContext {
            generics,
            value_generics: &mut value_generics,
            display_generics: &mut display_generics,
        };

        let arm = match &variant.fields {
            Fields::Unit => derive_unit_variant(&variant_ctx),
            Fields::Named(fields) => derive_named_variant(&variant_ctx, &mut derive_ctx, fields)?,
            Fields::Unnamed(fields) => {
                derive_unnamed_variant(&variant_ctx, &mut derive_ctx, fields)?
            }
        };
        arms.push(arm);
    }

    let body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#arms),*
            }
        }
    };

    Ok(EnumDeriveOutput {
        body,
        value_generics,
        display_generics,
    })
}

fn derive_unit_variant(ctx: &VariantContext<'_>) -> TokenStream {
    let name = ctx.name;
    let variant_ident = ctx.variant_ident;
    let value = crate_path("Value");

    if ctx.untagged {
        quote! { #name::#variant_ident => #value::Null }
    } else {
        let tag = &ctx.tag;
        quote! {
            #name::#variant_ident => #value::Text(::std::string::String::from(#tag))
        }
    }
}

fn derive_named_variant(
    variant_ctx: &VariantContext<'_>,
    derive_ctx: &mut DeriveContext<'_>,
    fields: &syn::FieldsNamed,
) -> Result<TokenStream> {
    let name = variant_ctx.name;
    let variant_ident = variant_ctx.variant_ident;

    let mut bindings = Vec::new();
    let mut emitted = Vec::new();

    for field in &fields.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let key = ident.unraw().to_string();
        if let Some(value) = generate_field_value(derive_ctx, field, &ident, key, field.span())? {
            bindings.push(ident);
            emitted.push(value);
        }
    }

    let content = variant_ctx.wrap(mapping_expr(&emitted));
    Ok(quote! {
        #name::#variant_ident { #(#bindings,)* .. } => #content
    })
}

fn derive_unnamed_variant(
    variant_ctx: &VariantContext<'_>,
    derive_ctx: &mut DeriveContext<'_>,
    fields: &syn::FieldsUnnamed,
) -> Result<TokenStream> {
    let name = variant_ctx.name;
    let variant_ident = variant_ctx.variant_ident;

    let mut patterns = Vec::new();
    let mut emitted = Vec::new();

    for (index, field) in fields.unnamed.iter().enumerate() {
        let binding = format_ident!("field_{}", index);
        match generate_field_value(derive_ctx, field, &binding, index.to_string(), field.span())? {
            Some(value) => {
                patterns.push(quote! { #binding });
                emitted.push(value);
            }
            None => patterns.push(quote! { _ }),
        }
    }

    let content = variant_ctx.wrap(unnamed_expr(fields.unnamed.len(), &emitted));
    Ok(quote! {
        #name::#variant_ident ( #(#patterns),* ) => #content
    })
}
