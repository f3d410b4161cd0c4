//! Shared field conversion logic for struct and enum derivation.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::Result;

use crate::{
    crate_path,
    generics::collect_generics_from_type,
    strategy::{parse_field_options, Strategy},
};

/// Generic parameters that need bounds, collected while walking fields.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) value_generics: &'a mut Vec<Ident>,
    pub(crate) display_generics: &'a mut Vec<Ident>,
}

/// One field that contributes to the generated value.
pub(crate) struct EmittedField {
    /// Key used when the field lands in a mapping.
    pub(crate) key: String,
    /// Expression producing the field's `Value`.
    pub(crate) expr: TokenStream,
}

/// Builds the conversion expression for one field, or `None` if skipped.
///
/// `binding` must be a reference to the field.
///
/// | Strategy | Expression |
/// |----------|------------|
/// | `Convert` | `ToValue::to_value(binding)` |
/// | `Display` | `Value::Text(ToString::to_string(binding))` |
/// | `Skip` | none |
pub(crate) fn generate_field_value(
    ctx: &mut DeriveContext<'_>,
    field: &syn::Field,
    binding: &Ident,
    default_key: String,
    span: Span,
) -> Result<Option<EmittedField>> {
    let options = parse_field_options(&field.attrs)?;
    let key = options.rename.unwrap_or(default_key);

    let expr = match options.strategy {
        Strategy::Skip => return Ok(None),
        Strategy::Convert => {
            collect_generics_from_type(&field.ty, ctx.generics, ctx.value_generics);
            let to_value = crate_path("ToValue");
            quote_spanned! { span =>
                #to_value::to_value(#binding)
            }
        }
        Strategy::Display => {
            collect_generics_from_type(&field.ty, ctx.generics, ctx.display_generics);
            let value = crate_path("Value");
            quote_spanned! { span =>
                #value::Text(::std::string::ToString::to_string(#binding))
            }
        }
    };

    Ok(Some(EmittedField { key, expr }))
}

/// A mapping built from the emitted fields, keyed by field name.
pub(crate) fn mapping_expr(fields: &[EmittedField]) -> TokenStream {
    let value = crate_path("Value");
    let map_path = crate_path("Map");
    // Mixed-site hygiene keeps this local apart from field bindings.
    let map = Ident::new("map", Span::mixed_site());
    let inserts = fields.iter().map(|EmittedField { key, expr }| {
        quote! {
            #map.insert(::std::string::String::from(#key), #expr);
        }
    });
    quote! {{
        #[allow(unused_mut)]
        let mut #map = #map_path::new();
        #(#inserts)*
        #value::Mapping(#map)
    }}
}

/// A tuple built from the emitted fields, in declaration order.
pub(crate) fn tuple_expr(fields: &[EmittedField]) -> TokenStream {
    let value = crate_path("Value");
    let exprs = fields.iter().map(|field| &field.expr);
    quote! {
        #value::Tuple(::std::vec![#(#exprs),*].into_boxed_slice())
    }
}

/// Positional fields: a lone field stands for itself, like a newtype.
pub(crate) fn unnamed_expr(total_fields: usize, fields: &[EmittedField]) -> TokenStream {
    match fields {
        [only] if total_fields == 1 => only.expr.clone(),
        _ => tuple_expr(fields),
    }
}
