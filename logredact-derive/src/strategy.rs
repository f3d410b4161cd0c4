//! Parsing of `#[value(...)]` field and variant attributes.
//!
//! This module maps attribute syntax to conversion decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, LitStr, Meta, Result};

/// How a field becomes part of the generated value.
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `Convert` | `ToValue::to_value(&field)` |
/// | `#[value(display)]` | `Display` | `Value::Text(field.to_string())` |
/// | `#[value(skip)]` | `Skip` | Field is left out |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// Convert through `ToValue`.
    Convert,
    /// Render through `Display` into text.
    Display,
    /// Leave the field out.
    Skip,
}

/// Options parsed from the `#[value(...)]` attributes of one field or variant.
#[derive(Clone, Debug)]
pub(crate) struct FieldOptions {
    pub(crate) strategy: Strategy,
    /// Name used as the mapping key instead of the field or variant name.
    pub(crate) rename: Option<String>,
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "`skip` and `display` cannot be combined or repeated on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut strategy: Option<Strategy> = None;
    let mut rename: Option<String> = None;

    for attr in attrs {
        if !attr.path().is_ident("value") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        set_strategy(&mut strategy, Strategy::Skip, meta.path.span())
                    } else if meta.path.is_ident("display") {
                        set_strategy(&mut strategy, Strategy::Display, meta.path.span())
                    } else if meta.path.is_ident("rename") {
                        if rename.is_some() {
                            return Err(meta.error("duplicate `rename`"));
                        }
                        let name: LitStr = meta.value()?.parse()?;
                        rename = Some(name.value());
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown field option `{}`; expected `skip`, `display` or `rename`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::Path(_) | Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected a list of options, e.g. #[value(skip)]",
                ));
            }
        }
    }

    Ok(FieldOptions {
        strategy: strategy.unwrap_or(Strategy::Convert),
        rename,
    })
}

/// Parses variant attributes, which only accept `rename`.
pub(crate) fn parse_variant_rename(attrs: &[Attribute]) -> Result<Option<String>> {
    let options = parse_field_options(attrs)?;
    if options.strategy != Strategy::Convert {
        let span = attrs
            .iter()
            .find(|attr| attr.path().is_ident("value"))
            .map_or_else(Span::call_site, Spanned::span);
        return Err(syn::Error::new(
            span,
            "variants only accept `rename`; `skip` and `display` apply to fields",
        ));
    }
    Ok(options.rename)
}
