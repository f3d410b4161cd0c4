//! The recursive redaction walk.
//!
//! [`Redactor`] applies an ordered list of [`Pattern`]s to every scalar it
//! finds inside a [`Value`]:
//!
//! - falsy values pass through untouched;
//! - mappings have every value redacted, keys are never touched;
//! - sequences are redacted element by element, in place;
//! - tuples are rebuilt from their redacted elements at the same arity;
//! - any other scalar is turned into its canonical text and scanned.

use std::borrow::Cow;

use crate::{error::PatternError, event::Args, pattern::Pattern, value::Value};

/// Mask substituted for every match when none is configured.
pub const DEFAULT_MASK: &str = "****";

/// Applies a fixed list of patterns to values of any shape.
///
/// The pattern list and mask are fixed at construction, so a `Redactor` can
/// be shared freely between threads.
#[derive(Clone, Debug)]
pub struct Redactor {
    patterns: Vec<Pattern>,
    mask: Cow<'static, str>,
}

impl Redactor {
    /// Builds a redactor from compiled patterns, using [`DEFAULT_MASK`].
    pub fn new<I>(patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Pattern>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            mask: Cow::Borrowed(DEFAULT_MASK),
        }
    }

    /// Compiles each regex source and builds a redactor from them.
    ///
    /// Fails on the first pattern that does not compile.
    pub fn from_regexes<I, S>(sources: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = sources
            .into_iter()
            .map(|source| Pattern::new(source.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(patterns))
    }

    /// Uses `mask` in place of [`DEFAULT_MASK`].
    #[must_use]
    pub fn with_mask<M>(mut self, mask: M) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        self.mask = mask.into();
        self
    }

    /// The configured patterns, in application order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// The configured mask token.
    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// Redacts `value` and returns the result.
    #[must_use]
    pub fn redact(&self, mut value: Value) -> Value {
        self.redact_in_place(&mut value);
        value
    }

    /// Redacts `value` in place.
    pub fn redact_in_place(&self, value: &mut Value) {
        if value.is_falsy() {
            return;
        }
        match value {
            Value::Mapping(map) => {
                for item in map.values_mut() {
                    self.redact_in_place(item);
                }
            }
            Value::Sequence(items) => {
                for item in items.iter_mut() {
                    self.redact_in_place(item);
                }
            }
            Value::Tuple(items) => {
                let rebuilt: Box<[Value]> = std::mem::take(items)
                    .into_vec()
                    .into_iter()
                    .map(|item| self.redact(item))
                    .collect();
                *items = rebuilt;
            }
            scalar => {
                let redacted = self.redact_text(&scalar.canonical_text()).into_owned();
                *scalar = Value::Text(redacted);
            }
        }
    }

    /// Runs `text` through every pattern in order.
    ///
    /// Each pattern sees the output of the one before it. Borrows `text`
    /// when no pattern matched.
    pub fn redact_text<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut current = Cow::Borrowed(text);
        for pattern in &self.patterns {
            let next = match pattern.apply_to(&current, &self.mask) {
                Cow::Borrowed(_) => None,
                Cow::Owned(next) => Some(next),
            };
            if let Some(next) = next {
                current = Cow::Owned(next);
            }
        }
        current
    }

    /// Redacts the arguments used to interpolate the message.
    ///
    /// Named arguments are redacted per key; positional arguments are
    /// redacted per position, keeping their count.
    pub fn redact_args(&self, args: &mut Args) {
        match args {
            Args::Named(map) => {
                for item in map.values_mut() {
                    self.redact_in_place(item);
                }
            }
            Args::Positional(items) => {
                for item in items.iter_mut() {
                    self.redact_in_place(item);
                }
            }
        }
    }
}
