//! Compiled matching rules.
//!
//! A [`Pattern`] is a pure string transformation: it finds spans of a text and
//! replaces them with the mask. It knows nothing about events or traversal.

use std::borrow::Cow;

use regex::{Captures, NoExpand, Regex};

use crate::error::PatternError;

/// Which part of each match is masked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    /// The entire match.
    Whole,
    /// Only the span of one capture group. The rest of the match is kept.
    Group(usize),
}

/// An immutable, compiled matching rule.
///
/// ```
/// use logredact::Pattern;
///
/// let digits = Pattern::new(r"\d{3}").unwrap();
/// assert_eq!(digits.apply_to("pin 123", "****"), "pin ****");
///
/// let key = Pattern::masking_group(r"api_key=([\w-]+)", 1).unwrap();
/// assert_eq!(key.apply_to("?api_key=abc-1&x=1", "****"), "?api_key=****&x=1");
/// ```
#[derive(Clone, Debug)]
pub struct Pattern {
    regex: Regex,
    target: Target,
}

impl Pattern {
    /// Compiles `pattern`; every match is replaced by the mask.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self::from_regex(compile(pattern)?))
    }

    /// Wraps an already compiled regex; every match is replaced by the mask.
    #[must_use]
    pub fn from_regex(regex: Regex) -> Self {
        Self {
            regex,
            target: Target::Whole,
        }
    }

    /// Compiles `pattern` and masks only capture group `group` of each match.
    ///
    /// This is how context around a secret is kept visible, e.g.
    /// `api_key=([\w-]+)` with group 1 keeps `api_key=` and masks the key.
    /// Group 0 is the whole match.
    pub fn masking_group(pattern: &str, group: usize) -> Result<Self, PatternError> {
        Self::regex_masking_group(compile(pattern)?, group)
    }

    /// Like [`Pattern::masking_group`], for an already compiled regex.
    pub fn regex_masking_group(regex: Regex, group: usize) -> Result<Self, PatternError> {
        let available = regex.captures_len() - 1;
        if group > available {
            return Err(PatternError::MissingGroup {
                pattern: regex.as_str().to_owned(),
                group,
                available,
            });
        }
        let target = if group == 0 {
            Target::Whole
        } else {
            Target::Group(group)
        };
        Ok(Self { regex, target })
    }

    /// Returns the source text of the underlying regex.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns `true` if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Replaces every non-overlapping match in `text` with `mask`.
    ///
    /// The mask is inserted literally; `$1` in a mask is not a group
    /// reference. Returns the input borrowed when nothing matched.
    pub fn apply_to<'t>(&self, text: &'t str, mask: &str) -> Cow<'t, str> {
        match self.target {
            Target::Whole => self.regex.replace_all(text, NoExpand(mask)),
            Target::Group(group) => self.regex.replace_all(text, |caps: &Captures<'_>| {
                mask_group(caps, group, mask)
            }),
        }
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self::from_regex(regex)
    }
}

fn compile(pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|source| PatternError::Regex {
        pattern: pattern.to_owned(),
        source,
    })
}

/// Rebuilds the whole match with the group's span swapped for `mask`.
///
/// A group that did not take part in the match leaves the match unchanged.
fn mask_group(caps: &Captures<'_>, group: usize, mask: &str) -> String {
    let Some(whole) = caps.get(0) else {
        return String::new();
    };
    let Some(inner) = caps.get(group) else {
        return whole.as_str().to_owned();
    };
    let matched = whole.as_str();
    let start = inner.start() - whole.start();
    let end = inner.end() - whole.start();
    let mut out = String::with_capacity(matched.len() - (end - start) + mask.len());
    out.push_str(&matched[..start]);
    out.push_str(mask);
    out.push_str(&matched[end..]);
    out
}
