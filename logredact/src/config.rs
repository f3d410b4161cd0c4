//! Declarative filter configuration.
//!
//! [`RedactionConfig`] deserializes from any serde format. Where the data
//! comes from (file, environment, service) is the caller's business.

use serde::Deserialize;

use crate::{
    error::ConfigError,
    field::ReservedKeys,
    filter::RedactingFilter,
    pattern::Pattern,
    redactor::{Redactor, DEFAULT_MASK},
};

/// One configured pattern.
///
/// A bare string masks whole matches; a table with `group` masks only that
/// capture group.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PatternSpec {
    /// Mask every match of the regex.
    Whole(String),
    /// Mask capture group `group` of every match.
    Group {
        /// Regex source.
        regex: String,
        /// Capture group to mask.
        group: usize,
    },
}

impl PatternSpec {
    /// Compiles the pattern.
    pub fn compile(&self) -> Result<Pattern, crate::PatternError> {
        match self {
            PatternSpec::Whole(regex) => Pattern::new(regex),
            PatternSpec::Group { regex, group } => Pattern::masking_group(regex, *group),
        }
    }
}

/// Settings for a [`RedactingFilter`].
///
/// ```
/// use logredact::RedactionConfig;
///
/// let config: RedactionConfig = serde_json::from_str(
///     r##"{ "patterns": ["\\d{3}", { "regex": "key=(\\w+)", "group": 1 }], "mask": "#" }"##,
/// )
/// .unwrap();
/// let filter = config.build().unwrap();
/// assert_eq!(filter.redactor().redact_text("key=abc 1234"), "key=# #4");
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RedactionConfig {
    /// Patterns, applied in order.
    pub patterns: Vec<PatternSpec>,
    /// Text substituted for each match.
    pub mask: String,
    /// Attribute names exempt from redaction on top of the standard set.
    pub reserved: Vec<String>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            mask: DEFAULT_MASK.to_owned(),
            reserved: Vec::new(),
        }
    }
}

impl RedactionConfig {
    /// Compiles the patterns and builds the filter.
    ///
    /// Every pattern is checked here; the resulting filter cannot fail.
    pub fn build(&self) -> Result<RedactingFilter, ConfigError> {
        let patterns = self
            .patterns
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                spec.compile()
                    .map_err(|source| ConfigError::Pattern { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut reserved = ReservedKeys::standard();
        reserved.extend(self.reserved.iter().cloned());

        let redactor = Redactor::new(patterns).with_mask(self.mask.clone());
        Ok(RedactingFilter::new(redactor).with_reserved(reserved))
    }
}

#[cfg(test)]
mod tests {
    use super::{PatternSpec, RedactionConfig};
    use crate::{error::ConfigError, DEFAULT_MASK};

    #[test]
    fn defaults_apply_to_missing_fields() {
        let config: RedactionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RedactionConfig::default());
        assert_eq!(config.mask, DEFAULT_MASK);
    }

    #[test]
    fn both_pattern_forms_parse() {
        let config: RedactionConfig = serde_json::from_str(
            r#"{ "patterns": ["a+", { "regex": "b(c)", "group": 1 }] }"#,
        )
        .unwrap();
        assert_eq!(
            config.patterns,
            vec![
                PatternSpec::Whole("a+".into()),
                PatternSpec::Group {
                    regex: "b(c)".into(),
                    group: 1
                },
            ]
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<RedactionConfig>(r#"{ "masks": "x" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_pattern_reports_its_position() {
        let config = RedactionConfig {
            patterns: vec![PatternSpec::Whole("ok".into()), PatternSpec::Whole("(".into())],
            ..RedactionConfig::default()
        };
        let err = config.build().unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { index: 1, .. }));
        assert!(err.to_string().starts_with("pattern #1"));
    }

    #[test]
    fn extra_reserved_names_are_added() {
        let config = RedactionConfig {
            patterns: vec![PatternSpec::Whole(r"\d+".into())],
            reserved: vec!["request_id".into()],
            ..RedactionConfig::default()
        };
        let filter = config.build().unwrap();
        assert!(filter.reserved().contains("request_id"));
        assert!(filter.reserved().contains("lineno"));
    }
}
