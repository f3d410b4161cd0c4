//! Error types.
//!
//! Every error here is raised while configuring or building something.
//! Redacting an event never fails.

use thiserror::Error;

/// A pattern could not be built.
#[derive(Error, Debug)]
pub enum PatternError {
    /// The regular expression did not compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    Regex {
        /// The source text of the pattern.
        pattern: String,
        /// Error reported by the regex engine.
        #[source]
        source: regex::Error,
    },

    /// The requested capture group does not exist in the pattern.
    #[error("pattern `{pattern}` has no capture group {group} (it has {available})")]
    MissingGroup {
        /// The source text of the pattern.
        pattern: String,
        /// The group that was asked for.
        group: usize,
        /// Number of groups in the pattern, not counting group 0.
        available: usize,
    },
}

/// A [`crate::RedactionConfig`] could not be turned into a filter.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One of the configured patterns is invalid.
    #[error("pattern #{index}: {source}")]
    Pattern {
        /// Position of the pattern in the configured list.
        index: usize,
        /// Why the pattern was rejected.
        #[source]
        source: PatternError,
    },
}

/// An attribute could not be attached to an event.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EventError {
    /// The name belongs to the framework or is already set on the event.
    #[error("attempt to overwrite `{0}` on event")]
    AttributeClash(String),
}

/// The message template could not be interpolated with the event's arguments.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// A positional placeholder has no matching argument.
    #[error("no positional argument at index {0}")]
    MissingPositional(usize),

    /// A named placeholder has no matching argument.
    #[error("no argument named `{0}`")]
    MissingNamed(String),

    /// A named placeholder was used with positional arguments.
    #[error("named placeholder `{0}` used with positional arguments")]
    NamedWithPositional(String),

    /// A positional placeholder was used with named arguments.
    #[error("positional placeholder used with named arguments")]
    PositionalWithNamed,

    /// A `{` was opened and never closed, or a lone `}` was found.
    #[error("unbalanced brace at byte {0}")]
    UnbalancedBrace(usize),
}
