//! Pattern-driven redaction of structured log events.
//!
//! A log event carries a message template, interpolation arguments and any
//! number of caller attributes of arbitrary shape. This crate rewrites every
//! string-bearing value of an event by running an ordered list of regex
//! [`Pattern`]s over it and replacing each match with a mask token.
//!
//! The pieces:
//! - [`Value`]: the dynamic value model (mappings, sequences, tuples, text,
//!   scalars) that event attributes are expressed in.
//! - [`Redactor`]: the recursive walk. Falsy values pass through, containers
//!   are walked, scalars are rendered to their canonical text and scanned.
//! - [`ReservedKeys`]: attribute names owned by the framework, never redacted.
//! - [`RedactingFilter`]: the per-event [`Filter`] hook tying them together.
//! - [`RedactionConfig`]: serde-deserializable settings for a filter.
//! - `slog` (feature `slog`): a `Drain` that redacts records in flight.
//!
//! What it does not do:
//! - understand what it redacts; matching is purely syntactic
//! - perform I/O or load configuration files
//!
//! Configuration errors surface when a filter is built. Filtering an event
//! never fails and never drops the event.
//!
//! ```
//! use logredact::{Event, Filter, Level, RedactingFilter, Redactor, Value};
//!
//! let filter = RedactingFilter::new(Redactor::from_regexes([r"\d{3}"]).unwrap());
//! let mut event = Event::new("app", Level::Warning, "foo")
//!     .with_extra("bar", 123.6);
//!
//! filter.filter(&mut event);
//! assert_eq!(event.attribute("bar"), Some(&Value::from("****.6")));
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::needless_ifs,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::future_not_send,
    clippy::option_if_let_else,
    clippy::from_over_into,
    clippy::manual_inspect
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[cfg(feature = "derive")]
pub use logredact_derive::ToValue;

#[allow(unused_extern_crates)]
extern crate self as logredact;

mod config;
mod error;
mod event;
mod field;
mod filter;
mod pattern;
mod redactor;
#[cfg(feature = "slog")]
pub mod slog;
mod value;

pub use config::{PatternSpec, RedactionConfig};
pub use error::{ConfigError, EventError, FormatError, PatternError};
pub use event::{Args, Event, Level, MSG_KEY};
pub use field::{Eligible, ReservedKeys, RESERVED_KEYS};
pub use filter::{Filter, RedactingFilter};
pub use pattern::Pattern;
pub use redactor::{Redactor, DEFAULT_MASK};
pub use value::{Map, ToValue, Value};
