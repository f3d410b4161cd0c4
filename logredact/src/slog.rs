//! Redaction for records flowing through `slog`.
//!
//! [`RedactingDrain`] sits in front of any `slog::Drain`. For every record it
//! captures the message and all key-value pairs as [`Value`]s, redacts them
//! with a [`RedactingFilter`], and forwards a rebuilt record to the inner
//! drain.
//!
//! It is responsible for:
//! - Scanning the rendered message. `slog` interpolates format arguments
//!   before a drain sees them, so the message is scanned as one text.
//! - Redacting record and logger key-values whose key is not reserved.
//! - Carrying level, tag and source location over untouched.
//! - Never failing a log call because of redaction: values that refuse to
//!   serialize are dropped or replaced by a placeholder, and the record is
//!   still forwarded.
//!
//! Logger key-values are folded into the record's own pairs, so the inner
//! drain receives an empty logger value list.
//!
//! ## Example
//! ```ignore
//! use logredact::{slog::RedactingDrain, Redactor, RedactingFilter};
//!
//! let filter = RedactingFilter::new(Redactor::from_regexes([r"\d{4}"])?);
//! let drain = RedactingDrain::new(json_drain, filter).fuse();
//! let log = slog::Logger::root(drain, slog::o!());
//! ```

use std::fmt::Arguments;

use slog::{
    BorrowedKV, Drain, Key, Level, OwnedKVList, Record, RecordLocation, RecordStatic,
    Result as SlogResult, Serializer, Value as SlogValue, KV,
};

use crate::{filter::RedactingFilter, value::Value};

/// Stored in place of a nested value that could not be captured.
pub const UNSERIALIZABLE_PLACEHOLDER: &str = "[unserializable]";

impl SlogValue for Value {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        match self {
            Value::Null => serializer.emit_none(key),
            Value::Bool(value) => serializer.emit_bool(key, *value),
            Value::Int(value) => serializer.emit_i64(key, *value),
            Value::UInt(value) => serializer.emit_u64(key, *value),
            Value::Float(value) => serializer.emit_f64(key, *value),
            Value::Text(value) => serializer.emit_str(key, value),
            container => {
                let nested = slog::Serde(container.clone());
                SlogValue::serialize(&nested, record, key, serializer)
            }
        }
    }
}

/// Collects every emitted pair as a [`Value`], in emission order.
#[derive(Default)]
struct Capture {
    pairs: Vec<(Key, Value)>,
}

impl Capture {
    fn push(&mut self, key: Key, value: Value) -> SlogResult {
        self.pairs.push((key, value));
        Ok(())
    }
}

impl Serializer for Capture {
    fn emit_arguments(&mut self, key: Key, val: &Arguments<'_>) -> SlogResult {
        self.push(key, Value::Text(val.to_string()))
    }

    fn emit_str(&mut self, key: Key, val: &str) -> SlogResult {
        self.push(key, Value::from(val))
    }

    fn emit_char(&mut self, key: Key, val: char) -> SlogResult {
        self.push(key, Value::from(val))
    }

    fn emit_bool(&mut self, key: Key, val: bool) -> SlogResult {
        self.push(key, Value::Bool(val))
    }

    fn emit_usize(&mut self, key: Key, val: usize) -> SlogResult {
        self.push(key, Value::from(val))
    }

    fn emit_isize(&mut self, key: Key, val: isize) -> SlogResult {
        self.push(key, Value::from(val))
    }

    fn emit_u32(&mut self, key: Key, val: u32) -> SlogResult {
        self.push(key, Value::from(val))
    }

    fn emit_i32(&mut self, key: Key, val: i32) -> SlogResult {
        self.push(key, Value::from(val))
    }

    fn emit_u64(&mut self, key: Key, val: u64) -> SlogResult {
        self.push(key, Value::UInt(val))
    }

    fn emit_i64(&mut self, key: Key, val: i64) -> SlogResult {
        self.push(key, Value::Int(val))
    }

    fn emit_f32(&mut self, key: Key, val: f32) -> SlogResult {
        self.push(key, Value::from(val))
    }

    fn emit_f64(&mut self, key: Key, val: f64) -> SlogResult {
        self.push(key, Value::Float(val))
    }

    fn emit_unit(&mut self, key: Key) -> SlogResult {
        self.push(key, Value::Null)
    }

    fn emit_none(&mut self, key: Key) -> SlogResult {
        self.push(key, Value::Null)
    }

    fn emit_serde(&mut self, key: Key, val: &dyn slog::SerdeValue) -> SlogResult {
        let value = serde_json::to_value(val.as_serde()).map_or_else(
            |_| Value::from(UNSERIALIZABLE_PLACEHOLDER),
            Value::from,
        );
        self.push(key, value)
    }
}

/// The redacted pairs attached to a forwarded record.
struct RedactedKv {
    pairs: Vec<(Key, Value)>,
}

impl KV for RedactedKv {
    fn serialize(&self, record: &Record<'_>, serializer: &mut dyn Serializer) -> SlogResult {
        for (key, value) in &self.pairs {
            SlogValue::serialize(value, record, *key, serializer)?;
        }
        Ok(())
    }
}

/// A `slog::Drain` that redacts records before passing them on.
pub struct RedactingDrain<D> {
    drain: D,
    filter: RedactingFilter,
    no_values: OwnedKVList,
}

impl<D> RedactingDrain<D> {
    /// Wraps `drain`, redacting with `filter`.
    pub fn new(drain: D, filter: RedactingFilter) -> Self {
        Self {
            drain,
            filter,
            no_values: OwnedKVList::from(slog::o!()),
        }
    }

    /// The filter applied to each record.
    pub fn filter(&self) -> &RedactingFilter {
        &self.filter
    }

    /// Returns the wrapped drain.
    pub fn into_inner(self) -> D {
        self.drain
    }

    fn capture(record: &Record<'_>, values: &OwnedKVList) -> Vec<(Key, Value)> {
        let mut capture = Capture::default();
        // A failing pair stops its own list; what was captured so far is kept.
        let _ = record.kv().serialize(record, &mut capture);
        let _ = values.serialize(record, &mut capture);
        capture.pairs
    }
}

impl<D> Drain for RedactingDrain<D>
where
    D: Drain,
{
    type Ok = D::Ok;
    type Err = D::Err;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> Result<Self::Ok, Self::Err> {
        let message = record.msg().to_string();
        let message = self.filter.redactor().redact_text(&message);

        let pairs = Self::capture(record, values)
            .into_iter()
            .map(|(key, value)| {
                let value = self.filter.redact_field(key, value);
                (key, value)
            })
            .collect();
        let kv = RedactedKv { pairs };

        let location = RecordLocation {
            file: record.file(),
            line: record.line(),
            column: record.column(),
            function: record.function(),
            module: record.module(),
        };
        let rstatic = RecordStatic {
            location: &location,
            tag: record.tag(),
            level: record.level(),
        };

        self.drain.log(
            &Record::new(&rstatic, &format_args!("{message}"), BorrowedKV(&kv)),
            &self.no_values,
        )
    }

    fn is_enabled(&self, level: Level) -> bool {
        self.drain.is_enabled(level)
    }
}
