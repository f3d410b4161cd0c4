//! A structured log event and its message template.
//!
//! An [`Event`] keeps every attribute in one map: the framework's reserved
//! attributes, the `msg` template and the caller's extras. The interpolation
//! arguments live beside the map in [`Args`].

use std::{
    fmt::Write as _,
    path::Path,
    process, thread,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    error::{EventError, FormatError},
    field::RESERVED_KEYS,
    value::{Map, Value},
};

/// Attribute that holds the message template.
pub const MSG_KEY: &str = "msg";

/// Attribute names an extra may never take, besides the reserved ones.
const GENERATED_KEYS: &[&str] = &[MSG_KEY, "message"];

/// Severity of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// Upper-case name, as stored in `level_name`.
    pub fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Numeric severity, as stored in `level_no`.
    pub fn number(self) -> u8 {
        match self {
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warning => 30,
            Level::Error => 40,
            Level::Critical => 50,
        }
    }
}

/// Arguments interpolated into the message template.
#[derive(Clone, Debug, PartialEq)]
pub enum Args {
    /// Consumed in order by `{}`, or by index with `{0}`.
    Positional(Vec<Value>),
    /// Looked up by `{name}`.
    Named(Map),
}

impl Default for Args {
    fn default() -> Self {
        Args::Positional(Vec::new())
    }
}

impl Args {
    /// Returns `true` when there is nothing to interpolate.
    pub fn is_empty(&self) -> bool {
        match self {
            Args::Positional(items) => items.is_empty(),
            Args::Named(map) => map.is_empty(),
        }
    }
}

impl From<Vec<Value>> for Args {
    fn from(items: Vec<Value>) -> Self {
        Args::Positional(items)
    }
}

impl From<Map> for Args {
    fn from(map: Map) -> Self {
        Args::Named(map)
    }
}

/// One log event, owned by the host and borrowed by filters.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    attributes: Map,
    args: Args,
}

impl Event {
    /// Creates an event with its framework attributes filled in.
    ///
    /// Sets `name`, `level_name`, `level_no`, `created`, `msecs`,
    /// `thread_name`, `process` and the `msg` template.
    pub fn new<N, M>(logger_name: N, level: Level, msg: M) -> Self
    where
        N: Into<String>,
        M: Into<String>,
    {
        let created = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |elapsed| elapsed.as_secs_f64());
        let msecs = created.fract() * 1000.0;

        let mut attributes = Map::new();
        attributes.insert("name".into(), Value::Text(logger_name.into()));
        attributes.insert("level_name".into(), Value::from(level.name()));
        attributes.insert("level_no".into(), Value::from(level.number()));
        attributes.insert("created".into(), Value::Float(created));
        attributes.insert("msecs".into(), Value::Float(msecs));
        attributes.insert(
            "thread_name".into(),
            thread::current().name().map_or(Value::Null, Value::from),
        );
        attributes.insert("process".into(), Value::from(process::id()));
        attributes.insert(MSG_KEY.into(), Value::Text(msg.into()));

        Self {
            attributes,
            args: Args::default(),
        }
    }

    /// Records where the event was emitted from.
    #[must_use]
    pub fn with_location(mut self, file: &str, line: u32, module: &str, function: &str) -> Self {
        let filename = Path::new(file)
            .file_name()
            .map_or_else(|| file.to_owned(), |name| name.to_string_lossy().into_owned());
        self.attributes.insert("pathname".into(), Value::from(file));
        self.attributes.insert("filename".into(), Value::Text(filename));
        self.attributes.insert("module".into(), Value::from(module));
        self.attributes.insert("lineno".into(), Value::from(line));
        self.attributes.insert("func_name".into(), Value::from(function));
        self
    }

    /// Sets the interpolation arguments.
    #[must_use]
    pub fn with_args<A>(mut self, args: A) -> Self
    where
        A: Into<Args>,
    {
        self.args = args.into();
        self
    }

    /// Adds a caller attribute.
    ///
    /// A taken name panics in debug builds and is ignored in release builds.
    /// Use [`Event::set_extra`] to handle clashes.
    #[must_use]
    pub fn with_extra<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let added = self.set_extra(key, value);
        debug_assert!(added.is_ok(), "{added:?}");
        self
    }

    /// Adds a caller attribute.
    ///
    /// Fails if `key` is reserved, is `msg`/`message`, or is already set.
    pub fn set_extra<K, V>(&mut self, key: K, value: V) -> Result<(), EventError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let key = key.into();
        let taken = RESERVED_KEYS.contains(&key.as_str())
            || GENERATED_KEYS.contains(&key.as_str())
            || self.attributes.contains_key(&key);
        if taken {
            return Err(EventError::AttributeClash(key));
        }
        self.attributes.insert(key, value.into());
        Ok(())
    }

    /// Looks up one attribute by name.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// All attributes, reserved ones included.
    pub fn attributes(&self) -> &Map {
        &self.attributes
    }

    /// Mutable access to all attributes, for filters.
    pub fn attributes_mut(&mut self) -> &mut Map {
        &mut self.attributes
    }

    /// The interpolation arguments.
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Mutable access to the interpolation arguments, for filters.
    pub fn args_mut(&mut self) -> &mut Args {
        &mut self.args
    }

    /// The message template as text.
    pub fn msg(&self) -> std::borrow::Cow<'_, str> {
        self.attributes
            .get(MSG_KEY)
            .map_or(std::borrow::Cow::Borrowed(""), Value::canonical_text)
    }

    /// Renders the message template with the arguments.
    ///
    /// `{}` takes the next positional argument, `{N}` the argument at index
    /// `N`, `{name}` a named argument. `{{` and `}}` produce literal braces.
    /// With no arguments the template is returned as-is.
    pub fn message(&self) -> Result<String, FormatError> {
        let template = self.msg();
        if self.args.is_empty() {
            return Ok(template.into_owned());
        }
        interpolate(&template, &self.args)
    }
}

fn interpolate(template: &str, args: &Args) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut next_positional = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '{' if chars.peek().map(|&(_, c)| c) == Some('{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek().map(|&(_, c)| c) == Some('}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(FormatError::UnbalancedBrace(offset)),
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(FormatError::UnbalancedBrace(offset));
                }
                let value = lookup(&name, args, &mut next_positional)?;
                let _ = write!(out, "{value}");
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

fn lookup<'a>(
    placeholder: &str,
    args: &'a Args,
    next_positional: &mut usize,
) -> Result<&'a Value, FormatError> {
    match args {
        Args::Positional(items) => {
            let index = if placeholder.is_empty() {
                let index = *next_positional;
                *next_positional += 1;
                index
            } else {
                placeholder
                    .parse::<usize>()
                    .map_err(|_| FormatError::NamedWithPositional(placeholder.to_owned()))?
            };
            items.get(index).ok_or(FormatError::MissingPositional(index))
        }
        Args::Named(map) => {
            if placeholder.is_empty() || placeholder.parse::<usize>().is_ok() {
                return Err(FormatError::PositionalWithNamed);
            }
            map.get(placeholder)
                .ok_or_else(|| FormatError::MissingNamed(placeholder.to_owned()))
        }
    }
}
