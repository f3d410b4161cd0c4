//! The dynamic value model carried by events.
//!
//! Event attributes and interpolation arguments have no fixed schema, so they
//! are represented by a closed set of shapes: [`Value::Mapping`],
//! [`Value::Sequence`], [`Value::Tuple`], [`Value::Text`] and the non-text
//! scalars. The redactor dispatches on this tag once per recursive step.

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    fmt,
    hash::BuildHasher,
    marker::PhantomData,
};

use serde::ser::{Serialize, SerializeMap, SerializeSeq, SerializeTuple, Serializer};

/// Mapping from attribute or key name to value.
///
/// Key order is not meaningful; a `BTreeMap` keeps output deterministic.
pub type Map = BTreeMap<String, Value>;

/// A dynamically-shaped value attached to an event.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating-point number.
    Float(f64),
    /// Text, scanned as-is.
    Text(String),
    /// A growable list, redacted in place.
    Sequence(Vec<Value>),
    /// A fixed-arity list. Redaction rebuilds it at the same length.
    Tuple(Box<[Value]>),
    /// Named values. Keys are never redacted.
    Mapping(Map),
}

impl Value {
    /// Returns `true` for values with nothing to scan.
    ///
    /// Falsy values are `Null`, `false`, zero (including `-0.0`), the empty
    /// string and empty containers. `NaN` is not falsy.
    #[allow(clippy::float_cmp)]
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(value) => !value,
            Value::Int(value) => *value == 0,
            Value::UInt(value) => *value == 0,
            Value::Float(value) => *value == 0.0,
            Value::Text(value) => value.is_empty(),
            Value::Sequence(items) => items.is_empty(),
            Value::Tuple(items) => items.is_empty(),
            Value::Mapping(map) => map.is_empty(),
        }
    }

    /// Returns the canonical text form of this value.
    ///
    /// | Value | Text |
    /// |-------|------|
    /// | `Text(s)` | `s`, borrowed |
    /// | `Bool` | `true` / `false` |
    /// | `Int`, `UInt` | decimal digits |
    /// | `Float` | `Display` for `f64`: `123.6`, `1` for `1.0`, `inf`, `NaN` |
    /// | `Null` | empty string |
    /// | containers | their `Display` rendering |
    ///
    /// The float rendering matches what `slog` serializers produce for an
    /// `f64`, so a redacted float differs from the unredacted output only in
    /// its masked spans.
    pub fn canonical_text(&self) -> Cow<'_, str> {
        match self {
            Value::Text(text) => Cow::Borrowed(text),
            Value::Null => Cow::Borrowed(""),
            Value::Bool(true) => Cow::Borrowed("true"),
            Value::Bool(false) => Cow::Borrowed("false"),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Returns the text if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the mapping if this is a [`Value::Mapping`].
    pub fn as_mapping(&self) -> Option<&Map> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Value::Sequence`] or [`Value::Tuple`].
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Builds a [`Value::Tuple`] from its elements.
    pub fn tuple<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Tuple(items.into_iter().collect())
    }
}

fn write_joined<'a, I>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a Value>,
{
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        fmt::Display::fmt(item, f)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int(value) => write!(f, "{value}"),
            Value::UInt(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Text(value) => f.write_str(value),
            Value::Sequence(items) => {
                f.write_str("[")?;
                write_joined(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_joined(f, items.iter())?;
                f.write_str(")")
            }
            Value::Mapping(map) => {
                f.write_str("{")?;
                for (index, (key, value)) in map.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::UInt(value) => serializer.serialize_u64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::Text(value) => serializer.serialize_str(value),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Tuple(items) => {
                let mut tuple = serializer.serialize_tuple(items.len())?;
                for item in items.iter() {
                    tuple.serialize_element(item)?;
                }
                tuple.end()
            }
            Value::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::UInt(u64::from(value))
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or_else(|_| Value::Text(value.to_string()), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Value::Text(value.to_string()), Value::UInt)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// Keeps the shortest decimal form of the `f32`, so `0.1_f32` renders as
/// `0.1` rather than the widened `0.10000000149011612`.
impl From<f32> for Value {
    fn from(value: f32) -> Self {
        let widened = value
            .to_string()
            .parse::<f64>()
            .unwrap_or_else(|_| f64::from(value));
        Value::Float(widened)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(value: Cow<'_, str>) -> Self {
        Value::Text(value.into_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Mapping(map)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Sequence(iter.into_iter().collect())
    }
}

impl<K> FromIterator<(K, Value)> for Value
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(feature = "slog")]
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Value::Null,
            Json::Bool(value) => Value::Bool(value),
            Json::Number(number) => {
                if let Some(value) = number.as_u64() {
                    Value::UInt(value)
                } else if let Some(value) = number.as_i64() {
                    Value::Int(value)
                } else {
                    number
                        .as_f64()
                        .map_or_else(|| Value::Text(number.to_string()), Value::Float)
                }
            }
            Json::String(value) => Value::Text(value),
            Json::Array(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

// =============================================================================
// ToValue - by-reference conversion used by the derive
// =============================================================================

/// Converts a borrowed value into the dynamic [`Value`] model.
///
/// Implemented for primitives, strings, common std containers and tuples.
/// Derive it for your own types with `#[derive(ToValue)]`.
pub trait ToValue {
    /// Returns the dynamic representation of `self`.
    fn to_value(&self) -> Value;
}

macro_rules! impl_to_value_via_from {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_to_value_via_from!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char
);

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value {
        Value::Text(self.clone().into_owned())
    }
}

impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl<T: ?Sized> ToValue for PhantomData<T> {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl<T> ToValue for &T
where
    T: ToValue + ?Sized,
{
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T> ToValue for Box<T>
where
    T: ToValue + ?Sized,
{
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T> ToValue for Option<T>
where
    T: ToValue,
{
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T> ToValue for [T]
where
    T: ToValue,
{
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T> ToValue for Vec<T>
where
    T: ToValue,
{
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<K, V> ToValue for BTreeMap<K, V>
where
    K: fmt::Display,
    V: ToValue,
{
    fn to_value(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.to_value()))
                .collect(),
        )
    }
}

impl<K, V, S> ToValue for HashMap<K, V, S>
where
    K: fmt::Display,
    V: ToValue,
    S: BuildHasher,
{
    fn to_value(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(key, value)| (key.to_string(), value.to_value()))
                .collect(),
        )
    }
}

macro_rules! impl_to_value_tuple {
    ($($name:ident $binding:ident),+) => {
        impl<$($name: ToValue),+> ToValue for ($($name,)+) {
            fn to_value(&self) -> Value {
                let ($($binding,)+) = self;
                Value::Tuple(Box::new([$($binding.to_value()),+]))
            }
        }
    };
}

impl_to_value_tuple!(A a);
impl_to_value_tuple!(A a, B b);
impl_to_value_tuple!(A a, B b, C c);
impl_to_value_tuple!(A a, B b, C c, D d);
impl_to_value_tuple!(A a, B b, C c, D d, E e);
impl_to_value_tuple!(A a, B b, C c, D d, E e, F f);

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Map, ToValue, Value};

    #[test]
    fn falsy_values_are_recognised() {
        for value in [
            Value::Null,
            Value::Bool(false),
            Value::Int(0),
            Value::UInt(0),
            Value::Float(0.0),
            Value::Float(-0.0),
            Value::Text(String::new()),
            Value::Sequence(Vec::new()),
            Value::tuple(Vec::new()),
            Value::Mapping(Map::new()),
        ] {
            assert!(value.is_falsy(), "{value:?} should be falsy");
        }
    }

    #[test]
    fn truthy_values_are_recognised() {
        for value in [
            Value::Bool(true),
            Value::Int(-1),
            Value::UInt(7),
            Value::Float(f64::NAN),
            Value::Text(" ".into()),
            Value::Sequence(vec![Value::Null]),
        ] {
            assert!(!value.is_falsy(), "{value:?} should be truthy");
        }
    }

    #[test]
    fn canonical_text_of_scalars() {
        assert_eq!(Value::Float(123.6).canonical_text(), "123.6");
        assert_eq!(Value::Float(1.0).canonical_text(), "1");
        assert_eq!(Value::Float(f64::INFINITY).canonical_text(), "inf");
        assert_eq!(Value::Int(-42).canonical_text(), "-42");
        assert_eq!(Value::UInt(u64::MAX).canonical_text(), "18446744073709551615");
        assert_eq!(Value::Bool(true).canonical_text(), "true");
        assert_eq!(Value::Null.canonical_text(), "");
    }

    #[test]
    fn canonical_text_borrows_text() {
        let value = Value::from("abc");
        assert!(matches!(
            value.canonical_text(),
            std::borrow::Cow::Borrowed("abc")
        ));
    }

    #[test]
    fn display_renders_containers() {
        let value: Value = [
            ("a", Value::from(1_i32)),
            ("b", Value::from(vec![Value::from("x"), Value::tuple([Value::Bool(true)])])),
        ]
        .into_iter()
        .collect();
        assert_eq!(value.to_string(), "{a: 1, b: [x, (true)]}");
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn to_value_for_std_types() {
        let mut map = HashMap::new();
        map.insert(1_u8, vec!["a", "b"]);
        let value = map.to_value();
        assert_eq!(
            value.get("1"),
            Some(&Value::Sequence(vec![Value::from("a"), Value::from("b")]))
        );

        assert_eq!(
            ("x", 2_u32).to_value(),
            Value::tuple([Value::from("x"), Value::UInt(2)])
        );
    }

    #[test]
    fn serializes_to_json() {
        let value: Value = [(
            "thing",
            Value::tuple([Value::from("one"), Value::Float(1.5), Value::Null]),
        )]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"thing":["one",1.5,null]}"#);
    }

    #[test]
    fn f32_keeps_its_shortest_text() {
        assert_eq!(Value::from(0.1_f32).canonical_text(), "0.1");
        assert_eq!(Value::from(123.6_f32).canonical_text(), "123.6");
        assert_eq!(0.1_f32.to_value(), Value::Float(0.1));
        assert!(Value::from(0.0_f32).is_falsy());
        assert_eq!(Value::from(f32::INFINITY).canonical_text(), "inf");
    }

    #[test]
    fn as_text_only_matches_text() {
        assert_eq!(Value::from("abc").as_text(), Some("abc"));
        assert_eq!(Value::Int(1).as_text(), None);
        assert_eq!(Value::Null.as_text(), None);
    }
}
