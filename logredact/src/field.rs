//! Which event attributes may be redacted.
//!
//! Framework attributes (level, source location, timing, thread and process
//! identity) are control data the logging pipeline relies on. Rewriting them
//! with a careless pattern can break formatting or routing, so they are never
//! handed to the redactor.

use std::collections::BTreeSet;

/// Attribute names owned by the logging framework.
///
/// `args` is listed so the argument collection is not redacted a second time
/// as a generic attribute; its contents have their own path.
pub const RESERVED_KEYS: &[&str] = &[
    "name",
    "level_name",
    "level_no",
    "pathname",
    "filename",
    "module",
    "exc_info",
    "exc_text",
    "stack_info",
    "lineno",
    "func_name",
    "created",
    "msecs",
    "relative_created",
    "thread",
    "thread_name",
    "process",
    "process_name",
    "args",
];

/// An enumerable set of attribute names that are exempt from redaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservedKeys {
    keys: BTreeSet<String>,
}

impl ReservedKeys {
    /// The framework's own attributes, [`RESERVED_KEYS`].
    #[must_use]
    pub fn standard() -> Self {
        RESERVED_KEYS.iter().copied().collect()
    }

    /// A set with no reserved names: every attribute is eligible.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            keys: BTreeSet::new(),
        }
    }

    /// Adds `key` to the set.
    #[must_use]
    pub fn with_key<K>(mut self, key: K) -> Self
    where
        K: Into<String>,
    {
        self.keys.insert(key.into());
        self
    }

    /// Returns `true` if `key` is reserved.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Iterates over the reserved names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(String::as_str)
    }

    /// Number of reserved names.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no name is reserved.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keeps only the pairs whose name is not reserved.
    ///
    /// Works over borrowed or mutable values alike, so a caller can redact
    /// the eligible values of a map in place:
    ///
    /// ```
    /// use logredact::{Map, ReservedKeys, Value};
    ///
    /// let mut attributes = Map::new();
    /// attributes.insert("lineno".into(), Value::from(12_u32));
    /// attributes.insert("user".into(), Value::from("bob"));
    ///
    /// let reserved = ReservedKeys::standard();
    /// let eligible: Vec<_> = reserved
    ///     .select_eligible(attributes.iter_mut())
    ///     .map(|(name, _)| name.as_str())
    ///     .collect();
    /// assert_eq!(eligible, ["user"]);
    /// ```
    pub fn select_eligible<I, K, V>(&self, pairs: I) -> Eligible<'_, I::IntoIter>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        Eligible {
            reserved: self,
            inner: pairs.into_iter(),
        }
    }
}

/// Iterator returned by [`ReservedKeys::select_eligible`].
#[derive(Debug)]
pub struct Eligible<'s, I> {
    reserved: &'s ReservedKeys,
    inner: I,
}

impl<I, K, V> Iterator for Eligible<'_, I>
where
    I: Iterator<Item = (K, V)>,
    K: AsRef<str>,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let reserved = self.reserved;
        self.inner.find(|(name, _)| !reserved.contains(name.as_ref()))
    }
}

impl Default for ReservedKeys {
    fn default() -> Self {
        Self::standard()
    }
}

impl<K> FromIterator<K> for ReservedKeys
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<K> Extend<K> for ReservedKeys
where
    K: Into<String>,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.keys.extend(iter.into_iter().map(Into::into));
    }
}

#[cfg(test)]
mod tests {
    use super::{ReservedKeys, RESERVED_KEYS};

    #[test]
    fn standard_set_contains_every_framework_key() {
        let reserved = ReservedKeys::standard();
        assert_eq!(reserved.len(), RESERVED_KEYS.len());
        for key in RESERVED_KEYS {
            assert!(reserved.contains(key), "{key} should be reserved");
        }
        assert!(!reserved.contains("msg"));
    }

    #[test]
    fn selection_drops_reserved_names_only() {
        let reserved = ReservedKeys::standard();
        let pairs = [("level_no", 1), ("thing987", 2), ("msg", 3), ("args", 4)];
        let eligible: Vec<_> = reserved.select_eligible(pairs).collect();
        assert_eq!(eligible, [("thing987", 2), ("msg", 3)]);
    }

    #[test]
    fn empty_input_selects_nothing() {
        let reserved = ReservedKeys::standard();
        let pairs: Vec<(String, i32)> = Vec::new();
        assert_eq!(reserved.select_eligible(pairs).count(), 0);
    }

    #[test]
    fn set_can_be_extended() {
        let mut reserved = ReservedKeys::empty().with_key("request_id");
        reserved.extend(["trace_id"]);
        assert_eq!(reserved.iter().collect::<Vec<_>>(), ["request_id", "trace_id"]);
        assert!(!reserved.contains("level_no"));
    }
}
