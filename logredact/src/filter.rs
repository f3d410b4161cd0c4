//! The per-event hook handed to the host framework.

use crate::{event::Event, field::ReservedKeys, redactor::Redactor, value::Value};

/// A hook the host runs on each event before it is emitted.
///
/// Returning `false` asks the host to drop the event.
pub trait Filter {
    /// Inspects or rewrites `event`.
    fn filter(&self, event: &mut Event) -> bool;
}

/// Redacts every eligible attribute and the interpolation arguments.
///
/// Never drops an event and never fails: an event that reaches this filter
/// is always emitted, redacted as far as its values allow.
///
/// ```
/// use logredact::{Event, Filter, Level, Redactor, RedactingFilter, Value};
///
/// let filter = RedactingFilter::new(Redactor::from_regexes([r"\d{3}"]).unwrap());
/// let mut event = Event::new("app", Level::Warning, "foo {}-{}")
///     .with_args(vec![Value::from("123"), Value::from("4567")]);
///
/// assert!(filter.filter(&mut event));
/// assert_eq!(event.message().unwrap(), "foo ****-****7");
/// ```
#[derive(Clone, Debug)]
pub struct RedactingFilter {
    redactor: Redactor,
    reserved: ReservedKeys,
}

impl RedactingFilter {
    /// Builds a filter that exempts [`ReservedKeys::standard`].
    #[must_use]
    pub fn new(redactor: Redactor) -> Self {
        Self {
            redactor,
            reserved: ReservedKeys::standard(),
        }
    }

    /// Replaces the set of exempt attribute names.
    #[must_use]
    pub fn with_reserved(mut self, reserved: ReservedKeys) -> Self {
        self.reserved = reserved;
        self
    }

    /// The redactor applied to eligible values.
    pub fn redactor(&self) -> &Redactor {
        &self.redactor
    }

    /// The attribute names that are never redacted.
    pub fn reserved(&self) -> &ReservedKeys {
        &self.reserved
    }

    /// Redacts one attribute unless `name` is reserved.
    ///
    /// For hosts that carry attributes as loose pairs rather than as an
    /// [`Event`].
    #[must_use]
    pub fn redact_field(&self, name: &str, value: Value) -> Value {
        if self.reserved.contains(name) {
            value
        } else {
            self.redactor.redact(value)
        }
    }
}

impl Filter for RedactingFilter {
    fn filter(&self, event: &mut Event) -> bool {
        for (_, value) in self.reserved.select_eligible(event.attributes_mut().iter_mut()) {
            self.redactor.redact_in_place(value);
        }
        self.redactor.redact_args(event.args_mut());
        true
    }
}

impl<F> Filter for &F
where
    F: Filter + ?Sized,
{
    fn filter(&self, event: &mut Event) -> bool {
        (**self).filter(event)
    }
}

impl<F> Filter for std::sync::Arc<F>
where
    F: Filter + ?Sized,
{
    fn filter(&self, event: &mut Event) -> bool {
        (**self).filter(event)
    }
}

#[cfg(test)]
mod tests {
    use super::{Filter, RedactingFilter};
    use crate::{
        event::{Event, Level},
        field::ReservedKeys,
        redactor::Redactor,
        value::Value,
    };

    fn filter() -> RedactingFilter {
        RedactingFilter::new(Redactor::from_regexes([r"\d{3}"]).unwrap())
    }

    #[test]
    fn reserved_attributes_are_untouched() {
        let mut event = Event::new("logger123", Level::Info, "msg 123").with_location(
            "src/a123.rs",
            123,
            "m123",
            "f123",
        );
        let before = event.clone();

        assert!(filter().filter(&mut event));

        for key in ReservedKeys::standard().iter() {
            assert_eq!(event.attribute(key), before.attribute(key), "{key} changed");
        }
        assert_eq!(event.msg(), "msg ****");
    }

    #[test]
    fn custom_reserved_set_is_honoured() {
        let filter = filter().with_reserved(ReservedKeys::empty().with_key("card"));
        let mut event = Event::new("app", Level::Info, "x")
            .with_extra("card", "123")
            .with_extra("pin", "123");

        filter.filter(&mut event);

        assert_eq!(event.attribute("card"), Some(&Value::from("123")));
        assert_eq!(event.attribute("pin"), Some(&Value::from("****")));
        // `name` is no longer reserved here.
        assert_eq!(event.attribute("name"), Some(&Value::from("app")));
    }

    #[test]
    fn redact_field_checks_the_name() {
        let filter = filter();
        assert_eq!(filter.redact_field("lineno", Value::UInt(123)), Value::UInt(123));
        assert_eq!(filter.redact_field("user_id", Value::UInt(123)), Value::from("****"));
    }

    #[test]
    fn filter_works_through_references_and_arcs() {
        let shared = std::sync::Arc::new(filter());
        let mut event = Event::new("app", Level::Info, "123");
        assert!((&shared).filter(&mut event));
        assert_eq!(event.msg(), "****");
    }
}
