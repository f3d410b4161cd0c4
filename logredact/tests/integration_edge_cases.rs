//! Edge-case coverage for value traversal and text replacement.
//!
//! These tests focus on falsy values, Unicode text, masks containing
//! replacement syntax, deep nesting, and values whose shape must survive
//! redaction untouched.

use logredact::{Event, Filter, Level, Map, Pattern, RedactingFilter, Redactor, Value};

fn three_digits() -> Redactor {
    Redactor::from_regexes([r"\d{3}"]).unwrap()
}

#[test]
fn test_falsy_values_pass_through() {
    let redactor = Redactor::from_regexes([r".*"]).unwrap();
    let falsy = [
        Value::Null,
        Value::Bool(false),
        Value::Int(0),
        Value::UInt(0),
        Value::Float(0.0),
        Value::from(""),
        Value::Sequence(Vec::new()),
        Value::tuple(Vec::new()),
        Value::Mapping(Map::new()),
    ];

    for value in falsy {
        assert_eq!(redactor.redact(value.clone()), value);
    }
}

#[test]
fn test_truthy_scalars_become_text() {
    let redactor = three_digits();
    assert_eq!(redactor.redact(Value::Bool(true)), Value::from("true"));
    assert_eq!(redactor.redact(Value::Int(-1234)), Value::from("-****4"));
    assert_eq!(redactor.redact(Value::Float(1.0)), Value::from("1"));
}

#[test]
fn test_unicode_text() {
    let redactor = three_digits();
    assert_eq!(redactor.redact_text("秘密123データ"), "秘密****データ");
    assert_eq!(redactor.redact_text("🔒 456 🔒"), "🔒 **** 🔒");
}

#[test]
fn test_unicode_pattern() {
    let redactor = Redactor::from_regexes([r"\p{Han}+"]).unwrap();
    assert_eq!(redactor.redact_text("name: 张伟 ok"), "name: **** ok");
}

#[test]
fn test_mask_with_replacement_syntax_is_literal() {
    let redactor = three_digits().with_mask("$1${0}$$");
    assert_eq!(redactor.redact_text("a123b"), "a$1${0}$$b");

    let group = Pattern::masking_group(r"pin=(\d+)", 1).unwrap();
    let redactor = Redactor::new([group]).with_mask("$0");
    assert_eq!(redactor.redact_text("pin=9876"), "pin=$0");
}

#[test]
fn test_adjacent_and_overlapping_candidates() {
    let redactor = three_digits();
    // Matches are leftmost and non-overlapping.
    assert_eq!(redactor.redact_text("123456789"), "************");
    assert_eq!(redactor.redact_text("12345"), "****45");
}

#[test]
fn test_mask_matching_its_own_pattern_is_stable() {
    let redactor = Redactor::from_regexes([r"\*+"]).unwrap().with_mask("**");
    let once = redactor.redact(Value::from("a*b"));
    assert_eq!(once, Value::from("a**b"));
    assert_eq!(redactor.redact(once.clone()), once);
}

#[test]
fn test_idempotent_when_mask_matches_nothing() {
    let redactor = Redactor::from_regexes([r"\d{3}", r"token=\w+"]).unwrap();
    let value: Value = [
        ("a", Value::from("token=abc 123")),
        ("b", Value::Sequence(vec![Value::from(4567), Value::Null])),
    ]
    .into_iter()
    .collect();

    let once = redactor.redact(value);
    let twice = redactor.redact(once.clone());
    assert_eq!(once, twice);
}

#[test]
fn test_deep_nesting() {
    let mut value = Value::from("secret 123");
    for depth in 0..64 {
        value = if depth % 2 == 0 {
            Value::Sequence(vec![value])
        } else {
            [("level", value)].into_iter().collect()
        };
    }

    let mut redacted = three_digits().redact(value);
    for depth in (0..64).rev() {
        redacted = if depth % 2 == 0 {
            let Value::Sequence(mut items) = redacted else {
                panic!("expected a sequence at depth {depth}");
            };
            items.remove(0)
        } else {
            let Value::Mapping(mut map) = redacted else {
                panic!("expected a mapping at depth {depth}");
            };
            map.remove("level").unwrap()
        };
    }
    assert_eq!(redacted, Value::from("secret ****"));
}

#[test]
fn test_structure_is_preserved() {
    let redactor = three_digits();
    let value: Value = [
        ("empty", Value::from("")),
        ("items", Value::Sequence(vec![Value::from("1"), Value::Null, Value::from(1000)])),
        ("zero", Value::Int(0)),
    ]
    .into_iter()
    .collect();

    let redacted = redactor.redact(value.clone());

    let before = value.as_mapping().unwrap();
    let after = redacted.as_mapping().unwrap();
    assert!(before.keys().eq(after.keys()));
    assert_eq!(after["empty"], Value::from(""));
    assert_eq!(after["zero"], Value::Int(0));
    assert_eq!(
        after["items"].as_slice().unwrap(),
        &[Value::from("1"), Value::Null, Value::from("****0")]
    );
}

#[test]
fn test_mapping_keys_are_not_redacted() {
    let redactor = three_digits();
    let value: Value = [("id123", Value::from("x"))].into_iter().collect();
    let redacted = redactor.redact(value);
    assert_eq!(redacted.get("id123"), Some(&Value::from("x")));
}

#[test]
fn test_empty_message_is_left_alone() {
    let filter = RedactingFilter::new(Redactor::from_regexes([r".*"]).unwrap());
    let mut event = Event::new("edge", Level::Debug, "");

    filter.filter(&mut event);

    assert_eq!(event.msg(), "");
}

#[test]
fn test_filter_never_drops_events() {
    let filter = RedactingFilter::new(Redactor::from_regexes([r"(?s).+"]).unwrap());
    for level in [Level::Debug, Level::Info, Level::Warning, Level::Error, Level::Critical] {
        let mut event = Event::new("edge", level, "anything").with_extra("k", "v");
        assert!(filter.filter(&mut event));
        assert_eq!(event.attribute("k"), Some(&Value::from("****")));
    }
}
