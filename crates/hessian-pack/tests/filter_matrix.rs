use std::cell::Cell;
use std::rc::Rc;

use hessian_pack::{EncodeError, Filter, FilterContainer, Hessian2Encoder, TypeFilter, Value};

fn field(value: &Value, name: &str) -> Value {
    match value {
        Value::Record(record) => record.borrow().get(name).cloned().unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

#[test]
fn filter_replaces_record_with_other_kind() {
    let filters = FilterContainer::new().on_type("Instant", |value, _| {
        match field(value, "millis") {
            Value::Int(ms) => Ok(Value::Date(i64::from(ms))),
            _ => Err(EncodeError::Filter("Instant without millis".into())),
        }
    });
    let mut encoder = Hessian2Encoder::new().with_filters(filters);
    let instant = Value::record("Instant", vec![("millis", Value::Int(120_000))]);
    assert_eq!(
        encoder.encode(&instant).unwrap(),
        [0x4b, 0x00, 0x00, 0x00, 0x02]
    );
    assert!(encoder.registry().class_defs().is_empty());
}

#[test]
fn filter_output_bytes_are_spliced_verbatim() {
    let filters = FilterContainer::new().on_type("Money", |value, encoder| {
        let amount = field(value, "amount");
        let bytes = encoder.encode_fragment(&amount)?;
        Ok(Value::Raw(bytes))
    });
    let mut encoder = Hessian2Encoder::new().with_filters(filters);
    let money = Value::record("Money", vec![("amount", Value::text("12.50"))]);
    let bytes = encoder
        .encode(&Value::list(vec![Value::Int(1), money]))
        .unwrap();
    assert_eq!(bytes, [0x7a, 0x91, 0x05, b'1', b'2', b'.', b'5', b'0']);
}

#[test]
fn encode_called_from_a_filter_keeps_enclosing_output() {
    let filters = FilterContainer::new().on_type("Wrapped", |value, encoder| {
        let inner = field(value, "inner");
        Ok(Value::Raw(encoder.encode(&inner)?))
    });
    let mut encoder = Hessian2Encoder::new().with_filters(filters);
    let wrapped = Value::record("Wrapped", vec![("inner", Value::Int(2))]);
    let bytes = encoder
        .encode(&Value::list(vec![Value::Int(1), wrapped]))
        .unwrap();
    assert_eq!(bytes, [0x7a, 0x91, 0x92]);
    assert_eq!(encoder.writer.pending(), 0);

    // The next top-level call starts a fresh message again.
    assert_eq!(encoder.encode(&Value::Int(3)).unwrap(), [0x93]);
}

#[test]
fn filter_returning_the_record_writes_it_normally() {
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    let filters = FilterContainer::new().on_type("Tag", move |value, _| {
        seen.set(seen.get() + 1);
        Ok(value.clone())
    });
    let mut encoder = Hessian2Encoder::new().with_filters(filters);
    let tag = Value::record("Tag", vec![("n", Value::Int(1))]);
    assert_eq!(
        encoder.encode(&tag).unwrap(),
        [b'C', 0x03, b'T', b'a', b'g', 0x91, 0x01, b'n', 0x60, 0x91]
    );
    assert_eq!(calls.get(), 1);
}

#[test]
fn filters_only_see_matching_records() {
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    let filters = FilterContainer::new().on_type("Secret", move |_, _| {
        seen.set(seen.get() + 1);
        Ok(Value::Null)
    });
    let mut encoder = Hessian2Encoder::new().with_filters(filters);
    let value = Value::list(vec![
        Value::typed_map("Secret", vec![(Value::text("k"), Value::Int(1))]),
        Value::record("Public", vec![("k", Value::Int(1))]),
        Value::record("Secret", vec![("k", Value::Int(1))]),
    ]);
    let bytes = encoder.encode(&value).unwrap();
    assert_eq!(calls.get(), 1);
    assert_eq!(bytes.last(), Some(&b'N'));
}

#[test]
fn first_accepting_filter_wins() {
    let filters = FilterContainer::new()
        .on_type("A", |_, _| Ok(Value::Int(1)))
        .on_type("A", |_, _| Ok(Value::Int(2)));
    assert_eq!(filters.len(), 2);
    let mut encoder = Hessian2Encoder::new().with_filters(filters);
    let bytes = encoder
        .encode(&Value::record("A", Vec::<(&str, Value)>::new()))
        .unwrap();
    assert_eq!(bytes, [0x91]);
}

#[test]
fn filter_error_aborts_encoding() {
    let filters = FilterContainer::new()
        .on_type("Broken", |_, _| Err(EncodeError::Filter("cannot serialize".into())));
    let mut encoder = Hessian2Encoder::new().with_filters(filters);
    let value = Value::list(vec![
        Value::Int(1),
        Value::record("Broken", vec![("x", Value::Null)]),
    ]);
    let err = encoder.encode(&value).unwrap_err();
    assert!(matches!(err, EncodeError::Filter(ref msg) if msg == "cannot serialize"));
    assert_eq!(err.to_string(), "filter failed: cannot serialize");
    assert_eq!(encoder.writer.pending(), 0);
}

struct Redact;

impl Filter for Redact {
    fn accepts(&self, value: &Value) -> bool {
        matches!(value, Value::Record(r) if r.borrow().get("password").is_some())
    }

    fn apply(&self, _value: &Value, _encoder: &mut Hessian2Encoder) -> Result<Value, EncodeError> {
        Ok(Value::text("***"))
    }
}

#[test]
fn custom_filter_implementation() {
    let mut filters = FilterContainer::new();
    assert!(filters.is_empty());
    filters.add(Redact);
    filters.add(TypeFilter::new("Other", |_: &Value, _: &mut Hessian2Encoder| {
        Ok(Value::Null)
    }));
    let login = Value::record("Login", vec![("password", Value::text("hunter2"))]);
    assert!(filters.callback(&login).is_some());
    assert!(filters.callback(&Value::Int(1)).is_none());

    let mut encoder = Hessian2Encoder::new();
    encoder.set_filters(filters);
    assert_eq!(encoder.encode(&login).unwrap(), [0x03, b'*', b'*', b'*']);
}
