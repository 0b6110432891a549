use proptest::prelude::*;

use forma_core::Value;
use forma_core::value::Map;

fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(Value::Number),
        ".*".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Seq),
            prop::collection::vec((".*", inner), 0..5)
                .prop_map(|entries| Value::Map(entries.into_iter().collect::<Map>())),
        ]
    })
}

proptest! {
    #[test]
    fn rendering_then_parsing_is_lossless(value in value_strategy()) {
        let text = forma_yaml::to_string(&value).unwrap();
        let back = forma_yaml::parse(&text).unwrap();
        prop_assert_eq!(&back, &value);
    }

    #[test]
    fn reserialization_is_byte_stable(value in value_strategy()) {
        let first = forma_yaml::to_string(&value).unwrap();
        let back = forma_yaml::parse(&first).unwrap();
        let second = forma_yaml::to_string(&back).unwrap();
        prop_assert_eq!(second, first);
    }
}

#[test]
fn typed_round_trip() {
    let tags = vec!["a".to_string(), "b".to_string()];
    let text = forma_yaml::to_string(&tags).unwrap();
    assert_eq!(text, "- a\n- b\n");

    let back: Vec<String> = forma_yaml::from_str(&text).unwrap();
    assert_eq!(back, tags);
}

#[test]
fn decode_failures_carry_field_paths() {
    let err = forma_yaml::from_str::<Vec<String>>("- ok\n- 123\n").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("[1]"), "{message}");
    assert!(message.contains("found number"), "{message}");
}

#[test]
fn dates_round_trip_as_rfc3339_strings() {
    use chrono::{DateTime, TimeZone, Utc};

    let stamp = Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 0).unwrap();
    let text = forma_yaml::to_string(&stamp).unwrap();
    assert_eq!(text, "\"2024-05-17T10:30:00+00:00\"\n");

    let back: DateTime<Utc> = forma_yaml::from_str(&text).unwrap();
    assert_eq!(back, stamp);
}

#[test]
fn bytes_round_trip_as_base64() {
    use forma_core::Bytes;

    let blob = Bytes::from(&b"\x00\x01binary"[..]);
    let text = forma_yaml::to_string(&blob).unwrap();
    let back: Bytes = forma_yaml::from_str(&text).unwrap();
    assert_eq!(back, blob);
}
