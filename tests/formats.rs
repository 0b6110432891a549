use chrono::{TimeZone, Utc};

use forma::value::{ValueDeserializer, ValueSerializer};
use forma::{Bytes, Deserialize, Registry, Serialize, Value};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Attachment {
    name: String,
    blob: Bytes,
    uploaded: chrono::DateTime<Utc>,
}

fn attachment() -> Attachment {
    Attachment {
        name: "logo".to_owned(),
        blob: Bytes::from(&b"\x89PNG"[..]),
        uploaded: Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 0).unwrap(),
    }
}

#[test]
fn bytes_and_dates_render_as_strings_in_both_formats() {
    let json = forma::json::to_string(&attachment()).unwrap();
    assert_eq!(
        json,
        r#"{"name":"logo","blob":"iVBORw==","uploaded":"2024-05-17T10:30:00+00:00"}"#
    );
    assert_eq!(forma::json::from_str::<Attachment>(&json).unwrap(), attachment());

    let yaml = forma::yaml::to_string(&attachment()).unwrap();
    assert_eq!(forma::yaml::from_str::<Attachment>(&yaml).unwrap(), attachment());
}

#[test]
fn documents_transcode_between_formats_through_the_raw_tree() {
    let json = r#"{"name":"logo","count":2,"tags":["a","b"],"meta":{"draft":true}}"#;
    let raw = forma::json::parse(json).unwrap();

    let yaml = forma::yaml::to_string(&raw).unwrap();
    let back = forma::yaml::parse(&yaml).unwrap();
    assert_eq!(back, raw);

    // And back out to the original JSON bytes.
    assert_eq!(forma::json::to_string(&back).unwrap(), json);
}

#[test]
fn reserialization_is_idempotent() {
    let first = forma::json::to_string(&attachment()).unwrap();
    let raw = forma::json::parse(&first).unwrap();
    assert_eq!(forma::json::to_string(&raw).unwrap(), first);
}

// -----------------------------------------------------------------------------
// Checked and unchecked dispatch

#[test]
fn checked_dispatch_lowers_to_the_raw_tree() {
    let raw = forma::serialize(&attachment(), ValueSerializer).unwrap();
    let map = raw.as_map().unwrap();
    assert!(matches!(map.get("blob"), Some(Value::Bytes(_))));

    let back: Attachment = forma::deserialize(ValueDeserializer::new(raw)).unwrap();
    assert_eq!(back, attachment());
}

#[test]
fn unchecked_dispatch_requires_registration() {
    let mut registry = Registry::new();

    let err = forma::serialize_unknown(&attachment(), ValueSerializer, &registry).unwrap_err();
    assert!(err.to_string().contains("serialize capability"), "{err}");

    registry.register::<Attachment>();
    let raw = forma::serialize_unknown(&attachment(), ValueSerializer, &registry).unwrap();
    let back: Attachment =
        forma::deserialize_unknown(ValueDeserializer::new(raw), &registry).unwrap();
    assert_eq!(back, attachment());
}

#[test]
fn unchecked_dispatch_keeps_path_qualified_errors() {
    let mut registry = Registry::new();
    registry.register_deserialize::<Attachment>();

    let raw = forma::json::parse(r#"{"name":1,"blob":"aGk=","uploaded":"2024-01-01"}"#).unwrap();
    let err =
        forma::deserialize_unknown::<Attachment, _>(ValueDeserializer::new(raw), &registry)
            .unwrap_err();
    assert!(err.to_string().contains("`name`"), "{err}");
}
