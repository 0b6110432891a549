//! Typed runtime checks over raw values, with path-qualified errors.
//!
//! Each function takes a raw [`Value`] and the [`FieldPath`] of the field it
//! is validating, and either produces the typed representation or fails with
//! a [`ValidationError`] naming that exact path. Validation is fail-fast:
//! the first invalid field aborts the whole deserialization, and no partial
//! object is ever returned.
//!
//! The array helpers append an index suffix on element failure, so given
//! `tags: ["ok", 123]` the reported path is `tags[1]`. The nested-object
//! helpers recurse through the deserializer's explicit
//! [`scoped`](crate::Deserializer::scoped) operation.

use chrono::{DateTime, NaiveDate, Utc};

use crate::de::{Deserialize, Deserializer};
use crate::error::{DeserializeError, ValidationError};
use crate::path::FieldPath;
use crate::value::{Map, Value, ValueKind};

// -----------------------------------------------------------------------------
// Scalar checks

/// Validates that `value` is a boolean.
pub fn boolean(value: &Value, path: &FieldPath) -> Result<bool, ValidationError> {
    match value {
        Value::Bool(v) => Ok(*v),
        other => Err(ValidationError::type_mismatch(
            path,
            ValueKind::Bool,
            other.kind(),
        )),
    }
}

/// Validates that `value` is a number, rejecting the NaN sentinel.
pub fn number(value: &Value, path: &FieldPath) -> Result<f64, ValidationError> {
    match value {
        Value::Number(v) if v.is_nan() => Err(ValidationError::NotANumber {
            path: path.to_string(),
        }),
        Value::Number(v) => Ok(*v),
        other => Err(ValidationError::type_mismatch(
            path,
            ValueKind::Number,
            other.kind(),
        )),
    }
}

/// Validates that `value` is a string.
pub fn string<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a str, ValidationError> {
    match value {
        Value::String(v) => Ok(v),
        other => Err(ValidationError::type_mismatch(
            path,
            ValueKind::String,
            other.kind(),
        )),
    }
}

/// Validates that `value` is a date.
///
/// Accepts either an already-constructed date or a string parseable as
/// RFC 3339 or `YYYY-MM-DD`; both normalize to the same UTC representation.
pub fn date(value: &Value, path: &FieldPath) -> Result<DateTime<Utc>, ValidationError> {
    match value {
        Value::Date(v) => Ok(*v),
        Value::String(text) => parse_date(text).ok_or_else(|| ValidationError::Date {
            path: path.to_string(),
            detail: format!("cannot parse `{text}` as a date"),
        }),
        other => Err(ValidationError::type_mismatch(
            path,
            ValueKind::Date,
            other.kind(),
        )),
    }
}

pub(crate) fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(DateTime::from_naive_utc_and_offset(
        day.and_hms_opt(0, 0, 0)?,
        Utc,
    ))
}

// -----------------------------------------------------------------------------
// Composite checks

/// Validates that `value` is a sequence, independent of element type.
pub fn array<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a [Value], ValidationError> {
    match value {
        Value::Seq(v) => Ok(v),
        other => Err(ValidationError::type_mismatch(
            path,
            ValueKind::Seq,
            other.kind(),
        )),
    }
}

/// Validates that `value` is a keyed mapping — not a sequence, not absent.
pub fn object<'a>(value: &'a Value, path: &FieldPath) -> Result<&'a Map, ValidationError> {
    match value {
        Value::Map(v) => Ok(v),
        other => Err(ValidationError::type_mismatch(
            path,
            ValueKind::Map,
            other.kind(),
        )),
    }
}

/// Validates a sequence of strings, reporting element failures at `path[i]`.
pub fn string_array(value: &Value, path: &FieldPath) -> Result<Vec<String>, ValidationError> {
    let elements = array(value, path)?;
    let mut out = Vec::with_capacity(elements.len());
    for (i, element) in elements.iter().enumerate() {
        out.push(string(element, &path.index(i))?.to_owned());
    }
    Ok(out)
}

/// Validates a sequence of numbers, reporting element failures at `path[i]`.
pub fn number_array(value: &Value, path: &FieldPath) -> Result<Vec<f64>, ValidationError> {
    let elements = array(value, path)?;
    let mut out = Vec::with_capacity(elements.len());
    for (i, element) in elements.iter().enumerate() {
        out.push(number(element, &path.index(i))?);
    }
    Ok(out)
}

/// Validates a sequence of booleans, reporting element failures at `path[i]`.
pub fn boolean_array(value: &Value, path: &FieldPath) -> Result<Vec<bool>, ValidationError> {
    let elements = array(value, path)?;
    let mut out = Vec::with_capacity(elements.len());
    for (i, element) in elements.iter().enumerate() {
        out.push(boolean(element, &path.index(i))?);
    }
    Ok(out)
}

// -----------------------------------------------------------------------------
// Nested recursion

/// Validates that `value` is object-shaped, then reconstructs `T` from a
/// child deserializer scoped to it.
///
/// This is how struct-typed fields recurse: the nested raw value gets its
/// own freshly-scoped deserializer instead of the outer one.
pub fn nested_object<T: Deserialize, D: Deserializer>(
    value: Value,
    deserializer: &D,
    path: FieldPath,
) -> Result<T, DeserializeError> {
    object(&value, &path)?;
    T::deserialize(deserializer.scoped(value, path))
}

/// Validates array shape, then reconstructs each element as a nested object
/// with an indexed path.
pub fn object_array<T: Deserialize, D: Deserializer>(
    value: Value,
    deserializer: &D,
    path: FieldPath,
) -> Result<Vec<T>, DeserializeError> {
    let elements = match value {
        Value::Seq(elements) => elements,
        other => {
            return Err(
                ValidationError::type_mismatch(&path, ValueKind::Seq, other.kind()).into(),
            );
        }
    };

    let mut out = Vec::with_capacity(elements.len());
    for (i, element) in elements.into_iter().enumerate() {
        out.push(nested_object(element, deserializer, path.index(i))?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::value::{Map, Value, ValueDeserializer};

    fn at(name: &str) -> FieldPath {
        FieldPath::root().field(name)
    }

    #[test]
    fn number_rejects_wrong_kind_with_path() {
        let err = number(&Value::String("thirty".into()), &at("age")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("`age`"), "{message}");
        assert!(message.contains("expected number"), "{message}");
        assert!(message.contains("found string"), "{message}");
    }

    #[test]
    fn number_rejects_nan() {
        let err = number(&Value::Number(f64::NAN), &at("score")).unwrap_err();
        assert!(err.to_string().contains("NaN"));
    }

    #[test]
    fn string_array_reports_indexed_path() {
        let raw = Value::Seq(vec![Value::String("ok".into()), Value::Number(123.0)]);
        let err = string_array(&raw, &at("tags")).unwrap_err();
        assert!(err.to_string().contains("`tags[1]`"), "{err}");
    }

    #[test]
    fn date_accepts_constructed_and_parseable() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 17, 10, 30, 0).unwrap();
        assert_eq!(date(&Value::Date(instant), &at("when")).unwrap(), instant);

        let parsed = date(&Value::String("2024-05-17T10:30:00Z".into()), &at("when")).unwrap();
        assert_eq!(parsed, instant);

        let midnight = date(&Value::String("2024-05-17".into()), &at("when")).unwrap();
        assert_eq!(midnight, Utc.with_ymd_and_hms(2024, 5, 17, 0, 0, 0).unwrap());
    }

    #[test]
    fn date_rejects_unparseable_string() {
        let err = date(&Value::String("yesterday-ish".into()), &at("when")).unwrap_err();
        assert!(err.to_string().contains("`when`"), "{err}");
    }

    #[test]
    fn object_rejects_sequence_and_null() {
        assert!(object(&Value::Seq(vec![]), &at("author")).is_err());
        assert!(object(&Value::Null, &at("author")).is_err());
        assert!(object(&Value::Map(Map::new()), &at("author")).is_ok());
    }

    #[test]
    fn number_array_reports_indexed_path() {
        let raw = Value::Seq(vec![Value::Number(1.0), Value::Bool(true)]);
        let err = number_array(&raw, &at("scores")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("`scores[1]`"), "{message}");
        assert!(message.contains("found boolean"), "{message}");
    }

    #[test]
    fn boolean_array_reports_indexed_path() {
        let raw = Value::Seq(vec![Value::Bool(true), Value::String("no".into())]);
        let err = boolean_array(&raw, &at("flags")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("`flags[1]`"), "{message}");
        assert!(message.contains("found string"), "{message}");
    }

    #[test]
    fn nested_object_recurses_through_a_scoped_child() {
        let mut inner = Map::new();
        inner.insert("likes", Value::Number(3.0));

        let de = ValueDeserializer::new(Value::Null);
        let out: HashMap<String, f64> =
            nested_object(Value::Map(inner), &de, at("author")).unwrap();
        assert_eq!(out.get("likes"), Some(&3.0));
    }

    #[test]
    fn nested_object_rejects_non_objects_at_the_path() {
        let de = ValueDeserializer::new(Value::Null);
        let err = nested_object::<HashMap<String, f64>, _>(Value::Seq(vec![]), &de, at("author"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("`author`"), "{message}");
        assert!(message.contains("expected object"), "{message}");
        assert!(message.contains("found sequence"), "{message}");
    }

    #[test]
    fn object_array_reports_element_failures_with_indexed_paths() {
        let mut first = Map::new();
        first.insert("likes", Value::Number(1.0));
        let mut second = Map::new();
        second.insert("likes", Value::String("many".into()));
        let raw = Value::Seq(vec![Value::Map(first), Value::Map(second)]);

        let de = ValueDeserializer::new(Value::Null);
        let err = object_array::<HashMap<String, f64>, _>(raw, &de, at("posts")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("`posts[1].likes`"), "{message}");
        assert!(message.contains("found string"), "{message}");
    }

    #[test]
    fn object_array_rejects_non_sequences() {
        let de = ValueDeserializer::new(Value::Null);
        let err =
            object_array::<HashMap<String, f64>, _>(Value::Null, &de, at("posts")).unwrap_err();
        assert!(err.to_string().contains("expected sequence"), "{err}");
    }
}
