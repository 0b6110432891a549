use std::fmt;

use chrono::{DateTime, Utc};

use crate::de::{Deserialize, Deserializer, Visitor};
use crate::error::{DeserializeError, SerializeError};
use crate::ser::{Serialize, Serializer};

// -----------------------------------------------------------------------------
// bool

impl Serialize for bool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
        serializer.serialize_bool(*self)
    }
}

impl Deserialize for bool {
    fn deserialize<D: Deserializer>(deserializer: D) -> Result<Self, DeserializeError> {
        struct BoolVisitor;

        impl Visitor for BoolVisitor {
            type Output = bool;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean")
            }

            fn visit_bool(self, v: bool) -> Result<bool, DeserializeError> {
                Ok(v)
            }
        }

        deserializer.deserialize_bool(BoolVisitor)
    }
}

// -----------------------------------------------------------------------------
// Numbers

/// The number model is a single `f64` kind; integer types narrow on decode
/// and reject fractional or out-of-range inputs.
macro_rules! impl_integer {
    ($($ty:ident)*) => {$(
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
                serializer.serialize_number(*self as f64)
            }
        }

        impl Deserialize for $ty {
            fn deserialize<D: Deserializer>(deserializer: D) -> Result<Self, DeserializeError> {
                struct IntegerVisitor;

                impl Visitor for IntegerVisitor {
                    type Output = $ty;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, "an integer representable as `{}`", stringify!($ty))
                    }

                    fn visit_number(self, v: f64) -> Result<$ty, DeserializeError> {
                        if !v.is_finite() || v.fract() != 0.0 {
                            return Err(DeserializeError::custom(format!(
                                "invalid number: `{v}` is not an integer",
                            )));
                        }
                        if v < $ty::MIN as f64 || v > $ty::MAX as f64 {
                            return Err(DeserializeError::custom(format!(
                                "invalid number: `{v}` is out of range for `{}`",
                                stringify!($ty),
                            )));
                        }
                        Ok(v as $ty)
                    }
                }

                deserializer.deserialize_number(IntegerVisitor)
            }
        }
    )*};
}

impl_integer!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

macro_rules! impl_float {
    ($($ty:ident)*) => {$(
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
                serializer.serialize_number(*self as f64)
            }
        }

        impl Deserialize for $ty {
            fn deserialize<D: Deserializer>(deserializer: D) -> Result<Self, DeserializeError> {
                struct FloatVisitor;

                impl Visitor for FloatVisitor {
                    type Output = $ty;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str("a number")
                    }

                    fn visit_number(self, v: f64) -> Result<$ty, DeserializeError> {
                        Ok(v as $ty)
                    }
                }

                deserializer.deserialize_number(FloatVisitor)
            }
        }
    )*};
}

impl_float!(f32 f64);

// -----------------------------------------------------------------------------
// Strings

impl Serialize for str {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
        serializer.serialize_string(self)
    }
}

impl Serialize for String {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
        serializer.serialize_string(self)
    }
}

impl Deserialize for String {
    fn deserialize<D: Deserializer>(deserializer: D) -> Result<Self, DeserializeError> {
        struct StringVisitor;

        impl Visitor for StringVisitor {
            type Output = String;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string")
            }

            fn visit_string(self, v: String) -> Result<String, DeserializeError> {
                Ok(v)
            }
        }

        deserializer.deserialize_string(StringVisitor)
    }
}

// -----------------------------------------------------------------------------
// Dates

impl Serialize for DateTime<Utc> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
        serializer.serialize_date(*self)
    }
}

impl Deserialize for DateTime<Utc> {
    fn deserialize<D: Deserializer>(deserializer: D) -> Result<Self, DeserializeError> {
        struct DateVisitor;

        impl Visitor for DateVisitor {
            type Output = DateTime<Utc>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a date")
            }

            fn visit_date(self, v: DateTime<Utc>) -> Result<DateTime<Utc>, DeserializeError> {
                Ok(v)
            }
        }

        deserializer.deserialize_date(DateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::de::Deserialize;
    use crate::value::{Value, ValueDeserializer};

    #[test]
    fn integer_rejects_fraction_and_overflow() {
        let err = u8::deserialize(ValueDeserializer::new(Value::Number(1.5))).unwrap_err();
        assert!(err.to_string().contains("not an integer"), "{err}");

        let err = u8::deserialize(ValueDeserializer::new(Value::Number(300.0))).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn integer_accepts_whole_numbers() {
        let v = i32::deserialize(ValueDeserializer::new(Value::Number(-42.0))).unwrap();
        assert_eq!(v, -42);
    }
}
