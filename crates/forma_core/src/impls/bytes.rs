use std::fmt;
use std::ops::Deref;

use crate::de::{Deserialize, Deserializer, Visitor};
use crate::error::{DeserializeError, SerializeError};
use crate::ser::{Serialize, Serializer};

// -----------------------------------------------------------------------------
// Bytes

/// A byte sequence that serializes through the byte-sequence channel.
///
/// `Vec<u8>` serializes as a sequence of numbers like any other vector; wrap
/// it in `Bytes` to select the backend's byte convention instead (base64
/// strings in the text formats).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    #[inline]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl Serialize for Bytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
        serializer.serialize_bytes(&self.0)
    }
}

impl Deserialize for Bytes {
    fn deserialize<D: Deserializer>(deserializer: D) -> Result<Self, DeserializeError> {
        struct BytesVisitor;

        impl Visitor for BytesVisitor {
            type Output = Bytes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a byte sequence")
            }

            fn visit_bytes(self, v: Vec<u8>) -> Result<Bytes, DeserializeError> {
                Ok(Bytes(v))
            }
        }

        deserializer.deserialize_bytes(BytesVisitor)
    }
}
