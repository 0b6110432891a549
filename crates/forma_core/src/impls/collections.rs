use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::marker::PhantomData;

use crate::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use crate::error::{DeserializeError, SerializeError};
use crate::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

// -----------------------------------------------------------------------------
// References and boxes

impl<T: Serialize + ?Sized> Serialize for &T {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
        (**self).serialize(serializer)
    }
}

impl<T: Serialize + ?Sized> Serialize for Box<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
        (**self).serialize(serializer)
    }
}

impl<T: Deserialize> Deserialize for Box<T> {
    fn deserialize<D: Deserializer>(deserializer: D) -> Result<Self, DeserializeError> {
        T::deserialize(deserializer).map(Box::new)
    }
}

// -----------------------------------------------------------------------------
// Option

impl<T: Serialize> Serialize for Option<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
        match self {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<T: Deserialize> Deserialize for Option<T> {
    fn deserialize<D: Deserializer>(deserializer: D) -> Result<Self, DeserializeError> {
        struct OptionVisitor<T>(PhantomData<T>);

        impl<T: Deserialize> Visitor for OptionVisitor<T> {
            type Output = Option<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an optional value")
            }

            fn visit_null(self) -> Result<Option<T>, DeserializeError> {
                Ok(None)
            }

            fn visit_some<D: Deserializer>(
                self,
                deserializer: D,
            ) -> Result<Option<T>, DeserializeError> {
                T::deserialize(deserializer).map(Some)
            }
        }

        deserializer.deserialize_option(OptionVisitor(PhantomData))
    }
}

// -----------------------------------------------------------------------------
// Sequences

impl<T: Serialize> Serialize for [T] {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<T: Serialize> Serialize for Vec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
        self.as_slice().serialize(serializer)
    }
}

impl<T: Deserialize> Deserialize for Vec<T> {
    fn deserialize<D: Deserializer>(deserializer: D) -> Result<Self, DeserializeError> {
        struct SeqVisitor<T>(PhantomData<T>);

        impl<T: Deserialize> Visitor for SeqVisitor<T> {
            type Output = Vec<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence")
            }

            fn visit_seq<A: SeqAccess>(self, mut seq: A) -> Result<Vec<T>, DeserializeError> {
                let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                let mut index = 0;
                while let Some(element) = seq.next_element()? {
                    let path = seq.path().index(index);
                    out.push(T::deserialize(seq.scoped(element, path))?);
                    index += 1;
                }
                Ok(out)
            }
        }

        deserializer.deserialize_seq(SeqVisitor(PhantomData))
    }
}

// -----------------------------------------------------------------------------
// String-keyed maps

macro_rules! impl_string_map {
    ($($map:ident)*) => {$(
        impl<V: Serialize> Serialize for $map<String, V> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, SerializeError> {
                let mut state = serializer.serialize_map(Some(self.len()))?;
                for (key, value) in self {
                    state.serialize_entry(key, value)?;
                }
                state.end()
            }
        }

        impl<V: Deserialize> Deserialize for $map<String, V> {
            fn deserialize<D: Deserializer>(deserializer: D) -> Result<Self, DeserializeError> {
                struct MapVisitor<V>(PhantomData<V>);

                impl<V: Deserialize> Visitor for MapVisitor<V> {
                    type Output = $map<String, V>;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str("an object")
                    }

                    fn visit_map<A: MapAccess>(
                        self,
                        mut map: A,
                    ) -> Result<$map<String, V>, DeserializeError> {
                        let mut out = $map::new();
                        while let Some((key, value)) = map.next_entry()? {
                            let path = map.path().field(&key);
                            out.insert(key, V::deserialize(map.scoped(value, path))?);
                        }
                        Ok(out)
                    }
                }

                deserializer.deserialize_map(MapVisitor(PhantomData))
            }
        }
    )*};
}

impl_string_map!(HashMap BTreeMap);
