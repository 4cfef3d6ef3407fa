//! Key order of JSON objects as they were read
//!
//! Typed records serialize in struct field order. Records that can be written
//! back as they came in carry a [`KeyOrder`], so their keys keep the layout of
//! the fragment they were read from.

use serde_json::{Map, Value};

/// Key layout of one JSON object.
///
/// Ignored by equality, like key order in `serde_json::Map`.
#[derive(Debug, Clone, Default)]
pub struct KeyOrder(Vec<String>);

impl KeyOrder {
    /// Record the key order of `map`.
    pub fn of(map: &Map<String, Value>) -> Self {
        Self(map.keys().cloned().collect())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|k| k == key)
    }

    /// Reorder the keys of an object: recorded keys first in recorded order,
    /// then the rest as they are. Other values pass through.
    pub fn arrange(&self, value: Value) -> Value {
        match value {
            Value::Object(map) if !self.0.is_empty() => {
                let (mut known, unknown): (Vec<_>, Vec<_>) =
                    map.into_iter().partition(|(key, _)| self.position(key).is_some());
                known.sort_by_key(|(key, _)| self.position(key));
                Value::Object(known.into_iter().chain(unknown).collect())
            }
            other => other,
        }
    }
}

impl<const N: usize> From<[&str; N]> for KeyOrder {
    fn from(keys: [&str; N]) -> Self {
        Self(keys.iter().map(|key| (*key).to_string()).collect())
    }
}

impl PartialEq for KeyOrder {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

/// Implement `Serialize`/`Deserialize` for `#[serde(remote = "Self")]`
/// records that carry a `key_order: KeyOrder` field.
macro_rules! keep_key_order {
    ($($ty:ty),+ $(,)?) => {$(
        impl ::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                let value = <$ty>::serialize(self, ::serde_json::value::Serializer)
                    .map_err(<S::Error as ::serde::ser::Error>::custom)?;
                ::serde::Serialize::serialize(&self.key_order.arrange(value), serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let map: ::serde_json::Map<String, ::serde_json::Value> =
                    ::serde::Deserialize::deserialize(deserializer)?;
                let key_order = $crate::order::KeyOrder::of(&map);
                let mut record = <$ty>::deserialize(::serde_json::Value::Object(map))
                    .map_err(<D::Error as ::serde::de::Error>::custom)?;
                record.key_order = key_order;
                Ok(record)
            }
        }
    )+};
}

pub(crate) use keep_key_order;
