//! Tri-state field presence for sandbox config keys

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A config key that may be absent, explicitly `null`, or set.
///
/// Merge decisions treat `Absent` and `Null` alike ("not defined"), but
/// `Null` survives serialization so fragments appended verbatim keep their
/// explicit nulls. Pair with
/// `#[serde(default, skip_serializing_if = "Field::is_absent")]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Absent,
    Null,
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Present(value)
    }
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The value, if the key is set to something other than `null`.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    /// Return the value, replacing `Absent`/`Null` with `T::default()` first.
    pub fn get_or_insert_default(&mut self) -> &mut T
    where
        T: Default,
    {
        if !matches!(self, Self::Present(_)) {
            *self = Self::Present(T::default());
        }
        match self {
            Self::Present(value) => value,
            Self::Absent | Self::Null => unreachable!("field was just set"),
        }
    }

    /// Overwrite with `incoming` when it carries a value.
    pub fn overwrite_from(&mut self, incoming: &Field<T>)
    where
        T: Clone,
    {
        if let Self::Present(value) = incoming {
            *self = Self::Present(value.clone());
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(value) => value.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Present(value),
            None => Self::Null,
        })
    }
}
