//! Presence-aware deserialization for partial updates.
//!
//! With `#[serde(default, deserialize_with = "double_option")]` on an
//! `Option<Option<T>>` field, an absent key stays `None`, an explicit `null`
//! becomes `Some(None)` and a value becomes `Some(Some(v))`.

use serde::{Deserialize, Deserializer};

pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
