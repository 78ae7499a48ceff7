//! Deserialization helpers for update DTOs.

use serde::{Deserialize, Deserializer};

/// Distinguish an explicit `null` from an absent field.
///
/// Pair with `#[serde(default)]`: an absent field stays `None` (leave
/// unchanged), `null` becomes `Some(None)` (clear) and a value becomes
/// `Some(Some(value))`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
