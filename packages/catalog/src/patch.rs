// ABOUTME: Serde helpers for partial update payloads
// ABOUTME: Distinguishes an omitted field from an explicit null on nullable columns

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field of an update payload.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]` so that
/// an omitted key stays `None`, `null` becomes `Some(None)` and a value
/// becomes `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
