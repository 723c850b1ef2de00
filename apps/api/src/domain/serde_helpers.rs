use serde::{Deserialize, Deserializer};

/// Distinguishes an explicit `null` from an absent field
///
/// Pair with `#[serde(default)]` on an `Option<Option<T>>` field: absent
/// fields stay `None`, `null` becomes `Some(None)`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
