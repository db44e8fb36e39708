//! Lenient field decoding shared by the payload parsers.

use serde::{Deserialize, Deserializer};

/// Decodes a field that may be absent or `null` into its default value.
///
/// Use together with `#[serde(default)]`; the default covers absence, this
/// covers an explicit `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
