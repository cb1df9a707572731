pub mod offer;
pub mod skill;

use serde::{Deserialize, Deserializer};

/// Deserializes `null` the same way as a missing field: into `T::default()`.
/// Scraped listings and older clients send `null` for empty collections.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
