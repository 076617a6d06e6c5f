use serde::{Serialize, Deserialize, Serializer, Deserializer};
use serde::de::Error as _;

use super::types::BroadcastMethod;

/// Serializes a BroadcastMethod as its configuration name
pub fn serialize_broadcast_method<S>(method: &BroadcastMethod, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    method.name().serialize(serializer)
}

/// Deserializes a BroadcastMethod from its configuration name
pub fn deserialize_broadcast_method<'de, D>(deserializer: D) -> Result<BroadcastMethod, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(D::Error::custom)
}
