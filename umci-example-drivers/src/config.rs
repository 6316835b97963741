use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;
use umci::DriverConfig;

/// A GPIO pin, given either as a number or as a board-specific name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PinId {
    /// Pin number, e.g. `18`.
    Number(u32),
    /// Pin name, e.g. `"GPIO18"`.
    Name(String),
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinId::Number(n) => write!(f, "{n}"),
            PinId::Name(s) => f.write_str(s),
        }
    }
}

/// Deserializes a driver's settings, logging why they were rejected.
pub(crate) fn parse_config<T>(driver: &str, config: &DriverConfig) -> Option<T>
where
    T: DeserializeOwned,
{
    match serde_json::from_value(serde_json::Value::Object(config.clone())) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("{driver}: invalid config {config:?}: {e}");
            None
        }
    }
}
