use std::fmt;

use auto_impl::auto_impl;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::traits::{PositionalDriver, SpeedDirectionalDriver, SteppedDriver};

/// Driver-specific settings passed verbatim to [`MotorDriver::initialize`].
pub type DriverConfig = serde_json::Map<String, serde_json::Value>;

/// Key/value status reported by a driver or a motor.
pub type Status = serde_json::Map<String, serde_json::Value>;

/// A group of operations a driver may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// [`PositionalDriver`]
    Positional,
    /// [`SteppedDriver`]
    Stepped,
    /// [`SpeedDirectionalDriver`]
    SpeedDirectional,
}

impl Capability {
    pub const ALL: [Capability; 3] = [
        Capability::Positional,
        Capability::Stepped,
        Capability::SpeedDirectional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Positional => "positional",
            Capability::Stepped => "stepped",
            Capability::SpeedDirectional => "speed_directional",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle shared by every motor driver.
///
/// A driver declares the capability contracts it satisfies by overriding the
/// matching `as_*` accessor. Constructing a driver must not touch hardware:
/// the registry builds a throwaway instance to read its capabilities, and
/// hardware setup belongs in [`initialize`](Self::initialize).
///
/// Operational failures (bad arguments, not initialized, hardware refused)
/// are reported as `false` rather than as errors.
#[auto_impl(Box, Arc)]
pub trait MotorDriver: Send + Sync {
    fn initialize(&self, config: &DriverConfig) -> bool;

    fn shutdown(&self) -> bool;

    fn status(&self) -> Status;

    fn as_positional(&self) -> Option<&dyn PositionalDriver> {
        None
    }

    fn as_stepped(&self) -> Option<&dyn SteppedDriver> {
        None
    }

    fn as_speed_directional(&self) -> Option<&dyn SpeedDirectionalDriver> {
        None
    }

    /// Capabilities declared through the `as_*` accessors.
    fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.has_capability(*c))
            .collect()
    }

    fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::Positional => self.as_positional().is_some(),
            Capability::Stepped => self.as_stepped().is_some(),
            Capability::SpeedDirectional => self.as_speed_directional().is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DummyPositionalDriver, DummySpeedDirectionalDriver, DummySteppedDriver};

    struct NoCapabilityDriver;

    impl MotorDriver for NoCapabilityDriver {
        fn initialize(&self, _config: &DriverConfig) -> bool {
            true
        }

        fn shutdown(&self) -> bool {
            true
        }

        fn status(&self) -> Status {
            Status::new()
        }
    }

    #[test]
    fn declared_capabilities() {
        assert_eq!(
            DummyPositionalDriver::new().capabilities(),
            vec![Capability::Positional]
        );
        assert_eq!(
            DummySteppedDriver::new().capabilities(),
            vec![Capability::Stepped]
        );
        assert_eq!(
            DummySpeedDirectionalDriver::new().capabilities(),
            vec![Capability::SpeedDirectional]
        );
        assert!(NoCapabilityDriver.capabilities().is_empty());
    }

    #[test]
    fn boxed_driver_forwards_capabilities() {
        let driver: Box<dyn MotorDriver> = Box::new(DummySteppedDriver::new());
        assert!(driver.has_capability(Capability::Stepped));
        assert!(!driver.has_capability(Capability::Positional));
        assert!(driver.as_stepped().is_some());
    }

    #[test]
    fn capability_display() {
        assert_eq!(Capability::SpeedDirectional.to_string(), "speed_directional");
        assert_eq!(
            serde_json::to_value(Capability::Stepped).unwrap(),
            serde_json::json!("stepped")
        );
    }
}
