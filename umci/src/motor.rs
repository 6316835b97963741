use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::{
    error::Error,
    traits::{
        Capability, DriverConfig, MotorDriver, PositionalDriver, SpeedDirectionalDriver, Status,
        SteppedDriver,
    },
};

/// The kind of motor requested at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MotorKind {
    #[serde(alias = "servo")]
    Positional,
    #[serde(alias = "stepper")]
    Stepped,
    #[serde(alias = "bldc")]
    SpeedDirectional,
}

impl MotorKind {
    /// The capability a driver must implement to back this kind of motor.
    pub fn required_capability(&self) -> Capability {
        match self {
            MotorKind::Positional => Capability::Positional,
            MotorKind::Stepped => Capability::Stepped,
            MotorKind::SpeedDirectional => Capability::SpeedDirectional,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.required_capability().as_str()
    }
}

impl fmt::Display for MotorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Uninitialized,
    Initialized,
    Shutdown,
}

/// A named motor wrapping one driver.
///
/// Every capability operation checks that the driver implements the contract
/// defining it before forwarding the call; driver results are returned as-is.
pub struct Motor {
    name: String,
    kind: MotorKind,
    driver: Box<dyn MotorDriver>,
    state: MotorState,
}

impl Motor {
    /// Wraps `driver`, failing if it lacks the capability `kind` requires.
    pub fn new(
        name: impl Into<String>,
        kind: MotorKind,
        driver: Box<dyn MotorDriver>,
    ) -> Result<Self, Error> {
        let name = name.into();
        let required = kind.required_capability();
        if !driver.has_capability(required) {
            return Err(Error::CapabilityMismatch {
                motor: name,
                required,
            });
        }
        Ok(Self {
            name,
            kind,
            driver,
            state: MotorState::Uninitialized,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MotorKind {
        self.kind
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == MotorState::Initialized
    }

    /// Initializes the driver. Returns `true` without calling the driver when
    /// the motor is already initialized.
    pub fn initialize(&mut self, config: &DriverConfig) -> bool {
        if self.is_initialized() {
            return true;
        }
        if self.driver.initialize(config) {
            debug!("motor {:?}: {:?} -> Initialized", self.name, self.state);
            self.state = MotorState::Initialized;
            true
        } else {
            warn!("motor {:?}: driver failed to initialize", self.name);
            false
        }
    }

    /// Shuts the driver down. Returns `true` without calling the driver when
    /// the motor is not initialized.
    pub fn shutdown(&mut self) -> bool {
        if !self.is_initialized() {
            return true;
        }
        if self.driver.shutdown() {
            debug!("motor {:?}: Initialized -> Shutdown", self.name);
            self.state = MotorState::Shutdown;
            true
        } else {
            warn!("motor {:?}: driver failed to shut down", self.name);
            false
        }
    }

    /// Driver status merged with `name`, `kind` and `initialized`.
    pub fn status(&self) -> Status {
        let mut status = self.driver.status();
        status.insert("name".into(), json!(self.name));
        status.insert("kind".into(), json!(self.kind.as_str()));
        status.insert("initialized".into(), json!(self.is_initialized()));
        status
    }

    pub fn set_position(&self, degrees: f64) -> Result<bool, Error> {
        Ok(self.positional()?.set_position(degrees))
    }

    /// Position in degrees.
    pub fn get_position(&self) -> Result<f64, Error> {
        Ok(self.positional()?.get_position())
    }

    pub fn move_steps(&self, steps: i64, forward: bool) -> Result<bool, Error> {
        Ok(self.stepped()?.move_steps(steps, forward))
    }

    /// Position in steps.
    pub fn get_step_position(&self) -> Result<i64, Error> {
        Ok(self.stepped()?.get_position())
    }

    pub fn set_speed(&self, rpm: f64) -> Result<bool, Error> {
        match self.speed_capability() {
            Capability::Stepped => Ok(self.stepped()?.set_speed(rpm)),
            _ => Ok(self.speed_directional()?.set_speed(rpm)),
        }
    }

    pub fn set_direction(&self, clockwise: bool) -> Result<bool, Error> {
        Ok(self.speed_directional()?.set_direction(clockwise))
    }

    /// Speed in RPM, always read through the driver's accessor.
    pub fn get_speed(&self) -> Result<f64, Error> {
        match self.speed_capability() {
            Capability::Stepped => Ok(self.stepped()?.get_speed()),
            _ => Ok(self.speed_directional()?.get_speed()),
        }
    }

    // Both Stepped and SpeedDirectional define the speed operations.
    fn speed_capability(&self) -> Capability {
        match self.kind {
            MotorKind::Stepped => Capability::Stepped,
            _ => Capability::SpeedDirectional,
        }
    }

    fn positional(&self) -> Result<&dyn PositionalDriver, Error> {
        self.driver
            .as_positional()
            .ok_or_else(|| self.mismatch(Capability::Positional))
    }

    fn stepped(&self) -> Result<&dyn SteppedDriver, Error> {
        self.driver
            .as_stepped()
            .ok_or_else(|| self.mismatch(Capability::Stepped))
    }

    fn speed_directional(&self) -> Result<&dyn SpeedDirectionalDriver, Error> {
        self.driver
            .as_speed_directional()
            .ok_or_else(|| self.mismatch(Capability::SpeedDirectional))
    }

    fn mismatch(&self, required: Capability) -> Error {
        Error::CapabilityMismatch {
            motor: self.name.clone(),
            required,
        }
    }
}

impl fmt::Debug for Motor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Motor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
