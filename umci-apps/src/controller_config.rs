use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};
use umci::{DriverConfig, DriverProvider, MotorController, MotorKind};
use umci_example_drivers::{BLDC_DRIVER_NAME, SERVO_DRIVER_NAME, STEPPER_DRIVER_NAME};

use crate::Error;

/// One `[[motors]]` entry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MotorConfig {
    pub name: String,
    pub kind: MotorKind,
    /// Name the driver is registered under.
    pub driver: String,
    /// Passed to the driver's `initialize` as-is.
    #[serde(default)]
    #[serde(skip_serializing_if = "DriverConfig::is_empty")]
    pub config: DriverConfig,
}

impl MotorConfig {
    pub fn new(name: impl Into<String>, kind: MotorKind, driver: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            driver: driver.into(),
            config: DriverConfig::new(),
        }
    }

    /// Adds a driver setting.
    pub fn with(mut self, key: &str, value: serde_json::Value) -> Self {
        self.config.insert(key.to_owned(), value);
        self
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    /// Motors, created in this order.
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub motors: Vec<MotorConfig>,
}

impl ControllerConfig {
    pub fn try_new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_str(
            &std::fs::read_to_string(&path)
                .map_err(|e| Error::NoFile(path.as_ref().to_owned(), e))?,
            &path,
        )
    }

    pub fn from_str<P: AsRef<Path>>(s: &str, path: P) -> Result<Self, Error> {
        let config: ControllerConfig =
            toml::from_str(s).map_err(|e| Error::TomlParseFailure(path.as_ref().to_owned(), e))?;
        debug!("{:?}", config);
        Ok(config)
    }

    /// One servo, one stepper and one BLDC motor backed by the example drivers.
    pub fn demo() -> Self {
        Self {
            motors: vec![
                MotorConfig::new("servo1", MotorKind::Positional, SERVO_DRIVER_NAME)
                    .with("pin", json!(18)),
                MotorConfig::new("stepper1", MotorKind::Stepped, STEPPER_DRIVER_NAME)
                    .with("step_pin", json!(17))
                    .with("dir_pin", json!(27))
                    .with("enable_pin", json!(22))
                    .with("microsteps", json!(16)),
                MotorConfig::new("bldc1", MotorKind::SpeedDirectional, BLDC_DRIVER_NAME)
                    .with("pwm_pin", json!(22))
                    .with("hall_sensor_pins", json!([23, 24, 25]))
                    .with("max_speed", json!(5000)),
            ],
        }
    }

    pub fn motor(&self, name: &str) -> Option<&MotorConfig> {
        self.motors.iter().find(|m| m.name == name)
    }

    /// Creates every configured motor in order.
    ///
    /// If a motor cannot be created, the motors created so far are shut down
    /// and the error is returned.
    pub fn create_controller<P>(&self, provider: P) -> Result<MotorController, Error>
    where
        P: DriverProvider + 'static,
    {
        let mut controller = MotorController::new(provider);
        for motor in &self.motors {
            match controller.create(&motor.name, motor.kind, &motor.driver, &motor.config) {
                Ok(m) => {
                    if !m.is_initialized() {
                        warn!("motor {:?} failed to initialize", motor.name);
                    }
                }
                Err(e) => {
                    controller.shutdown_all();
                    return Err(e.into());
                }
            }
        }
        Ok(controller)
    }
}
