use std::{sync::Mutex, thread, time::Duration};

use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use umci::{DriverConfig, MotorDriver, SpeedDirectionalDriver, Status};

use crate::config::{parse_config, PinId};

const DEFAULT_MAX_SPEED: f64 = 10000.0;
const COMMAND_LATENCY: Duration = Duration::from_millis(10);

fn default_max_speed() -> f64 {
    DEFAULT_MAX_SPEED
}

#[derive(Debug, Deserialize)]
struct BldcConfig {
    pwm_pin: PinId,
    #[serde(default)]
    hall_sensor_pins: Vec<PinId>,
    #[serde(default = "default_max_speed")]
    max_speed: f64,
    #[serde(default)]
    simulate_latency: bool,
}

#[derive(Debug)]
struct BldcState {
    config: Option<BldcConfig>,
    speed: f64,
    clockwise: bool,
}

impl Default for BldcState {
    fn default() -> Self {
        Self {
            config: None,
            speed: 0.0,
            clockwise: true,
        }
    }
}

impl BldcState {
    fn max_speed(&self) -> f64 {
        self.config
            .as_ref()
            .map_or(DEFAULT_MAX_SPEED, |c| c.max_speed)
    }

    /// PWM duty cycle in percent for the current speed.
    fn duty_cycle(&self) -> f64 {
        self.speed / self.max_speed() * 100.0
    }
}

/// A simulated brushless DC motor driven by a PWM pin.
///
/// Configuration keys:
///
/// - `pwm_pin` (required).
/// - `hall_sensor_pins` (default empty).
/// - `max_speed` (default `10000` RPM): speeds above it are clamped.
/// - `simulate_latency` (default `false`): sleep 10 ms per command.
#[derive(Debug, Default)]
pub struct ExampleBldcDriver {
    state: Mutex<BldcState>,
}

impl ExampleBldcDriver {
    /// Creates an uninitialized, stopped, clockwise BLDC driver.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MotorDriver for ExampleBldcDriver {
    fn initialize(&self, config: &DriverConfig) -> bool {
        info!("Initializing BLDC driver with params: {config:?}");
        let Some(config) = parse_config::<BldcConfig>("bldc", config) else {
            return false;
        };
        if config.max_speed <= 0.0 {
            warn!("max_speed must be positive, got {}", config.max_speed);
            return false;
        }
        info!("Using GPIO pin {} for PWM control", config.pwm_pin);
        if !config.hall_sensor_pins.is_empty() {
            info!("Hall sensor pins: {:?}", config.hall_sensor_pins);
        }
        info!("Maximum speed: {} RPM", config.max_speed);
        self.state.lock().unwrap().config = Some(config);
        true
    }

    fn shutdown(&self) -> bool {
        info!("Shutting down BLDC driver");
        self.state.lock().unwrap().config = None;
        true
    }

    fn status(&self) -> Status {
        let state = self.state.lock().unwrap();
        let config = state.config.as_ref();
        let mut status = Status::new();
        status.insert("speed".into(), json!(state.speed));
        status.insert(
            "direction".into(),
            json!(if state.clockwise {
                "clockwise"
            } else {
                "counterclockwise"
            }),
        );
        status.insert("initialized".into(), json!(config.is_some()));
        status.insert("pwm_pin".into(), json!(config.map(|c| &c.pwm_pin)));
        status.insert(
            "hall_sensor_pins".into(),
            json!(config.map(|c| &c.hall_sensor_pins)),
        );
        status.insert("max_speed".into(), json!(state.max_speed()));
        status.insert("duty_cycle".into(), json!(state.duty_cycle()));
        status
    }

    fn as_speed_directional(&self) -> Option<&dyn SpeedDirectionalDriver> {
        Some(self)
    }
}

impl SpeedDirectionalDriver for ExampleBldcDriver {
    fn set_speed(&self, rpm: f64) -> bool {
        let mut state = self.state.lock().unwrap();
        let Some(config) = &state.config else {
            warn!("BLDC driver not initialized");
            return false;
        };
        if !rpm.is_finite() || rpm < 0.0 {
            warn!("speed must be a finite, non-negative number, got {rpm}");
            return false;
        }
        let pin = config.pwm_pin.clone();
        let simulate_latency = config.simulate_latency;
        state.speed = rpm.min(state.max_speed());
        info!(
            "Setting BLDC speed to {} RPM (PWM duty cycle: {:.1}%) on pin {pin}",
            state.speed,
            state.duty_cycle()
        );
        if simulate_latency {
            thread::sleep(COMMAND_LATENCY);
        }
        true
    }

    fn set_direction(&self, clockwise: bool) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.config.is_none() {
            warn!("BLDC driver not initialized");
            return false;
        }
        state.clockwise = clockwise;
        info!(
            "Setting BLDC direction to {}",
            if clockwise {
                "clockwise"
            } else {
                "counterclockwise"
            }
        );
        true
    }

    fn get_speed(&self) -> f64 {
        self.state.lock().unwrap().speed
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    fn initialized(config: serde_json::Value) -> ExampleBldcDriver {
        let driver = ExampleBldcDriver::new();
        assert!(driver.initialize(config.as_object().unwrap()));
        driver
    }

    #[test]
    fn requires_pwm_pin() {
        let driver = ExampleBldcDriver::new();
        assert!(!driver.initialize(&DriverConfig::new()));
        let config = json!({ "pwm_pin": 22, "max_speed": 0 });
        assert!(!driver.initialize(config.as_object().unwrap()));
    }

    #[test]
    fn clamps_to_max_speed() {
        let driver = initialized(json!({ "pwm_pin": 22, "max_speed": 5000 }));
        assert!(driver.set_speed(99999.0));
        assert_approx_eq!(driver.get_speed(), 5000.0);
        assert_eq!(driver.status()["duty_cycle"], json!(100.0));
    }

    #[test]
    fn default_max_speed_and_duty_cycle() {
        let driver = initialized(json!({ "pwm_pin": 22, "hall_sensor_pins": [5, 6, 13] }));
        assert!(driver.set_speed(2500.0));
        let status = driver.status();
        assert_eq!(status["max_speed"], json!(10000.0));
        assert_eq!(status["duty_cycle"], json!(25.0));
        assert_eq!(status["hall_sensor_pins"], json!([5, 6, 13]));
    }

    #[test]
    fn rejects_negative_speed() {
        let driver = initialized(json!({ "pwm_pin": 22 }));
        assert!(driver.set_speed(100.0));
        assert!(!driver.set_speed(-100.0));
        assert_approx_eq!(driver.get_speed(), 100.0);
    }

    #[test]
    fn rejects_non_finite_speed() {
        let driver = initialized(json!({ "pwm_pin": 22, "max_speed": 5000 }));
        assert!(driver.set_speed(100.0));
        assert!(!driver.set_speed(f64::NAN));
        assert!(!driver.set_speed(f64::INFINITY));
        assert_approx_eq!(driver.get_speed(), 100.0);
    }

    #[test]
    fn direction() {
        let driver = initialized(json!({ "pwm_pin": 22 }));
        assert_eq!(driver.status()["direction"], json!("clockwise"));
        assert!(driver.set_direction(false));
        assert_eq!(driver.status()["direction"], json!("counterclockwise"));
        driver.shutdown();
        assert!(!driver.set_direction(true));
    }
}
