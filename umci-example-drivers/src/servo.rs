use std::{sync::Mutex, thread, time::Duration};

use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use umci::{DriverConfig, MotorDriver, PositionalDriver, Status};

use crate::config::{parse_config, PinId};

const MIN_DEGREES: f64 = 0.0;
const MAX_DEGREES: f64 = 180.0;
const MOVE_LATENCY: Duration = Duration::from_millis(100);

#[derive(Debug, Deserialize)]
struct ServoConfig {
    pin: PinId,
    #[serde(default)]
    simulate_latency: bool,
}

#[derive(Debug, Default)]
struct ServoState {
    config: Option<ServoConfig>,
    position: f64,
}

/// A simulated hobby servo with a 0 to 180 degree range.
///
/// Configuration keys:
///
/// - `pin` (required): control pin.
/// - `simulate_latency` (default `false`): sleep 100 ms per move.
#[derive(Debug, Default)]
pub struct ExampleServoDriver {
    state: Mutex<ServoState>,
}

impl ExampleServoDriver {
    /// Creates an uninitialized servo driver at 0 degrees.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MotorDriver for ExampleServoDriver {
    fn initialize(&self, config: &DriverConfig) -> bool {
        info!("Initializing servo driver with params: {config:?}");
        let Some(config) = parse_config::<ServoConfig>("servo", config) else {
            return false;
        };
        info!("Using GPIO pin {} for servo control", config.pin);
        self.state.lock().unwrap().config = Some(config);
        true
    }

    fn shutdown(&self) -> bool {
        info!("Shutting down servo driver");
        self.state.lock().unwrap().config = None;
        true
    }

    fn status(&self) -> Status {
        let state = self.state.lock().unwrap();
        let mut status = Status::new();
        status.insert("position".into(), json!(state.position));
        status.insert("initialized".into(), json!(state.config.is_some()));
        status.insert(
            "pin".into(),
            json!(state.config.as_ref().map(|c| c.pin.clone())),
        );
        status
    }

    fn as_positional(&self) -> Option<&dyn PositionalDriver> {
        Some(self)
    }
}

impl PositionalDriver for ExampleServoDriver {
    fn set_position(&self, degrees: f64) -> bool {
        let mut state = self.state.lock().unwrap();
        let Some(config) = &state.config else {
            warn!("servo driver not initialized");
            return false;
        };
        let pin = config.pin.clone();
        let simulate_latency = config.simulate_latency;
        state.position = degrees.clamp(MIN_DEGREES, MAX_DEGREES);
        info!("Setting servo on pin {pin} to {} degrees", state.position);
        if simulate_latency {
            thread::sleep(MOVE_LATENCY);
        }
        true
    }

    fn get_position(&self) -> f64 {
        self.state.lock().unwrap().position
    }
}
