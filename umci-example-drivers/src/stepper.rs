use std::{sync::Mutex, thread, time::Duration};

use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use umci::{DriverConfig, MotorDriver, Status, SteppedDriver};

use crate::config::{parse_config, PinId};

const STEPS_PER_REVOLUTION: f64 = 200.0;
const IDLE_STEP_DELAY: Duration = Duration::from_millis(10);

fn default_microsteps() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct StepperConfig {
    step_pin: PinId,
    dir_pin: PinId,
    #[serde(default)]
    enable_pin: Option<PinId>,
    #[serde(default = "default_microsteps")]
    microsteps: u32,
    #[serde(default)]
    simulate_latency: bool,
}

#[derive(Debug, Default)]
struct StepperState {
    config: Option<StepperConfig>,
    position: i64,
    speed: f64,
}

/// A simulated step/direction stepper driver (A4988 style).
///
/// Configuration keys:
///
/// - `step_pin`, `dir_pin` (required).
/// - `enable_pin` (optional).
/// - `microsteps` (default `1`).
/// - `simulate_latency` (default `false`): sleep for the time the move would
///   take at the current speed, assuming 200 steps per revolution.
#[derive(Debug, Default)]
pub struct ExampleStepperDriver {
    state: Mutex<StepperState>,
}

impl ExampleStepperDriver {
    /// Creates an uninitialized stepper driver at step 0.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Time a move of `steps` steps takes at `rpm`, or `None` if it does not fit
/// in a [`Duration`].
fn move_duration(steps: i64, rpm: f64) -> Option<Duration> {
    let per_step = if rpm > 0.0 {
        60.0 / (rpm * STEPS_PER_REVOLUTION)
    } else {
        IDLE_STEP_DELAY.as_secs_f64()
    };
    Duration::try_from_secs_f64(per_step * steps as f64).ok()
}

impl MotorDriver for ExampleStepperDriver {
    fn initialize(&self, config: &DriverConfig) -> bool {
        info!("Initializing stepper driver with params: {config:?}");
        let Some(config) = parse_config::<StepperConfig>("stepper", config) else {
            return false;
        };
        info!(
            "Using GPIO pins: step={}, dir={}, enable={:?}",
            config.step_pin, config.dir_pin, config.enable_pin
        );
        info!("Microstepping: {}", config.microsteps);
        self.state.lock().unwrap().config = Some(config);
        true
    }

    fn shutdown(&self) -> bool {
        info!("Shutting down stepper driver");
        self.state.lock().unwrap().config = None;
        true
    }

    fn status(&self) -> Status {
        let state = self.state.lock().unwrap();
        let config = state.config.as_ref();
        let mut status = Status::new();
        status.insert("position".into(), json!(state.position));
        status.insert("speed".into(), json!(state.speed));
        status.insert("initialized".into(), json!(config.is_some()));
        status.insert("step_pin".into(), json!(config.map(|c| &c.step_pin)));
        status.insert("dir_pin".into(), json!(config.map(|c| &c.dir_pin)));
        status.insert(
            "enable_pin".into(),
            json!(config.and_then(|c| c.enable_pin.as_ref())),
        );
        status.insert(
            "microsteps".into(),
            json!(config.map_or(default_microsteps(), |c| c.microsteps)),
        );
        status
    }

    fn as_stepped(&self) -> Option<&dyn SteppedDriver> {
        Some(self)
    }
}

impl SteppedDriver for ExampleStepperDriver {
    fn move_steps(&self, steps: i64, forward: bool) -> bool {
        let mut state = self.state.lock().unwrap();
        let Some(config) = &state.config else {
            warn!("stepper driver not initialized");
            return false;
        };
        if steps <= 0 {
            warn!("steps must be positive, got {steps}");
            return false;
        }
        let target = if forward {
            state.position.checked_add(steps)
        } else {
            state.position.checked_sub(steps)
        };
        let Some(target) = target else {
            warn!(
                "moving {steps} steps from position {} is out of range",
                state.position
            );
            return false;
        };
        info!(
            "Moving stepper {steps} steps {} (step pin {}, direction pin {} {})",
            if forward { "forward" } else { "backward" },
            config.step_pin,
            config.dir_pin,
            if forward { "HIGH" } else { "LOW" },
        );
        let delay = if config.simulate_latency {
            let delay = move_duration(steps, state.speed);
            if delay.is_none() {
                warn!("move time at {} RPM is out of range, not waiting", state.speed);
            }
            delay
        } else {
            None
        };
        state.position = target;
        if let Some(delay) = delay {
            thread::sleep(delay);
        }
        true
    }

    fn set_speed(&self, rpm: f64) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.config.is_none() {
            warn!("stepper driver not initialized");
            return false;
        }
        if !rpm.is_finite() || rpm < 0.0 {
            warn!("speed must be a finite, non-negative number, got {rpm}");
            return false;
        }
        state.speed = rpm;
        info!("Setting stepper speed to {rpm} RPM");
        true
    }

    fn get_position(&self) -> i64 {
        self.state.lock().unwrap().position
    }

    fn get_speed(&self) -> f64 {
        self.state.lock().unwrap().speed
    }
}
