use std::sync::Mutex;

use serde_json::json;

use crate::traits::{DriverConfig, MotorDriver, SpeedDirectionalDriver, Status};

#[derive(Debug)]
pub struct DummySpeedDirectionalDriver {
    pub initialized: Mutex<bool>,
    pub current_speed: Mutex<f64>,
    pub clockwise: Mutex<bool>,
}

impl DummySpeedDirectionalDriver {
    pub fn new() -> Self {
        Self {
            initialized: Mutex::new(false),
            current_speed: Mutex::new(0f64),
            clockwise: Mutex::new(true),
        }
    }
}

impl Default for DummySpeedDirectionalDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorDriver for DummySpeedDirectionalDriver {
    fn initialize(&self, _config: &DriverConfig) -> bool {
        *self.initialized.lock().unwrap() = true;
        true
    }

    fn shutdown(&self) -> bool {
        *self.initialized.lock().unwrap() = false;
        true
    }

    fn status(&self) -> Status {
        let mut status = Status::new();
        status.insert("speed".into(), json!(*self.current_speed.lock().unwrap()));
        status.insert("clockwise".into(), json!(*self.clockwise.lock().unwrap()));
        status.insert(
            "initialized".into(),
            json!(*self.initialized.lock().unwrap()),
        );
        status
    }

    fn as_speed_directional(&self) -> Option<&dyn SpeedDirectionalDriver> {
        Some(self)
    }
}

impl SpeedDirectionalDriver for DummySpeedDirectionalDriver {
    fn set_speed(&self, rpm: f64) -> bool {
        *self.current_speed.lock().unwrap() = rpm;
        true
    }

    fn set_direction(&self, clockwise: bool) -> bool {
        *self.clockwise.lock().unwrap() = clockwise;
        true
    }

    fn get_speed(&self) -> f64 {
        *self.current_speed.lock().unwrap()
    }
}
