use std::sync::Mutex;

use serde_json::json;

use crate::traits::{DriverConfig, MotorDriver, PositionalDriver, Status};

/// In-memory positional driver that accepts every target as-is.
#[derive(Debug)]
pub struct DummyPositionalDriver {
    pub initialized: Mutex<bool>,
    pub current_position: Mutex<f64>,
}

impl DummyPositionalDriver {
    pub fn new() -> Self {
        Self {
            initialized: Mutex::new(false),
            current_position: Mutex::new(0f64),
        }
    }
}

impl Default for DummyPositionalDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorDriver for DummyPositionalDriver {
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
        status.insert(
            "position".into(),
            json!(*self.current_position.lock().unwrap()),
        );
        status.insert(
            "initialized".into(),
            json!(*self.initialized.lock().unwrap()),
        );
        status
    }

    fn as_positional(&self) -> Option<&dyn PositionalDriver> {
        Some(self)
    }
}

impl PositionalDriver for DummyPositionalDriver {
    fn set_position(&self, degrees: f64) -> bool {
        *self.current_position.lock().unwrap() = degrees;
        true
    }

    fn get_position(&self) -> f64 {
        *self.current_position.lock().unwrap()
    }
}
