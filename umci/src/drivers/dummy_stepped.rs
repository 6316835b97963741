use std::sync::Mutex;

use serde_json::json;

use crate::traits::{DriverConfig, MotorDriver, Status, SteppedDriver};

/// In-memory stepped driver. Only the non-positive step rule is enforced.
#[derive(Debug)]
pub struct DummySteppedDriver {
    pub initialized: Mutex<bool>,
    pub current_position: Mutex<i64>,
    pub current_speed: Mutex<f64>,
}

impl DummySteppedDriver {
    pub fn new() -> Self {
        Self {
            initialized: Mutex::new(false),
            current_position: Mutex::new(0),
            current_speed: Mutex::new(0f64),
        }
    }
}

impl Default for DummySteppedDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorDriver for DummySteppedDriver {
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
        status.insert("speed".into(), json!(*self.current_speed.lock().unwrap()));
        status.insert(
            "initialized".into(),
            json!(*self.initialized.lock().unwrap()),
        );
        status
    }

    fn as_stepped(&self) -> Option<&dyn SteppedDriver> {
        Some(self)
    }
}

impl SteppedDriver for DummySteppedDriver {
    fn move_steps(&self, steps: i64, forward: bool) -> bool {
        if steps <= 0 {
            return false;
        }
        let mut position = self.current_position.lock().unwrap();
        if forward {
            *position += steps;
        } else {
            *position -= steps;
        }
        true
    }

    fn set_speed(&self, rpm: f64) -> bool {
        *self.current_speed.lock().unwrap() = rpm;
        true
    }

    fn get_position(&self) -> i64 {
        *self.current_position.lock().unwrap()
    }

    fn get_speed(&self) -> f64 {
        *self.current_speed.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_steps() {
        let driver = DummySteppedDriver::new();
        assert!(driver.move_steps(200, true));
        assert!(driver.move_steps(50, false));
        assert_eq!(driver.get_position(), 150);
        assert!(!driver.move_steps(0, true));
        assert!(!driver.move_steps(-3, true));
        assert_eq!(driver.get_position(), 150);
    }
}
