//! Simulated motor drivers for [`umci`].
//!
//! These drivers do not touch hardware. They keep the state a real driver
//! would track, validate their configuration, and log the signals they would
//! emit. Use [`example_driver_table`] to make them available to a
//! [`MotorController`](umci::MotorController):
//!
//! ```
//! use serde_json::json;
//! use umci::{MotorController, MotorKind};
//! use umci_example_drivers::{example_driver_table, SERVO_DRIVER_NAME};
//!
//! let mut controller = MotorController::new(example_driver_table());
//! let config = json!({ "pin": 18 }).as_object().unwrap().clone();
//! let servo = controller
//!     .create("servo1", MotorKind::Positional, SERVO_DRIVER_NAME, &config)
//!     .unwrap();
//! assert!(servo.set_position(200.0).unwrap());
//! assert_eq!(servo.get_position().unwrap(), 180.0);
//! ```

#![warn(missing_docs, rust_2018_idioms)]

mod bldc;
mod config;
mod servo;
mod stepper;

pub use bldc::*;
pub use config::PinId;
pub use servo::*;
pub use stepper::*;
use umci::DriverTable;

/// Registry name of [`ExampleServoDriver`].
pub const SERVO_DRIVER_NAME: &str = "example_servo_driver";
/// Registry name of [`ExampleStepperDriver`].
pub const STEPPER_DRIVER_NAME: &str = "example_stepper_driver";
/// Registry name of [`ExampleBldcDriver`].
pub const BLDC_DRIVER_NAME: &str = "example_bldc_driver";

/// Registers every example driver under its registry name.
pub fn register_example_drivers(table: &mut DriverTable) -> &mut DriverTable {
    table
        .register::<ExampleServoDriver>(SERVO_DRIVER_NAME)
        .register::<ExampleStepperDriver>(STEPPER_DRIVER_NAME)
        .register::<ExampleBldcDriver>(BLDC_DRIVER_NAME)
}

/// A [`DriverTable`] containing only the example drivers.
pub fn example_driver_table() -> DriverTable {
    let mut table = DriverTable::new();
    register_example_drivers(&mut table);
    table
}
