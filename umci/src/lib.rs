//! Universal Motor Control Interface.
//!
//! Motors of different kinds are driven through one [`MotorController`]. The
//! hardware side is supplied by [`MotorDriver`] implementations that are
//! looked up by name through a [`DriverProvider`] when a motor is created.
//!
//! ```
//! use umci::{DriverConfig, DriverTable, DummyPositionalDriver, MotorController, MotorKind};
//!
//! let mut table = DriverTable::new();
//! table.register::<DummyPositionalDriver>("dummy_servo");
//!
//! let mut controller = MotorController::new(table);
//! let servo = controller
//!     .create("servo1", MotorKind::Positional, "dummy_servo", &DriverConfig::new())
//!     .unwrap();
//! assert!(servo.set_position(90.0).unwrap());
//! assert_eq!(servo.get_position().unwrap(), 90.0);
//! controller.shutdown_all();
//! ```

mod controller;
mod drivers;
mod error;
mod motor;
mod registry;
mod traits;

pub use controller::*;
pub use drivers::*;
pub use error::*;
pub use motor::*;
pub use registry::*;
pub use traits::*;
