mod controller_config;
mod error;
mod motor_command;
pub mod utils;

pub use controller_config::*;
pub use error::*;
pub use motor_command::*;
