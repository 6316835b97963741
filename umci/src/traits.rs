mod motor_driver;
mod positional;
mod speed_directional;
mod stepped;

pub use motor_driver::*;
pub use positional::*;
pub use speed_directional::*;
pub use stepped::*;
