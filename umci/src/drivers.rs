mod dummy_positional;
mod dummy_speed_directional;
mod dummy_stepped;

pub use dummy_positional::*;
pub use dummy_speed_directional::*;
pub use dummy_stepped::*;
