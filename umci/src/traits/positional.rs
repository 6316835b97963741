use auto_impl::auto_impl;

/// Drivers that hold an angular position (servos).
#[auto_impl(Box, Arc)]
pub trait PositionalDriver: Send + Sync {
    /// Moves to `degrees`. The driver may clamp the target to its range.
    fn set_position(&self, degrees: f64) -> bool;

    /// Current position in degrees.
    fn get_position(&self) -> f64;
}
