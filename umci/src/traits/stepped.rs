use auto_impl::auto_impl;

/// Drivers that move in discrete steps (steppers).
#[auto_impl(Box, Arc)]
pub trait SteppedDriver: Send + Sync {
    /// Moves `steps` steps, forward when `forward` is true.
    ///
    /// Non-positive step counts are rejected with `false`.
    fn move_steps(&self, steps: i64, forward: bool) -> bool;

    fn set_speed(&self, rpm: f64) -> bool;

    /// Current position in steps.
    fn get_position(&self) -> i64;

    /// Current speed in RPM.
    fn get_speed(&self) -> f64;
}
