use auto_impl::auto_impl;

/// Drivers controlled by speed and rotation direction (BLDC motors).
#[auto_impl(Box, Arc)]
pub trait SpeedDirectionalDriver: Send + Sync {
    fn set_speed(&self, rpm: f64) -> bool;

    fn set_direction(&self, clockwise: bool) -> bool;

    /// Current speed in RPM.
    fn get_speed(&self) -> f64;
}
