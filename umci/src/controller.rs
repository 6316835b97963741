use indexmap::{map::Entry, IndexMap};
use tracing::{info, warn};

use crate::{
    error::Error,
    motor::{Motor, MotorKind},
    registry::{DriverProvider, DriverRegistry},
    traits::{DriverConfig, Status},
};

/// Owns a set of named motors and the registry used to build their drivers.
///
/// The controller is synchronous and does no locking of its own. When it is
/// shared between threads, callers must serialize access to it.
#[derive(Debug)]
pub struct MotorController {
    motors: IndexMap<String, Motor>,
    registry: DriverRegistry,
}

impl MotorController {
    pub fn new<P>(provider: P) -> Self
    where
        P: DriverProvider + 'static,
    {
        Self::with_registry(DriverRegistry::new(provider))
    }

    pub fn with_registry(registry: DriverRegistry) -> Self {
        Self {
            motors: IndexMap::new(),
            registry,
        }
    }

    /// Creates, initializes and stores a motor.
    ///
    /// Nothing is registered when the name is taken, the driver cannot be
    /// resolved, or the driver lacks the capability `kind` requires. A motor
    /// whose driver fails to initialize is still stored; check
    /// [`Motor::is_initialized`].
    pub fn create(
        &mut self,
        name: impl Into<String>,
        kind: MotorKind,
        driver_name: &str,
        config: &DriverConfig,
    ) -> Result<&mut Motor, Error> {
        let name = name.into();
        let entry = match self.motors.entry(name) {
            Entry::Occupied(entry) => return Err(Error::DuplicateName(entry.key().clone())),
            Entry::Vacant(entry) => entry,
        };
        let constructor = self.registry.resolve(driver_name)?;
        let required = kind.required_capability();
        if !constructor.supports(required) {
            return Err(Error::CapabilityMismatch {
                motor: entry.into_key(),
                required,
            });
        }
        let mut motor = Motor::new(entry.key().clone(), kind, constructor.construct())?;
        if motor.initialize(config) {
            info!("created {kind} motor {:?} with driver {driver_name:?}", motor.name());
        } else {
            info!(
                "created {kind} motor {:?} with driver {driver_name:?} (not initialized)",
                motor.name()
            );
        }
        Ok(entry.insert(motor))
    }

    pub fn get(&self, name: &str) -> Option<&Motor> {
        self.motors.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Motor> {
        self.motors.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.motors.contains_key(name)
    }

    /// Shuts down and removes a motor. Returns `false` if there is no such motor.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.motors.shift_remove(name) {
            Some(mut motor) => {
                if !motor.shutdown() {
                    warn!("removed motor {name:?} whose driver refused to shut down");
                }
                info!("removed motor {name:?}");
                true
            }
            None => false,
        }
    }

    /// Status of every motor in creation order.
    pub fn list(&self) -> Vec<Status> {
        self.motors.values().map(Motor::status).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.motors.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.motors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motors.is_empty()
    }

    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Shuts down every motor, then forgets all motors and cached drivers.
    pub fn shutdown_all(&mut self) {
        for motor in self.motors.values_mut() {
            motor.shutdown();
        }
        info!("shut down {} motor(s)", self.motors.len());
        self.motors.clear();
        self.registry.clear();
    }
}
