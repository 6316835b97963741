use std::{collections::HashMap, fmt, sync::Arc};

use auto_impl::auto_impl;
use tracing::debug;

use crate::{
    error::Error,
    traits::{Capability, MotorDriver},
};

/// Builds a fresh, uninitialized driver instance.
pub type DriverFactory = Arc<dyn Fn() -> Box<dyn MotorDriver> + Send + Sync>;

/// Locates drivers by name.
#[auto_impl(&, Box, Arc)]
pub trait DriverProvider: Send + Sync {
    /// Returns the factory registered under `name`, if any.
    fn find_driver(&self, name: &str) -> Option<DriverFactory>;
}

/// A [`DriverProvider`] backed by an explicit name → factory map.
#[derive(Clone, Default)]
pub struct DriverTable {
    factories: HashMap<String, DriverFactory>,
}

impl DriverTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `D` under `name` using its [`Default`] implementation.
    pub fn register<D>(&mut self, name: impl Into<String>) -> &mut Self
    where
        D: MotorDriver + Default + 'static,
    {
        self.register_fn(name, || Box::new(D::default()) as Box<dyn MotorDriver>)
    }

    /// Registers a factory function under `name`, replacing any previous entry.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn MotorDriver> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("register driver {name:?}");
        self.factories.insert(name, Arc::new(factory));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for DriverTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverTable")
            .field("names", &self.names())
            .finish()
    }
}

impl DriverProvider for DriverTable {
    fn find_driver(&self, name: &str) -> Option<DriverFactory> {
        self.factories.get(name).cloned()
    }
}

/// A resolved driver: its name, declared capabilities, and factory.
#[derive(Clone)]
pub struct DriverConstructor {
    name: String,
    capabilities: Vec<Capability>,
    factory: DriverFactory,
}

impl DriverConstructor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn construct(&self) -> Box<dyn MotorDriver> {
        (self.factory)()
    }
}

impl fmt::Debug for DriverConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverConstructor")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

/// Resolves driver names through a [`DriverProvider`] and memoizes the result.
pub struct DriverRegistry {
    provider: Box<dyn DriverProvider>,
    cache: HashMap<String, DriverConstructor>,
}

impl DriverRegistry {
    pub fn new<P>(provider: P) -> Self
    where
        P: DriverProvider + 'static,
    {
        Self {
            provider: Box::new(provider),
            cache: HashMap::new(),
        }
    }

    /// Resolves `driver_name`, consulting the provider only on a cache miss.
    ///
    /// Fails with [`Error::DriverNotFound`] when the provider does not know
    /// the name and [`Error::DriverInvalid`] when the driver declares no
    /// capability. Failed resolutions are not cached.
    pub fn resolve(&mut self, driver_name: &str) -> Result<DriverConstructor, Error> {
        if let Some(constructor) = self.cache.get(driver_name) {
            return Ok(constructor.clone());
        }
        let factory = self
            .provider
            .find_driver(driver_name)
            .ok_or_else(|| Error::DriverNotFound(driver_name.to_owned()))?;
        let capabilities = factory().capabilities();
        if capabilities.is_empty() {
            return Err(Error::DriverInvalid(driver_name.to_owned()));
        }
        debug!("resolved driver {driver_name:?} with {capabilities:?}");
        let constructor = DriverConstructor {
            name: driver_name.to_owned(),
            capabilities,
            factory,
        };
        self.cache
            .insert(driver_name.to_owned(), constructor.clone());
        Ok(constructor)
    }

    pub fn is_cached(&self, driver_name: &str) -> bool {
        self.cache.contains_key(driver_name)
    }

    /// Number of cached resolutions.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cached: Vec<_> = self.cache.keys().collect();
        cached.sort();
        f.debug_struct("DriverRegistry")
            .field("cached", &cached)
            .finish_non_exhaustive()
    }
}
