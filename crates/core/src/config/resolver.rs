use crate::config::section::ConfigSection;
use crate::container::descriptor::ServiceId;
use std::marker::PhantomData;
use std::sync::Arc;

/// Supplies the root of a configuration graph
pub trait ConfigurationResolver: Send + Sync {
    /// Resolve the configuration, or `None` when there is none
    fn resolve(&self) -> Option<Arc<dyn ConfigSection>>;

    /// The type of configuration this resolver produces
    fn config_type(&self) -> ServiceId;
}

impl<R: ConfigurationResolver + ?Sized> ConfigurationResolver for Arc<R> {
    fn resolve(&self) -> Option<Arc<dyn ConfigSection>> {
        (**self).resolve()
    }

    fn config_type(&self) -> ServiceId {
        (**self).config_type()
    }
}

/// Resolver returning a configuration value held in memory
#[derive(Debug)]
pub struct InMemoryResolver<T> {
    value: Arc<T>,
}

impl<T: ConfigSection> InMemoryResolver<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(value),
        }
    }

    /// Share an existing instance; resolution hands out this same `Arc`
    pub fn from_arc(value: Arc<T>) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Arc<T> {
        &self.value
    }
}

impl<T: ConfigSection + Default> Default for InMemoryResolver<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: ConfigSection> ConfigurationResolver for InMemoryResolver<T> {
    fn resolve(&self) -> Option<Arc<dyn ConfigSection>> {
        Some(self.value.clone())
    }

    fn config_type(&self) -> ServiceId {
        ServiceId::of::<T>()
    }
}

/// Resolver building the configuration on every call
pub struct FactoryResolver<T, F> {
    factory: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> FactoryResolver<T, F>
where
    T: ConfigSection,
    F: Fn() -> Option<T> + Send + Sync,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            _marker: PhantomData,
        }
    }
}

impl<T, F> ConfigurationResolver for FactoryResolver<T, F>
where
    T: ConfigSection,
    F: Fn() -> Option<T> + Send + Sync,
{
    fn resolve(&self) -> Option<Arc<dyn ConfigSection>> {
        (self.factory)().map(|value| Arc::new(value) as Arc<dyn ConfigSection>)
    }

    fn config_type(&self) -> ServiceId {
        ServiceId::of::<T>()
    }
}

impl<T, F> std::fmt::Debug for FactoryResolver<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoryResolver")
            .field("config_type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Resolver that never finds a configuration
pub struct NullResolver<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> NullResolver<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for NullResolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ConfigSection> ConfigurationResolver for NullResolver<T> {
    fn resolve(&self) -> Option<Arc<dyn ConfigSection>> {
        None
    }

    fn config_type(&self) -> ServiceId {
        ServiceId::of::<T>()
    }
}

impl<T> std::fmt::Debug for NullResolver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NullResolver")
            .field("config_type", &std::any::type_name::<T>())
            .finish()
    }
}
