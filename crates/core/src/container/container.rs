use crate::container::debug::ContainerReport;
use crate::container::descriptor::ServiceId;
use crate::container::registry::{Registration, ServiceRegistry};
use crate::errors::CoreError;
use std::sync::Arc;

/// Immutable dependency injection container produced by
/// [`ContainerBuilder::build`](crate::container::ContainerBuilder::build)
#[derive(Clone)]
pub struct Container {
    registry: ServiceRegistry,
}

impl Container {
    pub(crate) fn new(registry: ServiceRegistry) -> Self {
        Self { registry }
    }

    /// Resolve a service by its concrete type
    pub fn resolve<T>(&self) -> Result<Arc<T>, CoreError>
    where
        T: Send + Sync + 'static,
    {
        self.try_resolve::<T>()
            .ok_or_else(|| CoreError::service_not_found(std::any::type_name::<T>()))
    }

    /// Try to resolve a service by its concrete type, returning None if not found
    pub fn try_resolve<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.registry.lookup(&ServiceId::of::<T>())?.downcast::<T>()
    }

    /// Resolve a service by a trait object type such as `dyn Storage`
    pub fn resolve_interface<I>(&self) -> Result<Arc<I>, CoreError>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.try_resolve_interface::<I>()
            .ok_or_else(|| CoreError::service_not_found(std::any::type_name::<I>()))
    }

    /// Try to resolve a service by a trait object type
    pub fn try_resolve_interface<I>(&self) -> Option<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.registry
            .lookup(&ServiceId::of::<I>())?
            .downcast_interface::<I>()
    }

    /// Resolve every registration of a trait object type, oldest first
    pub fn resolve_all_interfaces<I>(&self) -> Vec<Arc<I>>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.registry
            .lookup_all(&ServiceId::of::<I>())
            .into_iter()
            .filter_map(|instance| instance.downcast_interface::<I>())
            .collect()
    }

    /// Check if a concrete type or trait object type is registered
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.registry.contains(&ServiceId::of::<T>())
    }

    /// Get the number of registrations
    pub fn registration_count(&self) -> usize {
        self.registry.registration_count()
    }

    /// Get the number of distinct services
    pub fn service_count(&self) -> usize {
        self.registry.service_count()
    }

    /// All registrations in registration order
    pub fn registrations(&self) -> &[Registration] {
        self.registry.registrations()
    }

    /// Snapshot of the registrations for diagnostics
    pub fn report(&self) -> ContainerReport {
        ContainerReport::from_registry(&self.registry)
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registration_count", &self.registration_count())
            .field("service_count", &self.service_count())
            .finish()
    }
}
