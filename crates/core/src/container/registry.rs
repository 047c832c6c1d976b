use crate::container::descriptor::{ServiceId, ServiceInstance};
use std::collections::HashMap;

/// One registration: an instance exposed under one or more services
#[derive(Debug, Clone)]
pub struct Registration {
    /// Position of the registration in the registry, starting at zero
    pub id: usize,
    /// Type name of the registered instance
    pub implementation: &'static str,
    exposed: Vec<(ServiceId, ServiceInstance)>,
}

impl Registration {
    /// Create a registration exposing the given services
    pub fn new(implementation: &'static str, exposed: Vec<(ServiceId, ServiceInstance)>) -> Self {
        Self {
            id: 0,
            implementation,
            exposed,
        }
    }

    /// Services exposed by this registration
    pub fn services(&self) -> impl Iterator<Item = &ServiceId> {
        self.exposed.iter().map(|(service, _)| service)
    }

    /// Check if this registration exposes `service`
    pub fn exposes(&self, service: &ServiceId) -> bool {
        self.services().any(|exposed| exposed == service)
    }

    fn instance_for(&self, service: &ServiceId) -> Option<&ServiceInstance> {
        self.exposed
            .iter()
            .find(|(exposed, _)| exposed == service)
            .map(|(_, instance)| instance)
    }
}

/// Registry of registrations and the services they expose
///
/// A service exposed by several registrations resolves to the most recent one.
#[derive(Debug, Default, Clone)]
pub struct ServiceRegistry {
    registrations: Vec<Registration>,
    services: HashMap<ServiceId, Vec<usize>>,
}

impl ServiceRegistry {
    /// Create a new service registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registration, returning its id
    pub fn add(&mut self, mut registration: Registration) -> usize {
        let id = self.registrations.len();
        registration.id = id;

        for service in registration.services() {
            self.services.entry(*service).or_default().push(id);
        }

        self.registrations.push(registration);
        id
    }

    /// Instance of the most recent registration exposing `service`
    pub fn lookup(&self, service: &ServiceId) -> Option<&ServiceInstance> {
        let id = *self.services.get(service)?.last()?;
        self.registrations[id].instance_for(service)
    }

    /// Instances of every registration exposing `service`, oldest first
    pub fn lookup_all(&self, service: &ServiceId) -> Vec<&ServiceInstance> {
        self.services
            .get(service)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.registrations[*id].instance_for(service))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check if a service is exposed by any registration
    pub fn contains(&self, service: &ServiceId) -> bool {
        self.services.contains_key(service)
    }

    /// Get the number of registrations
    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    /// Get the number of distinct services
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// All registrations in registration order
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }
}
