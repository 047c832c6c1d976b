use crate::config::section::{ConfigSection, InterfaceBinder};
use crate::container::container::Container;
use crate::container::descriptor::{ServiceId, ServiceInstance};
use crate::container::module::ServiceModule;
use crate::container::registry::{Registration, ServiceRegistry};
use crate::errors::CoreError;
use std::sync::Arc;

/// How a configuration section is exposed by a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposure {
    /// Expose the section under its concrete type
    SelfType,
    /// Expose the section under every trait it declares
    ImplementedInterfaces,
}

/// Builder for constructing containers with services
#[derive(Default)]
pub struct ContainerBuilder {
    registry: ServiceRegistry,
    modules: Vec<Box<dyn ServiceModule>>,
}

impl ContainerBuilder {
    /// Create a new container builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instance under its concrete type
    pub fn register_instance<T>(&mut self, instance: Arc<T>) -> &mut Self
    where
        T: Send + Sync + 'static,
    {
        let service = ServiceId::of::<T>();
        tracing::debug!("Registering instance of {}", service);

        self.registry.add(Registration::new(
            service.type_name(),
            vec![(service, ServiceInstance::Shared(instance))],
        ));
        self
    }

    /// Register an instance under a trait object type
    pub fn register_interface<I>(&mut self, instance: Arc<I>) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let service = ServiceId::of::<I>();
        tracing::debug!("Registering instance as {}", service);

        self.registry.add(Registration::new(
            service.type_name(),
            vec![(service, ServiceInstance::interface(instance))],
        ));
        self
    }

    /// Register a configuration section instance
    ///
    /// Returns the registration id, or `None` when `exposure` is
    /// [`Exposure::ImplementedInterfaces`] and the section declares no traits.
    pub fn register_section(
        &mut self,
        section: &Arc<dyn ConfigSection>,
        exposure: Exposure,
    ) -> Option<usize> {
        let implementation = section.service_id();

        let exposed = match exposure {
            Exposure::SelfType => vec![(
                implementation,
                ServiceInstance::Shared(section.clone().into_any()),
            )],
            Exposure::ImplementedInterfaces => {
                let mut binder = InterfaceBinder::new();
                section.clone().bind_interfaces(&mut binder);
                if binder.is_empty() {
                    return None;
                }
                binder.into_bindings()
            }
        };

        tracing::debug!(
            "Registering section {} as {:?} ({} services)",
            implementation,
            exposure,
            exposed.len()
        );

        Some(
            self.registry
                .add(Registration::new(implementation.type_name(), exposed)),
        )
    }

    /// Register a module to run when the container is built
    pub fn register_module<M: ServiceModule>(&mut self, module: M) -> &mut Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Number of registrations made so far
    pub fn registration_count(&self) -> usize {
        self.registry.registration_count()
    }

    /// Check if a service has been registered so far
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.registry.contains(&ServiceId::of::<T>())
    }

    /// Run pending modules and build the container
    pub fn build(mut self) -> Result<Container, CoreError> {
        // Modules may register further modules while loading.
        while !self.modules.is_empty() {
            let modules = std::mem::take(&mut self.modules);
            for module in modules {
                tracing::info!("Loading module: {}", module.name());
                module
                    .load(&mut self)
                    .map_err(|err| CoreError::module(module.name(), err))?;
            }
        }

        tracing::info!(
            "Built container with {} registrations",
            self.registry.registration_count()
        );

        Ok(Container::new(self.registry))
    }
}

impl std::fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("registrations", &self.registry.registration_count())
            .field("pending_modules", &self.modules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    trait Named: Send + Sync {
        fn name(&self) -> &str;
    }

    #[derive(Debug)]
    struct Service {
        name: String,
    }

    impl Named for Service {
        fn name(&self) -> &str {
            &self.name
        }
    }

    struct CountingModule {
        loads: Arc<AtomicUsize>,
    }

    impl ServiceModule for CountingModule {
        fn load(&self, builder: &mut ContainerBuilder) -> Result<(), CoreError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            builder.register_instance(Arc::new(Service {
                name: "from module".to_string(),
            }));
            Ok(())
        }
    }

    struct FailingModule;

    impl ServiceModule for FailingModule {
        fn name(&self) -> &str {
            "failing"
        }

        fn load(&self, _builder: &mut ContainerBuilder) -> Result<(), CoreError> {
            Err(CoreError::invalid_argument("connection"))
        }
    }

    #[test]
    fn test_container_builder() -> Result<(), CoreError> {
        let service = Arc::new(Service {
            name: "test".to_string(),
        });

        let mut builder = ContainerBuilder::new();
        builder
            .register_instance(service.clone())
            .register_interface::<dyn Named>(service.clone());

        assert_eq!(builder.registration_count(), 2);
        assert!(builder.is_registered::<Service>());
        assert!(builder.is_registered::<dyn Named>());

        let container = builder.build()?;
        assert_eq!(container.resolve_interface::<dyn Named>()?.name(), "test");
        assert!(Arc::ptr_eq(&container.resolve::<Service>()?, &service));

        Ok(())
    }

    #[test]
    fn test_modules_run_once_during_build() -> Result<(), CoreError> {
        let loads = Arc::new(AtomicUsize::new(0));

        let mut builder = ContainerBuilder::new();
        builder.register_module(CountingModule {
            loads: loads.clone(),
        });
        assert_eq!(loads.load(Ordering::SeqCst), 0);
        assert_eq!(builder.registration_count(), 0);

        let container = builder.build()?;
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(container.resolve::<Service>()?.name, "from module");

        Ok(())
    }

    #[test]
    fn test_module_failure_aborts_build() {
        let mut builder = ContainerBuilder::new();
        builder.register_module(FailingModule);

        match builder.build().unwrap_err() {
            CoreError::Module { module, source } => {
                assert_eq!(module, "failing");
                let cause = source.downcast_ref::<CoreError>().unwrap();
                assert!(cause.is_invalid_argument());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
