use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Identity of a service: a concrete type or a trait object type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceId {
    pub type_id: TypeId,
    pub type_name: &'static str,
}

impl ServiceId {
    /// Create a service ID for a type
    pub fn of<T: 'static + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Check if this ServiceId refers to `T`
    pub fn is<T: 'static + ?Sized>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// A type-erased instance exposed under one service
///
/// Concrete types are stored as the erased `Arc<T>` itself so they can be
/// downcast back. Trait objects cannot be downcast from `dyn Any`, so they
/// are stored as a boxed `Arc<dyn Trait>` instead.
#[derive(Clone)]
pub enum ServiceInstance {
    /// A concrete instance, downcastable to `Arc<T>`
    Shared(Arc<dyn Any + Send + Sync>),
    /// A trait object instance holding an `Arc<I>`
    Interface(Arc<dyn Any + Send + Sync>),
}

impl ServiceInstance {
    /// Wrap a trait object (or any `?Sized` handle) for storage
    pub fn interface<I: ?Sized + Send + Sync + 'static>(instance: Arc<I>) -> Self {
        ServiceInstance::Interface(Arc::new(instance))
    }

    /// Recover a concrete instance
    pub fn downcast<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        match self {
            ServiceInstance::Shared(instance) => instance.clone().downcast::<T>().ok(),
            ServiceInstance::Interface(handle) => handle.downcast_ref::<Arc<T>>().cloned(),
        }
    }

    /// Recover a trait object instance
    pub fn downcast_interface<I: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<I>> {
        match self {
            ServiceInstance::Interface(handle) => handle.downcast_ref::<Arc<I>>().cloned(),
            ServiceInstance::Shared(_) => None,
        }
    }
}

impl fmt::Debug for ServiceInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceInstance::Shared(_) => f.debug_tuple("Shared").field(&"<instance>").finish(),
            ServiceInstance::Interface(_) => {
                f.debug_tuple("Interface").field(&"<instance>").finish()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    #[test]
    fn test_service_id_for_trait_objects() {
        let id = ServiceId::of::<dyn Greeter>();
        assert!(id.is::<dyn Greeter>());
        assert!(!id.is::<English>());
        assert!(id.type_name().contains("Greeter"));
    }

    #[test]
    fn test_shared_instance_downcast() {
        let value = Arc::new(42u32);
        let instance = ServiceInstance::Shared(value.clone());

        let back = instance.downcast::<u32>().unwrap();
        assert!(Arc::ptr_eq(&value, &back));
        assert!(instance.downcast::<u64>().is_none());
        assert!(instance.downcast_interface::<dyn Greeter>().is_none());
    }

    #[test]
    fn test_interface_instance_downcast() {
        let english: Arc<dyn Greeter> = Arc::new(English);
        let instance = ServiceInstance::interface(english);

        let greeter = instance.downcast_interface::<dyn Greeter>().unwrap();
        assert_eq!(greeter.greet(), "hello");
    }
}
