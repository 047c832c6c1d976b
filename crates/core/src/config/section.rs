//! The configuration section capability
//!
//! A configuration graph is a tree of [`ConfigSection`] values. Each section
//! describes its own nested sections through [`ConfigSection::properties`] and
//! the traits it can be resolved as through [`ConfigSection::bind_interfaces`],
//! so registration never needs runtime reflection. Most sections derive both
//! with `#[derive(ConfigSection)]`.

use crate::container::descriptor::{ServiceId, ServiceInstance};
use std::any::Any;
use std::sync::Arc;

/// Whether a section can hold nested sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// A value type or text; never registered
    Scalar,
    /// A section with properties of its own
    Composite,
}

/// A reference-typed property of a section
#[derive(Clone)]
pub struct SectionProperty {
    pub name: &'static str,
    pub value: Option<Arc<dyn ConfigSection>>,
}

impl SectionProperty {
    /// Create a property from an already erased value
    pub fn new(name: &'static str, value: Option<Arc<dyn ConfigSection>>) -> Self {
        Self { name, value }
    }

    /// Property holding a section that is always set
    pub fn of<T: ConfigSection>(name: &'static str, value: &Arc<T>) -> Self {
        Self::new(name, Some(value.clone() as Arc<dyn ConfigSection>))
    }

    /// Property holding a section that may be unset
    pub fn optional<T: ConfigSection>(name: &'static str, value: &Option<Arc<T>>) -> Self {
        Self::new(
            name,
            value
                .as_ref()
                .map(|value| value.clone() as Arc<dyn ConfigSection>),
        )
    }
}

impl std::fmt::Debug for SectionProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionProperty")
            .field("name", &self.name)
            .field(
                "value",
                &self.value.as_ref().map(|value| value.service_id().type_name()),
            )
            .finish()
    }
}

/// Collects the trait object views of a section
#[derive(Debug, Default)]
pub struct InterfaceBinder {
    bindings: Vec<(ServiceId, ServiceInstance)>,
}

impl InterfaceBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose `instance` under the trait object type `I`
    ///
    /// ```ignore
    /// binder.bind::<dyn Storage>(self.clone());
    /// ```
    pub fn bind<I>(&mut self, instance: Arc<I>) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.bindings
            .push((ServiceId::of::<I>(), ServiceInstance::interface(instance)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Services bound so far
    pub fn services(&self) -> impl Iterator<Item = &ServiceId> {
        self.bindings.iter().map(|(service, _)| service)
    }

    pub fn into_bindings(self) -> Vec<(ServiceId, ServiceInstance)> {
        self.bindings
    }
}

/// A node of a configuration graph that can be registered in a container
///
/// Implementations must return `self` from [`ConfigSection::into_any`]; the
/// derive macro writes it for you.
pub trait ConfigSection: Any + Send + Sync {
    /// Scalar sections are skipped by registration
    fn kind(&self) -> SectionKind {
        SectionKind::Composite
    }

    /// Nested sections, in declaration order
    fn properties(&self) -> Vec<SectionProperty> {
        Vec::new()
    }

    /// Traits this section should be resolvable as
    fn bind_interfaces(self: Arc<Self>, binder: &mut InterfaceBinder) {
        let _ = binder;
    }

    /// Erase the section so it can be downcast to its concrete type
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// Concrete type of the section
    fn service_id(&self) -> ServiceId {
        ServiceId::of::<Self>()
    }
}

macro_rules! scalar_sections {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ConfigSection for $ty {
                fn kind(&self) -> SectionKind {
                    SectionKind::Scalar
                }

                fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
                    self
                }
            }
        )*
    };
}

scalar_sections!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str,
);

/// Identity of a section instance, used to detect revisits
pub(crate) fn section_identity(section: &Arc<dyn ConfigSection>) -> usize {
    Arc::as_ptr(section) as *const () as usize
}
