use crate::container::builder::ContainerBuilder;
use crate::errors::CoreError;

/// A unit of registrations applied to a [`ContainerBuilder`] while it builds
///
/// Modules run in the order they were registered, after every registration
/// made directly on the builder.
pub trait ServiceModule: Send + Sync + 'static {
    /// Get module name (defaults to type name)
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Register this module's services
    fn load(&self, builder: &mut ContainerBuilder) -> Result<(), CoreError>;
}

