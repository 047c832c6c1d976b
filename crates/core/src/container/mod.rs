#[allow(clippy::module_inception)]
pub mod container;
pub mod builder;
pub mod registry;
pub mod descriptor;
pub mod module;
pub mod debug;

pub use container::Container;
pub use builder::{ContainerBuilder, Exposure};
pub use registry::{Registration, ServiceRegistry};
pub use descriptor::{ServiceId, ServiceInstance};
pub use module::ServiceModule;
pub use debug::{ContainerReport, RegistrationReport};
