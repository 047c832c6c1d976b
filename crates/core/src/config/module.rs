//! Registration of configuration graphs
//!
//! [`ConfigurationModule`] walks the graph produced by a
//! [`ConfigurationResolver`] depth first and registers every section it finds
//! under its concrete type and the traits it declares. Nested sections are
//! registered before the sections that hold them, and the root is registered
//! last, so these instances take precedence over any earlier registration of
//! the same services.

use crate::config::options::{EnvConfig, RegistrarOptions};
use crate::config::resolver::ConfigurationResolver;
use crate::config::section::{section_identity, ConfigSection, SectionKind};
use crate::container::builder::{ContainerBuilder, Exposure};
use crate::container::module::ServiceModule;
use crate::errors::CoreError;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Counters describing one registration pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationSummary {
    /// Sections registered, root included
    pub sections: usize,
    /// Registrations added to the builder
    pub registrations: usize,
    /// Properties skipped because they held no value
    pub skipped_null: usize,
    /// Properties skipped because they held a scalar
    pub skipped_scalar: usize,
    /// Sections reached again through another path
    pub revisits: usize,
}

/// Module registering a configuration graph in the container
pub struct ConfigurationModule {
    resolver: Arc<dyn ConfigurationResolver>,
    options: RegistrarOptions,
}

impl ConfigurationModule {
    /// Create a module for the given resolver
    pub fn new<R: ConfigurationResolver + 'static>(resolver: R) -> Self {
        Self {
            resolver: Arc::new(resolver),
            options: RegistrarOptions::default(),
        }
    }

    /// Create a module from a resolver that may be missing
    pub fn from_resolver(
        resolver: Option<Arc<dyn ConfigurationResolver>>,
    ) -> Result<Self, CoreError> {
        let resolver = resolver.ok_or_else(|| CoreError::invalid_argument("resolver"))?;

        Ok(Self {
            resolver,
            options: RegistrarOptions::default(),
        })
    }

    /// Create a module for a default-constructed resolver
    pub fn of<R: ConfigurationResolver + Default + 'static>() -> Self {
        Self::new(R::default())
    }

    pub fn with_options(mut self, options: RegistrarOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RegistrarOptions {
        &self.options
    }

    pub fn resolver(&self) -> &Arc<dyn ConfigurationResolver> {
        &self.resolver
    }

    /// Resolve the configuration and register its sections in `builder`
    ///
    /// The graph is walked completely before anything is registered, so on
    /// error `builder` is left untouched.
    pub fn register(
        &self,
        builder: &mut ContainerBuilder,
    ) -> Result<RegistrationSummary, CoreError> {
        self.options.validate()?;

        let config_type = self.resolver.config_type();

        let Some(root) = self.resolver.resolve() else {
            tracing::debug!("No configuration resolved for {}", config_type);
            return Ok(RegistrationSummary::default());
        };

        if root.kind() == SectionKind::Scalar {
            tracing::debug!(
                "Configuration {} is a scalar, nothing to register",
                root.service_id()
            );
            return Ok(RegistrationSummary::default());
        }

        let mut walk = SectionWalk {
            options: &self.options,
            visited: HashSet::new(),
            path: vec![root.service_id().type_name()],
            ordered: Vec::new(),
            summary: RegistrationSummary::default(),
        };

        walk.visited.insert(section_identity(&root));
        walk.collect_properties(&root, 1)?;
        walk.ordered.push(root);

        Ok(walk.commit(builder))
    }
}

impl ServiceModule for ConfigurationModule {
    fn name(&self) -> &str {
        "ConfigurationModule"
    }

    fn load(&self, builder: &mut ContainerBuilder) -> Result<(), CoreError> {
        let summary = self.register(builder)?;

        tracing::info!(
            "Registered {} configuration sections ({} registrations) for {}",
            summary.sections,
            summary.registrations,
            self.resolver.config_type()
        );

        Ok(())
    }
}

impl std::fmt::Debug for ConfigurationModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationModule")
            .field("config_type", &self.resolver.config_type())
            .field("options", &self.options)
            .finish()
    }
}

/// State of one depth-first pass over a configuration graph
struct SectionWalk<'a> {
    options: &'a RegistrarOptions,
    visited: HashSet<usize>,
    path: Vec<&'static str>,
    /// Sections in registration order
    ordered: Vec<Arc<dyn ConfigSection>>,
    summary: RegistrationSummary,
}

impl SectionWalk<'_> {
    /// Queue every nested section of `section`, children before grandchildren
    fn collect_properties(
        &mut self,
        section: &Arc<dyn ConfigSection>,
        depth: usize,
    ) -> Result<(), CoreError> {
        for property in section.properties() {
            let Some(value) = property.value else {
                tracing::debug!(
                    "Skipping unset property {}.{}",
                    self.path.join("."),
                    property.name
                );
                self.summary.skipped_null += 1;
                continue;
            };

            if value.kind() == SectionKind::Scalar {
                self.summary.skipped_scalar += 1;
                continue;
            }

            if self.options.detect_cycles && !self.visited.insert(section_identity(&value)) {
                tracing::trace!(
                    "Section {}.{} already registered",
                    self.path.join("."),
                    property.name
                );
                self.summary.revisits += 1;
                continue;
            }

            self.path.push(property.name);

            if depth > self.options.max_depth {
                return Err(CoreError::DepthExceeded {
                    max_depth: self.options.max_depth,
                    path: self.path.join("."),
                });
            }

            self.ordered.push(value.clone());
            self.collect_properties(&value, depth + 1)?;
            self.path.pop();
        }

        Ok(())
    }

    /// Register the queued sections, each by its traits and then by itself
    fn commit(mut self, builder: &mut ContainerBuilder) -> RegistrationSummary {
        for section in &self.ordered {
            if builder
                .register_section(section, Exposure::ImplementedInterfaces)
                .is_some()
            {
                self.summary.registrations += 1;
            }

            builder.register_section(section, Exposure::SelfType);
            self.summary.registrations += 1;
            self.summary.sections += 1;
        }

        self.summary
    }
}
