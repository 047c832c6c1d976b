//! Field dispatch used by `#[derive(ConfigSection)]`
//!
//! The derive cannot tell from syntax alone whether `Arc<T>` holds a section,
//! so the generated code calls `section_property` on `&FieldRef(&self.field)`.
//! Method resolution picks [`SectionField`] when `T: ConfigSection` and falls
//! back to [`ValueField`] otherwise, so shared values such as
//! `Arc<Vec<String>>` or `Arc<dyn Trait>` are ignored instead of rejected.

use crate::config::section::{ConfigSection, SectionProperty};
use std::sync::Arc;

/// Borrowed field of a struct deriving `ConfigSection`
pub struct FieldRef<'a, T: ?Sized>(pub &'a T);

/// Fields holding a nested section
pub trait SectionField {
    fn section_property(&self, name: &'static str) -> Option<SectionProperty>;
}

impl<T: ConfigSection> SectionField for FieldRef<'_, Arc<T>> {
    fn section_property(&self, name: &'static str) -> Option<SectionProperty> {
        Some(SectionProperty::of(name, self.0))
    }
}

impl<T: ConfigSection> SectionField for FieldRef<'_, Option<Arc<T>>> {
    fn section_property(&self, name: &'static str) -> Option<SectionProperty> {
        Some(SectionProperty::optional(name, self.0))
    }
}

/// Every other field; never a property
pub trait ValueField {
    fn section_property(&self, name: &'static str) -> Option<SectionProperty>;
}

impl<T: ?Sized> ValueField for &FieldRef<'_, T> {
    fn section_property(&self, _name: &'static str) -> Option<SectionProperty> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::collections::HashMap;

    trait Hook: Send + Sync {}

    struct Child;

    impl ConfigSection for Child {
        fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
            self
        }
    }

    #[test]
    fn test_sections_become_properties() {
        let child = Arc::new(Child);
        let property = (&FieldRef(&child)).section_property("child").unwrap();
        assert_eq!(property.name, "child");
        assert!(property.value.is_some());

        let unset: Option<Arc<Child>> = None;
        let property = (&FieldRef(&unset)).section_property("unset").unwrap();
        assert!(property.value.is_none());
    }

    #[test]
    fn test_shared_values_are_ignored() {
        let hosts = Arc::new(vec!["a".to_string()]);
        assert!((&FieldRef(&hosts)).section_property("hosts").is_none());

        let limits: Option<Arc<HashMap<String, u32>>> = Some(Arc::new(HashMap::new()));
        assert!((&FieldRef(&limits)).section_property("limits").is_none());

        struct NoHook;
        impl Hook for NoHook {}
        let hook: Arc<dyn Hook> = Arc::new(NoHook);
        assert!((&FieldRef(&hook)).section_property("hook").is_none());
    }
}
