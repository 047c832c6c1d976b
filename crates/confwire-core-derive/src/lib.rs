//! # confwire-core-derive
//!
//! Derive macros for confwire-core.
//!
//! This crate provides procedural macros to describe configuration sections:
//! - `#[derive(ConfigSection)]`: implement `ConfigSection` from a struct's fields

use proc_macro::TokenStream;

mod section;

/// Derive `ConfigSection` for a struct with named fields
///
/// Fields typed `Arc<T>` or `Option<Arc<T>>` become nested sections when
/// `T` implements `ConfigSection`. Any other shared value, such as
/// `Arc<Vec<String>>` or `Arc<dyn Trait>`, is ignored like a plain value.
/// `#[section(skip)]` excludes a section field. Traits the section should be resolvable as are listed
/// with `#[section(interfaces(dyn TraitA, dyn TraitB))]` on the struct.
#[proc_macro_derive(ConfigSection, attributes(section))]
pub fn derive_config_section(input: TokenStream) -> TokenStream {
    section::derive_config_section_impl(input)
}
