//! ConfigSection derive macro implementation
//!
//! Reads the struct's fields to find nested sections and its `#[section]`
//! attribute to find the traits it implements.

use proc_macro::TokenStream;
use proc_macro2::Ident;
use quote::quote;
use syn::{
    parse::Result, parse_macro_input, punctuated::Punctuated, Attribute, Data, DeriveInput,
    Error, Fields, GenericArgument, PathArguments, PathSegment, Token, Type,
};

/// Type names that are value types or text and never nested sections
const SCALAR_TYPES: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64", "str", "String",
];

/// Main implementation function for the ConfigSection derive
pub fn derive_config_section_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(result) => result.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// A field that may hold a nested section
#[derive(Debug, Clone)]
struct PropertyInfo {
    field: Ident,
}

fn expand(input: &DeriveInput) -> Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let properties = extract_properties(input)?;
    let interfaces = extract_interfaces(&input.attrs)?;

    // Whether `T` in `Arc<T>` is a section is only known after type checking,
    // so each field goes through `config::field` method dispatch.
    let property_entries = properties.iter().map(|property| {
        let field = &property.field;
        let label = field.to_string();

        quote! {
            if let ::std::option::Option::Some(property) =
                (&FieldRef(&self.#field)).section_property(#label)
            {
                properties.push(property);
            }
        }
    });

    let bind_interfaces = if interfaces.is_empty() {
        quote! {}
    } else {
        let bindings = interfaces.iter().map(|interface| {
            quote! {
                binder.bind::<#interface>(self.clone());
            }
        });

        quote! {
            fn bind_interfaces(
                self: ::std::sync::Arc<Self>,
                binder: &mut ::confwire_core::config::InterfaceBinder,
            ) {
                #(#bindings)*
            }
        }
    };

    Ok(quote! {
        impl #impl_generics ::confwire_core::config::ConfigSection for #name #ty_generics #where_clause {
            fn properties(&self) -> ::std::vec::Vec<::confwire_core::config::SectionProperty> {
                #[allow(unused_imports)]
                use ::confwire_core::config::field::{
                    FieldRef, SectionField as _, ValueField as _,
                };

                #[allow(unused_mut)]
                let mut properties = ::std::vec::Vec::new();
                #(#property_entries)*
                properties
            }

            #bind_interfaces

            fn into_any(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::sync::Arc<dyn ::std::any::Any + ::std::marker::Send + ::std::marker::Sync> {
                self
            }
        }
    })
}

/// Extract nested section fields from a struct
fn extract_properties(input: &DeriveInput) -> Result<Vec<PropertyInfo>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => return Ok(Vec::new()),
            Fields::Unnamed(_) => {
                return Err(Error::new_spanned(
                    &input.ident,
                    "#[derive(ConfigSection)] requires structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "#[derive(ConfigSection)] can only be applied to structs",
            ))
        }
    };

    let mut properties = Vec::new();

    for field in fields {
        if has_skip(&field.attrs)? {
            continue;
        }

        if let Some(ident) = &field.ident {
            if is_shared_field(&field.ty) {
                properties.push(PropertyInfo {
                    field: ident.clone(),
                });
            }
        }
    }

    Ok(properties)
}

/// Check for `Arc<T>` or `Option<Arc<T>>` where `T` is not a scalar
fn is_shared_field(ty: &Type) -> bool {
    shared_inner_type(ty)
        .map(|inner| !is_scalar(inner))
        .unwrap_or(false)
}

fn shared_inner_type(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;

    match segment.ident.to_string().as_str() {
        "Arc" => extract_generic_type(segment),
        "Option" => {
            let arc = last_segment(extract_generic_type(segment)?)?;
            if arc.ident != "Arc" {
                return None;
            }
            extract_generic_type(arc)
        }
        _ => None,
    }
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    match ty {
        Type::Path(type_path) => type_path.path.segments.last(),
        _ => None,
    }
}

/// Extract the generic type from `Name<T>`
fn extract_generic_type(segment: &PathSegment) -> Option<&Type> {
    if let PathArguments::AngleBracketed(args) = &segment.arguments {
        if let Some(GenericArgument::Type(inner_type)) = args.args.first() {
            return Some(inner_type);
        }
    }
    None
}

fn is_scalar(ty: &Type) -> bool {
    last_segment(ty)
        .map(|segment| SCALAR_TYPES.contains(&segment.ident.to_string().as_str()))
        .unwrap_or(false)
}

/// Check a field for `#[section(skip)]`
fn has_skip(attrs: &[Attribute]) -> Result<bool> {
    let mut skip = false;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("section")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported field attribute, expected `skip`"))
            }
        })?;
    }

    Ok(skip)
}

/// Read `#[section(interfaces(dyn A, dyn B))]` from the struct
fn extract_interfaces(attrs: &[Attribute]) -> Result<Vec<Type>> {
    let mut interfaces = Vec::new();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("section")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("interfaces") {
                let content;
                syn::parenthesized!(content in meta.input);
                let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                interfaces.extend(types);
                Ok(())
            } else {
                Err(meta.error("unsupported section attribute, expected `interfaces(...)`"))
            }
        })?;
    }

    Ok(interfaces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_is_shared_field() {
        assert!(is_shared_field(&parse_quote!(Arc<Storage>)));
        assert!(is_shared_field(&parse_quote!(std::sync::Arc<Storage>)));
        assert!(is_shared_field(&parse_quote!(Option<Arc<Storage>>)));
        assert!(is_shared_field(&parse_quote!(Arc<Vec<String>>)));
        assert!(is_shared_field(&parse_quote!(Arc<dyn Hook>)));

        assert!(!is_shared_field(&parse_quote!(Arc<String>)));
        assert!(!is_shared_field(&parse_quote!(Option<Arc<u32>>)));
        assert!(!is_shared_field(&parse_quote!(Option<Storage>)));
        assert!(!is_shared_field(&parse_quote!(Vec<Arc<Storage>>)));
        assert!(!is_shared_field(&parse_quote!(u64)));
    }

    #[test]
    fn test_extract_interfaces_and_skip() {
        let input: DeriveInput = parse_quote! {
            #[section(interfaces(dyn Storage, dyn Named))]
            struct Config {
                storage: Arc<Storage>,
                #[section(skip)]
                cache: Arc<Cache>,
                name: String,
            }
        };

        assert_eq!(extract_interfaces(&input.attrs).unwrap().len(), 2);

        let properties = extract_properties(&input).unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].field, "storage");
    }

    #[test]
    fn test_rejects_enums_and_unknown_attributes() {
        let input: DeriveInput = parse_quote! {
            enum Mode { Fast, Slow }
        };
        assert!(expand(&input).is_err());

        let input: DeriveInput = parse_quote! {
            #[section(implements(dyn Storage))]
            struct Config {}
        };
        assert!(expand(&input).is_err());
    }
}
