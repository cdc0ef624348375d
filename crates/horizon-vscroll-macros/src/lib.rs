//! Procedural macros for Horizon VScroll field accessor tables.
//!
//! This crate provides `#[derive(FieldSource)]`, which builds a static
//! [`FieldTable`] for a struct so templates can bind to its fields by name
//! without runtime reflection.
//!
//! # Attributes
//!
//! ## `#[field]`
//!
//! Every named field is registered under its own name unless told otherwise:
//!
//! ```ignore
//! #[derive(FieldSource)]
//! struct Product {
//!     name: String,
//!
//!     #[field(rename = "cost")]
//!     price: f64,
//!
//!     #[field(skip)]
//!     cache: Vec<u8>,
//! }
//! ```
//!
//! Field attributes:
//! - `rename = "key"`: Bind under a different key
//! - `skip`: Exclude the field from the table
//!
//! Fields whose names start with `_` are skipped automatically. Registered
//! field types must be `Clone` and convert into `Value`.
//!
//! ## `#[property]` and `#[static_property]`
//!
//! Struct-level attributes registering computed values. Properties are looked
//! up before fields, so a property may shadow a field of the same name:
//!
//! ```ignore
//! #[derive(FieldSource)]
//! #[property(name = "label", getter = "display_label")]
//! #[static_property(name = "kind", getter = "kind_name")]
//! struct Product {
//!     name: String,
//! }
//!
//! impl Product {
//!     fn display_label(&self) -> String { format!("* {}", self.name) }
//!     fn kind_name() -> &'static str { "product" }
//! }
//! ```
//!
//! ## `#[static_field]`
//!
//! Struct-level attribute registering a type-level value after the instance
//! fields, read either from an associated constant or an associated function:
//!
//! ```ignore
//! #[derive(FieldSource)]
//! #[static_field(name = "currency", constant = "CURRENCY")]
//! #[static_field(name = "version", getter = "schema_version")]
//! struct Product { /* ... */ }
//! ```
//!
//! [`FieldTable`]: https://docs.rs/horizon-vscroll-core

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident, LitStr};

/// Derive `Reflect` and `FieldSource` backed by a static accessor table.
///
/// This macro generates:
/// - A type-erased getter function per registered entry
/// - A static `FieldTable` listing properties, then fields
/// - Implementations of `Reflect` and `FieldSource`
///
/// # Example
///
/// ```ignore
/// use horizon_vscroll_core::{Item, lookup, Value};
/// use horizon_vscroll_macros::FieldSource;
///
/// #[derive(FieldSource)]
/// struct Product {
///     name: String,
///     price: f64,
/// }
///
/// let item = Item::record(Product { name: "Apple".into(), price: 1.5 });
/// assert_eq!(lookup(&item, "price"), Some(Value::Float(1.5)));
/// ```
#[proc_macro_derive(FieldSource, attributes(field, property, static_property, static_field))]
pub fn derive_field_source(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_derive_field_source(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// How a registered entry reads its value.
enum Source {
    /// `typed.field.clone()`
    Field(Ident),
    /// `typed.method()`
    Method(Ident),
    /// `Type::function()`
    Associated(Ident),
    /// `Type::CONSTANT.clone()`
    Constant(Ident),
}

/// Parsed accessor information.
struct AccessorInfo {
    key: String,
    source: Source,
}

impl AccessorInfo {
    fn is_static(&self) -> bool {
        matches!(self.source, Source::Associated(_) | Source::Constant(_))
    }
}

fn impl_derive_field_source(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let upper = struct_name.to_string().to_uppercase();
    let table_name = format_ident!("{}_FIELDS", upper);
    let property_list = format_ident!("__{}_PROPERTY_ACCESSORS", upper);
    let field_list = format_ident!("__{}_FIELD_ACCESSORS", upper);

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "FieldSource derive does not support generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Some(&fields.named),
            Fields::Unit => None,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "FieldSource derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "FieldSource derive only supports structs",
            ));
        }
    };

    // Struct-level entries
    let (properties, static_fields) = parse_struct_attrs(&input.attrs)?;

    // Instance fields, then static fields
    let mut entries = Vec::new();
    for field in fields.into_iter().flatten() {
        if let Some(info) = parse_field(field)? {
            entries.push(info);
        }
    }
    entries.extend(static_fields);

    let property_getters = generate_getters(struct_name, "property", &properties);
    let field_getters = generate_getters(struct_name, "field", &entries);
    let property_meta = generate_accessor_meta(struct_name, "property", &properties);
    let field_meta = generate_accessor_meta(struct_name, "field", &entries);
    let type_name = struct_name.to_string();
    let property_count = properties.len();
    let field_count = entries.len();

    let expanded = quote! {
        const _: () = {
            #property_getters
            #field_getters

            static #property_list: [horizon_vscroll_core::FieldAccessor; #property_count] = #property_meta;
            static #field_list: [horizon_vscroll_core::FieldAccessor; #field_count] = #field_meta;

            /// Static accessor table for this type (generated by #[derive(FieldSource)]).
            #[allow(non_upper_case_globals)]
            static #table_name: horizon_vscroll_core::FieldTable = horizon_vscroll_core::FieldTable::new(
                #type_name,
                &#property_list,
                &#field_list,
            );

            impl #struct_name {
                /// The accessor table for this type (generated by #[derive(FieldSource)]).
                pub const FIELDS: &'static horizon_vscroll_core::FieldTable = &#table_name;
            }

            impl horizon_vscroll_core::Reflect for #struct_name {
                fn field_table(&self) -> &'static horizon_vscroll_core::FieldTable {
                    &#table_name
                }

                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }
            }

            impl horizon_vscroll_core::FieldSource for #struct_name {
                fn get(&self, key: &str) -> ::std::option::Option<horizon_vscroll_core::Value> {
                    #table_name.get(self, key)
                }
            }
        };
    };

    Ok(expanded)
}

/// Parse struct-level #[property], #[static_property] and #[static_field] attributes.
fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<(Vec<AccessorInfo>, Vec<AccessorInfo>)> {
    let mut properties = Vec::new();
    let mut static_fields = Vec::new();

    for attr in attrs {
        let kind = if attr.path().is_ident("property") {
            "property"
        } else if attr.path().is_ident("static_property") {
            "static_property"
        } else if attr.path().is_ident("static_field") {
            "static_field"
        } else {
            continue;
        };

        let mut name: Option<LitStr> = None;
        let mut getter: Option<LitStr> = None;
        let mut constant: Option<LitStr> = None;

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("getter") {
                getter = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("constant") && kind == "static_field" {
                constant = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error(format!("unsupported {kind} attribute")));
            }
            Ok(())
        })?;

        let Some(name) = name else {
            return Err(syn::Error::new_spanned(
                attr,
                format!("#[{kind}] requires `name = \"...\"`"),
            ));
        };

        let source = match (kind, getter, constant) {
            (_, Some(_), Some(_)) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "`getter` and `constant` are mutually exclusive",
                ));
            }
            ("static_field", None, Some(constant)) => Source::Constant(constant.parse()?),
            ("static_field", None, None) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    "#[static_field] requires `getter` or `constant`",
                ));
            }
            ("property", getter, _) => {
                Source::Method(getter.as_ref().unwrap_or(&name).parse()?)
            }
            (_, getter, _) => Source::Associated(getter.as_ref().unwrap_or(&name).parse()?),
        };

        let info = AccessorInfo {
            key: name.value(),
            source,
        };
        if kind == "static_field" {
            static_fields.push(info);
        } else {
            properties.push(info);
        }
    }

    Ok((properties, static_fields))
}

/// Parse a field, honoring #[field(skip)] and #[field(rename = "...")].
fn parse_field(field: &syn::Field) -> syn::Result<Option<AccessorInfo>> {
    let field_name = match &field.ident {
        Some(name) => name.clone(),
        None => return Ok(None),
    };

    if field_name.to_string().starts_with('_') {
        return Ok(None);
    }

    let mut key = None;
    let mut skip = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("field") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                key = Some(value.value());
            } else {
                return Err(meta.error("unsupported field attribute"));
            }
            Ok(())
        })?;
    }

    if skip {
        return Ok(None);
    }

    // Raw identifiers bind under their plain name.
    let plain = field_name.to_string().trim_start_matches("r#").to_string();

    Ok(Some(AccessorInfo {
        key: key.unwrap_or(plain),
        source: Source::Field(field_name),
    }))
}

fn getter_ident(struct_name: &Ident, list: &str, index: usize) -> Ident {
    format_ident!(
        "__{}_{}_{}_getter",
        struct_name.to_string().to_lowercase(),
        list,
        index
    )
}

/// Generate the type-erased getter functions for one accessor list.
fn generate_getters(struct_name: &Ident, list: &str, accessors: &[AccessorInfo]) -> TokenStream2 {
    let fns: Vec<TokenStream2> = accessors
        .iter()
        .enumerate()
        .map(|(index, info)| {
            let getter_name = getter_ident(struct_name, list, index);
            let value = quote! { horizon_vscroll_core::Value };

            match &info.source {
                Source::Field(field) => quote! {
                    #[allow(non_snake_case)]
                    fn #getter_name(obj: &dyn ::std::any::Any) -> ::std::option::Option<#value> {
                        let typed = obj.downcast_ref::<#struct_name>()?;
                        ::std::option::Option::Some(#value::from(::std::clone::Clone::clone(&typed.#field)))
                    }
                },
                Source::Method(method) => quote! {
                    #[allow(non_snake_case)]
                    fn #getter_name(obj: &dyn ::std::any::Any) -> ::std::option::Option<#value> {
                        let typed = obj.downcast_ref::<#struct_name>()?;
                        ::std::option::Option::Some(#value::from(typed.#method()))
                    }
                },
                Source::Associated(function) => quote! {
                    #[allow(non_snake_case)]
                    fn #getter_name() -> ::std::option::Option<#value> {
                        ::std::option::Option::Some(#value::from(<#struct_name>::#function()))
                    }
                },
                Source::Constant(constant) => quote! {
                    #[allow(non_snake_case)]
                    fn #getter_name() -> ::std::option::Option<#value> {
                        ::std::option::Option::Some(#value::from(::std::clone::Clone::clone(&<#struct_name>::#constant)))
                    }
                },
            }
        })
        .collect();

    quote! { #(#fns)* }
}

/// Generate the accessor array for one list.
fn generate_accessor_meta(
    struct_name: &Ident,
    list: &str,
    accessors: &[AccessorInfo],
) -> TokenStream2 {
    let entries: Vec<TokenStream2> = accessors
        .iter()
        .enumerate()
        .map(|(index, info)| {
            let key = &info.key;
            let getter_name = getter_ident(struct_name, list, index);
            if info.is_static() {
                quote! { horizon_vscroll_core::FieldAccessor::associated(#key, #getter_name) }
            } else {
                quote! { horizon_vscroll_core::FieldAccessor::instance(#key, #getter_name) }
            }
        })
        .collect();

    quote! { [#(#entries),*] }
}
