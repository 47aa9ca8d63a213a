use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

use deluxe::ExtractAttributes;

mod process;

/// Implements `coligo::Attributed` and `coligo::Model` for a struct holding a
/// `coligo::Attributes` field.
///
/// * `#[model(table = "users")]`: backing table, defaults to the struct name
///   as written.
/// * `#[model(primary_key = "id")]`: key field, defaults to the first field of
///   the attribute set.
/// * `#[model(overrides = User::overrides)]`: a
///   `fn(Accessors<Self>) -> Accessors<Self>` registering getter/setter
///   overrides.
/// * Fields named `_<name>` of type `Value` become shadow properties for
///   `<name>`; `#[model(skip = true)]` opts a field out.
#[proc_macro_derive(Model, attributes(model))]
pub fn model_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Model derive does not support generic structs",
        ));
    }

    let fields = match input.data {
        Data::Struct(ref data) => match data.fields {
            Fields::Named(ref fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Model derive macro only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Model derive macro only supports structs",
            ))
        }
    };

    let attributes = process::ModelAttributes::extract_attributes(&mut input.clone())?;
    let process::Output {
        attributes_field,
        shadows,
    } = process::process_fields(name, fields)?;

    let table = attributes.table.unwrap_or_else(|| name.to_string());

    let primary_key = match attributes.primary_key {
        Some(primary_key) => quote! { #primary_key },
        None => quote! {
            ::coligo::Attributed::attributes(self).first_key().unwrap_or_default()
        },
    };

    let overrides = match attributes.overrides {
        Some(path) => quote! { #path },
        None => quote! { ::std::convert::identity },
    };

    let expanded = quote! {
        impl ::coligo::Attributed for #name {
            fn attributes(&self) -> &::coligo::Attributes {
                &self.#attributes_field
            }

            fn attributes_mut(&mut self) -> &mut ::coligo::Attributes {
                &mut self.#attributes_field
            }

            fn accessors() -> &'static ::coligo::Accessors<Self> {
                ::coligo::lazy_static::lazy_static! {
                    static ref ACCESSORS: ::coligo::Accessors<#name> =
                        #overrides(::coligo::Accessors::new() #(#shadows)*);
                }
                &ACCESSORS
            }
        }

        impl ::coligo::Model for #name {
            fn table(&self) -> &str {
                #table
            }

            fn primary_key(&self) -> &str {
                #primary_key
            }
        }
    };

    Ok(expanded)
}
