use deluxe::ExtractAttributes;
use proc_macro2::TokenStream;
use quote::quote;

pub struct Output {
    pub attributes_field: syn::Ident,
    pub shadows: Vec<TokenStream>,
}

/// `#[model(...)]` on the struct itself.
#[derive(ExtractAttributes, Default, Debug)]
#[deluxe(attributes(model))]
pub struct ModelAttributes {
    pub table: Option<String>,
    pub primary_key: Option<String>,
    pub overrides: Option<syn::Path>,
}

/// `#[model(...)]` on a struct field.
#[derive(ExtractAttributes, Default, Debug)]
#[deluxe(attributes(model))]
struct ModelField {
    skip: Option<bool>,
}

pub fn process_fields(
    name: &syn::Ident,
    fields: &syn::punctuated::Punctuated<syn::Field, syn::Token![,]>,
) -> syn::Result<Output> {
    let mut attributes_field = None;
    let mut shadows = Vec::new();

    for field in fields {
        let attributes = ModelField::extract_attributes(&mut field.clone())?;
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };

        if type_name(&field.ty).as_deref() == Some("Attributes") {
            if attributes_field.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "only one `Attributes` field is allowed",
                ));
            }
            attributes_field = Some(field_name.clone());
            continue;
        }

        if let Some(shadow) = shadow_name(field_name, &field.ty) {
            if !attributes.skip.unwrap_or(false) {
                shadows.push(quote! {
                    .shadow(#shadow, |record| &record.#field_name, |record| &mut record.#field_name)
                });
            }
        }
    }

    let attributes_field = attributes_field.ok_or_else(|| {
        syn::Error::new_spanned(
            name,
            "Model derive needs a field of type `coligo::Attributes`",
        )
    })?;

    Ok(Output {
        attributes_field,
        shadows,
    })
}

/// `_nickname: Value` shadows the attribute `nickname`.
fn shadow_name(field_name: &syn::Ident, field_type: &syn::Type) -> Option<String> {
    let name = field_name.to_string();
    let stripped = name.strip_prefix('_')?;
    if stripped.is_empty() || type_name(field_type).as_deref() != Some("Value") {
        return None;
    }
    Some(stripped.to_string())
}

fn type_name(field_type: &syn::Type) -> Option<String> {
    match field_type {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}
