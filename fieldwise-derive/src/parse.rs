//! Attribute parsing for the Record derive macro.
//!
//! This module handles `#[tag(...)]` annotations and `#[fieldwise(...)]`
//! options on struct fields.

use syn::{
    ext::IdentExt,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute, Error, Ident, Lit, Result, Token, Type, Visibility,
};

/// A parsed struct field with everything codegen needs.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub ident: Ident,
    pub ty: Type,
    pub exported: bool,
    pub opaque: bool,
    pub tags: Vec<(String, String)>,
}

impl FieldInfo {
    /// True for fields accessed through the `Field` trait.
    pub fn is_field(&self) -> bool {
        self.exported && !self.opaque
    }
}

/// A single `key = value` item within `#[tag(...)]`.
struct TagItem {
    key: Ident,
    value: String,
}

impl Parse for TagItem {
    fn parse(input: ParseStream) -> Result<Self> {
        // keys may be keywords, e.g. `type = "..."`
        let key = Ident::parse_any(input)?;
        input.parse::<Token![=]>()?;
        let lit: Lit = input.parse()?;

        let value = match &lit {
            Lit::Str(s) => s.value(),
            Lit::Bool(b) => b.value.to_string(),
            Lit::Int(i) => i.base10_digits().to_string(),
            Lit::Float(f) => f.base10_digits().to_string(),
            _ => {
                return Err(Error::new(
                    lit.span(),
                    format!("tag '{}' expects a string, bool or number literal", key),
                ))
            }
        };

        Ok(TagItem { key, value })
    }
}

/// Parse a `#[tag(...)]` attribute, appending to `tags`.
///
/// A key may appear only once per field, across all `#[tag]` attributes.
pub fn parse_tag_attr(attr: &Attribute, tags: &mut Vec<(String, String)>) -> Result<()> {
    let items = attr.parse_args_with(Punctuated::<TagItem, Token![,]>::parse_terminated)?;

    for item in items {
        let key = item.key.unraw().to_string();
        if tags.iter().any(|(k, _)| *k == key) {
            return Err(Error::new(
                item.key.span(),
                format!("duplicate tag '{}'", key),
            ));
        }
        tags.push((key, item.value));
    }

    Ok(())
}

/// Parse a `#[fieldwise(...)]` attribute, returning whether the field is opaque.
pub fn parse_fieldwise_attr(attr: &Attribute) -> Result<bool> {
    let mut opaque = false;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("opaque") {
            opaque = true;
            Ok(())
        } else {
            Err(meta.error("unknown fieldwise option; expected 'opaque'"))
        }
    })?;

    Ok(opaque)
}

/// Parse one named field and its attributes.
pub fn parse_field(field: &syn::Field) -> Result<FieldInfo> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| Error::new_spanned(field, "field must have a name"))?;

    let mut info = FieldInfo {
        ident,
        ty: field.ty.clone(),
        exported: matches!(field.vis, Visibility::Public(_)),
        opaque: false,
        tags: Vec::new(),
    };

    for attr in &field.attrs {
        if is_tag_attr(attr) {
            parse_tag_attr(attr, &mut info.tags)?;
        } else if is_fieldwise_attr(attr) && parse_fieldwise_attr(attr)? {
            info.opaque = true;
        }
    }

    Ok(info)
}

/// Check if an attribute is a `#[tag(...)]` attribute.
pub fn is_tag_attr(attr: &Attribute) -> bool {
    attr.path().is_ident("tag")
}

/// Check if an attribute is a `#[fieldwise(...)]` attribute.
pub fn is_fieldwise_attr(attr: &Attribute) -> bool {
    attr.path().is_ident("fieldwise")
}

/// Check if a type is `Option<T>`.
pub fn is_option_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}
