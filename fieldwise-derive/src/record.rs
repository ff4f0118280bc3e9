//! Record derive implementation.
//!
//! Checks the input shape and collects field information for codegen.

use proc_macro2::TokenStream;
use syn::{Data, DeriveInput, Error, Fields, Result};

use crate::codegen::generate_record_impl;
use crate::parse::{parse_field, FieldInfo};

/// Derive `Field` and `Record` for a struct.
pub fn derive_record(input: DeriveInput) -> Result<TokenStream> {
    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(_) => {
            return Err(Error::new_spanned(
                &input,
                "Record can only be derived for structs, not enums",
            ));
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                &input,
                "Record can only be derived for structs, not unions",
            ));
        }
    };

    // field tables are statics, which cannot mention type parameters
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic structs",
        ));
    }

    let fields = match &data.fields {
        Fields::Named(fields) => parse_named_fields(fields)?,
        Fields::Unnamed(_) => {
            return Err(Error::new_spanned(
                &input,
                "Record does not support tuple structs; use named fields",
            ));
        }
        Fields::Unit => Vec::new(),
    };

    Ok(generate_record_impl(&input.ident, &fields))
}

fn parse_named_fields(fields: &syn::FieldsNamed) -> Result<Vec<FieldInfo>> {
    fields.named.iter().map(parse_field).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_accepted() {
        let input: DeriveInput = syn::parse_quote! {
            struct Server {
                #[tag(default = "0.0.0.0", required = "true")]
                pub address: String,
                #[fieldwise(opaque)]
                pub tls: Option<Tls>,
                secret: String,
            }
        };

        let tokens = derive_record(input).unwrap().to_string();
        assert!(tokens.contains("impl :: fieldwise :: Field for Server"));
        assert!(tokens.contains("impl :: fieldwise :: Record for Server"));
        assert!(tokens.contains("\"address\""));
    }

    #[test]
    fn test_unit_struct_accepted() {
        let input: DeriveInput = syn::parse_quote! {
            struct Empty;
        };
        assert!(derive_record(input).is_ok());
    }

    #[test]
    fn test_enum_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            enum Mode { Fast, Slow }
        };
        let err = derive_record(input).unwrap_err();
        assert!(err.to_string().contains("not enums"));
    }

    #[test]
    fn test_union_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            union Bits { a: u32, b: f32 }
        };
        let err = derive_record(input).unwrap_err();
        assert!(err.to_string().contains("not unions"));
    }

    #[test]
    fn test_tuple_struct_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Pair(pub String, pub u16);
        };
        let err = derive_record(input).unwrap_err();
        assert!(err.to_string().contains("tuple structs"));
    }

    #[test]
    fn test_generic_struct_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Wrapper<T> { pub inner: T }
        };
        let err = derive_record(input).unwrap_err();
        assert!(err.to_string().contains("generic structs"));
    }

    #[test]
    fn test_bad_tag_literal_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            struct Server {
                #[tag(default = b"bytes")]
                pub address: String,
            }
        };
        let err = derive_record(input).unwrap_err();
        assert!(err.to_string().contains("expects a string, bool or number literal"));
    }
}
