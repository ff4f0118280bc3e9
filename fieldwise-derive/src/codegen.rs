//! Code generation for the Record derive macro.
//!
//! Emits two impls per struct: `Field`, so the struct can be a target or a
//! nested field, and `Record`, the index-based accessor table.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

use crate::parse::{is_option_type, FieldInfo};

/// Generate the `Field` and `Record` impls for a struct.
pub fn generate_record_impl(struct_name: &Ident, fields: &[FieldInfo]) -> TokenStream {
    let field_impl = generate_field_impl(struct_name, fields);
    let record_impl = generate_record_table(struct_name, fields);

    quote! {
        #field_impl
        #record_impl
    }
}

fn generate_field_impl(struct_name: &Ident, fields: &[FieldInfo]) -> TokenStream {
    let zero_inits = fields.iter().map(|f| {
        let ident = &f.ident;
        let ty = &f.ty;
        if f.is_field() {
            quote! { #ident: <#ty as ::fieldwise::Field>::zero() }
        } else {
            quote! { #ident: ::core::default::Default::default() }
        }
    });

    let zero_checks = fields
        .iter()
        .filter(|f| f.exported)
        .map(generate_zero_check);

    quote! {
        impl ::fieldwise::Field for #struct_name {
            fn field_type() -> ::fieldwise::FieldType {
                ::fieldwise::FieldType::record::<Self>()
            }

            fn zero() -> Self {
                #struct_name {
                    #(#zero_inits),*
                }
            }

            fn is_zero(&self) -> bool {
                true #(&& #zero_checks)*
            }

            fn assign(
                &mut self,
                value: ::fieldwise::Value,
            ) -> ::core::result::Result<(), ::fieldwise::Value> {
                ::fieldwise::assign_record(self, value)
            }

            fn as_record(&self) -> ::core::option::Option<&dyn ::fieldwise::Record> {
                ::core::option::Option::Some(self)
            }

            fn as_record_mut(&mut self) -> ::core::option::Option<&mut dyn ::fieldwise::Record> {
                ::core::option::Option::Some(self)
            }
        }
    }
}

/// Zero check for one exported field.
///
/// Opaque fields are zero only when they are an absent `Option`.
fn generate_zero_check(field: &FieldInfo) -> TokenStream {
    let ident = &field.ident;
    if !field.opaque {
        quote! { ::fieldwise::Field::is_zero(&self.#ident) }
    } else if is_option_type(&field.ty) {
        quote! { ::core::option::Option::is_none(&self.#ident) }
    } else {
        quote! { false }
    }
}

fn generate_record_table(struct_name: &Ident, fields: &[FieldInfo]) -> TokenStream {
    let count = fields.len();
    let type_name = struct_name.to_string();
    let specs = fields.iter().map(generate_field_spec);

    let exported: Vec<(usize, &FieldInfo)> = fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.exported)
        .collect();

    let slot_arms = exported.iter().map(|(index, f)| {
        let ident = &f.ident;
        if f.opaque {
            let zero = generate_zero_check(f);
            quote! {
                #index => ::core::option::Option::Some(
                    ::fieldwise::SlotRef::Opaque { zero: #zero }
                ),
            }
        } else {
            quote! {
                #index => ::core::option::Option::Some(
                    ::fieldwise::SlotRef::Field(&self.#ident)
                ),
            }
        }
    });

    let slot_mut_arms = exported.iter().map(|(index, f)| {
        let ident = &f.ident;
        if f.opaque {
            let zero = generate_zero_check(f);
            quote! {
                #index => {
                    let zero = #zero;
                    ::core::option::Option::Some(::fieldwise::Slot::Opaque(
                        ::fieldwise::OpaqueSlot::new(&mut self.#ident, zero),
                    ))
                }
            }
        } else {
            quote! {
                #index => ::core::option::Option::Some(
                    ::fieldwise::Slot::Field(&mut self.#ident)
                ),
            }
        }
    });

    quote! {
        impl ::fieldwise::Record for #struct_name {
            fn fields(&self) -> &'static [::fieldwise::FieldSpec] {
                static FIELDS: [::fieldwise::FieldSpec; #count] = [
                    #(#specs),*
                ];
                &FIELDS
            }

            fn record_type(&self) -> ::fieldwise::FieldType {
                ::fieldwise::FieldType::record::<Self>()
            }

            fn type_name(&self) -> &'static str {
                #type_name
            }

            #[allow(clippy::match_single_binding)]
            fn slot(&self, index: usize) -> ::core::option::Option<::fieldwise::SlotRef<'_>> {
                match index {
                    #(#slot_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(clippy::match_single_binding)]
            fn slot_mut(&mut self, index: usize) -> ::core::option::Option<::fieldwise::Slot<'_>> {
                match index {
                    #(#slot_mut_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}

fn generate_field_spec(field: &FieldInfo) -> TokenStream {
    let name = field.ident.to_string();
    let ty = &field.ty;
    let exported = field.exported;
    let keys = field.tags.iter().map(|(k, _)| k);
    let values = field.tags.iter().map(|(_, v)| v);

    let field_type = if field.is_field() {
        quote! { <#ty as ::fieldwise::Field>::field_type }
    } else {
        quote! { ::fieldwise::FieldType::opaque::<#ty> }
    };

    quote! {
        ::fieldwise::FieldSpec {
            name: #name,
            tags: &[#((#keys, #values)),*],
            exported: #exported,
            field_type: #field_type,
        }
    }
}
