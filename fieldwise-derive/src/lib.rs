//! Derive macro for the fieldwise configuration initializer.
//!
//! This crate provides `#[derive(Record)]`, which generates the `Field` and
//! `Record` implementations fieldwise uses to read annotations and reach into
//! struct fields without runtime reflection.
//!
//! # Basic Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use fieldwise::DeriveRecord;
//!
//! #[derive(DeriveRecord)]
//! struct ServerConfig {
//!     #[tag(default = "0.0.0.0", required = "true")]
//!     pub address: String,
//!
//!     #[tag(default = "30s")]
//!     pub timeout: Duration,
//!
//!     pub pool: Option<PoolConfig>,
//! }
//! ```
//!
//! # Attributes
//!
//! - `#[tag(key = "value", ...)]` attaches annotations to a field. Values may
//!   be string, bool, integer or float literals; they are stored as text.
//!   Repeat the attribute freely, but each key only once per field.
//! - `#[fieldwise(opaque)]` marks a field whose type fieldwise should not look
//!   inside. It can be replaced by an override of exactly its type, and it is
//!   zero only when it is an `Option` holding `None`.
//!
//! # Field Visibility
//!
//! Only `pub` fields are visible to fieldwise. Other fields are listed in the
//! record's field table but are never defaulted, overridden or validated.
//!
//! # Requirements
//!
//! - Named-field or unit structs without generic parameters
//! - Exported, non-opaque fields must implement `fieldwise::Field`
//! - Hidden and opaque fields must implement `Default`, which supplies their
//!   value in the generated `Field::zero`

extern crate proc_macro;

mod codegen;
mod parse;
mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive `fieldwise::Field` and `fieldwise::Record` for a struct.
///
/// # Example
///
/// ```ignore
/// use fieldwise::DeriveRecord;
///
/// #[derive(DeriveRecord)]
/// struct DatabaseConfig {
///     #[tag(default = "localhost", required = "true")]
///     pub host: String,
///
///     #[tag(default = 5432)]
///     pub port: u16,
///
///     #[fieldwise(opaque)]
///     pub tls: Option<TlsConnector>,
///
///     password: String,
/// }
/// ```
#[proc_macro_derive(Record, attributes(tag, fieldwise))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match record::derive_record(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
