//! Fieldwise: declarative, tag-driven initialization of configuration structs.
//!
//! Annotate the fields of a struct with defaults and required markers, then let
//! fieldwise fill it in: zero-valued fields get their defaults (recursively
//! through nested records), caller overrides are applied by field name, and
//! required fields are checked last.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::time::Duration;
//! use fieldwise::prelude::*;
//!
//! #[derive(Debug, DeriveRecord)]
//! struct Server {
//!     #[tag(default = "0.0.0.0", required = "true")]
//!     pub address: String,
//!     #[tag(default = "30s")]
//!     pub timeout: Duration,
//!     #[tag(default = "100")]
//!     pub max_conns: i64,
//!     #[fieldwise(opaque)]
//!     pub tls: Option<TlsConfig>,
//!     pub pool: Option<PoolConfig>,
//! }
//!
//! let mut server = Server::zero();
//! fieldwise::new(
//!     &mut server,
//!     [with("address", "127.0.0.1"), with("max_conns", 200)],
//! )?;
//! ```
//!
//! # Phases
//!
//! 1. **Defaults**: every exported field holding its zero value and carrying a
//!    default annotation gets the parsed default. Nested records are handled
//!    first; an absent `Option<Record>` is allocated before recursing.
//! 2. **Overrides**: [`Override`] steps run in order. The first failure stops
//!    the sequence.
//! 3. **Validation**: every field marked required must be non-zero, at every
//!    level of nesting.
//!
//! No phase rolls back earlier mutations when a later one fails.
//!
//! # Annotations
//!
//! `#[tag(key = "value", ...)]` attaches arbitrary key/value pairs to a field.
//! By default `default` holds the textual default and `required = "true"` marks
//! the field mandatory. [`new_with_config`] reads other keys.
//!
//! Defaults are parsed by field type: strings verbatim, integers and floats in
//! base 10, booleans from `1 t T TRUE true True 0 f F FALSE false False`, and
//! [`std::time::Duration`] from human-readable strings such as `30s` or `1h30m`.
//!
//! # Module Structure
//!
//! - [`prelude`]: Convenient re-exports for common usage
//! - [`mod@init`]: [`new`], [`new_with_config`] and the [`Initializer`] builder
//! - [`field`]: [`Field`] and [`Record`], the field access layer
//! - [`metadata`]: cached [`FieldDescriptor`]s
//! - [`coerce`]: default annotation parsing
//! - [`defaults`], [`overrides`], [`validate`]: the three phases
//! - [`config`]: [`AnnotationConfig`] and [`UnsupportedPolicy`]
//! - [`error`]: [`Error`] and [`CoerceError`]
//! - [`value`]: [`Value`], the override payload

extern crate self as fieldwise;

pub mod coerce;
pub mod config;
pub mod defaults;
pub mod error;
pub mod field;
pub mod init;
pub mod metadata;
pub mod overrides;
pub mod prelude;
pub mod validate;
pub mod value;

// Re-exports for convenience
pub use config::{AnnotationConfig, UnsupportedPolicy};
pub use error::{CoerceError, Error};
pub use field::{
    assign_record, Field, FieldSpec, FieldType, Kind, OpaqueSlot, Record, Slot, SlotRef,
};
pub use init::{new, new_with_config, Initializer};
pub use metadata::{describe, describe_record, FieldDescriptor};
pub use overrides::{set_field, with, Override};
pub use value::{AnyValue, Value};

// Re-export derive macro when the feature is enabled
#[cfg(feature = "derive")]
pub use fieldwise_derive::Record as DeriveRecord;
