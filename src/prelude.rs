//! Convenient re-exports for common fieldwise usage.
//!
//! ```ignore
//! use fieldwise::prelude::*;
//!
//! #[derive(Debug, DeriveRecord)]
//! struct Server {
//!     #[tag(default = "0.0.0.0", required = "true")]
//!     pub address: String,
//!     #[tag(default = "100")]
//!     pub max_conns: i64,
//! }
//!
//! let server = Initializer::<Server>::new().with("max_conns", 200).build()?;
//! ```

// ============================================================================
// Entry points
// ============================================================================

/// Initialize a target with the built-in annotation keys.
pub use crate::init::new;

/// Initialize a target with custom annotation keys.
pub use crate::init::new_with_config;

/// Builder collecting overrides and a config before initializing.
pub use crate::init::Initializer;

// ============================================================================
// Overrides
// ============================================================================

/// Build a by-name override step.
pub use crate::overrides::with;

/// A deferred modification of a target record.
pub use crate::overrides::Override;

/// Override payload with its conversion rules.
pub use crate::value::Value;

// ============================================================================
// Configuration
// ============================================================================

/// Annotation keys and coercion policy.
pub use crate::config::AnnotationConfig;

/// Strict or lenient handling of defaults on uncoercible types.
pub use crate::config::UnsupportedPolicy;

// ============================================================================
// Field access
// ============================================================================

/// Trait implemented by every field type the initializer can touch.
pub use crate::field::Field;

/// Accessor table over a record's fields.
pub use crate::field::Record;

/// Derive `Field` and `Record` for a struct (requires `derive` feature).
#[cfg(feature = "derive")]
pub use crate::DeriveRecord;

// ============================================================================
// Errors
// ============================================================================

/// Error returned by the entry points and override steps.
pub use crate::error::Error;

/// Error converting a default annotation into a field value.
pub use crate::error::CoerceError;
