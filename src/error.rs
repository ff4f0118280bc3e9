//! Error types for the fieldwise initializer.
//!
//! Every phase of initialization stops at its first error. Errors name the
//! offending field by its dotted path from the target (`nested.port`), so a
//! top-level field is reported by its plain name.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Errors produced while turning a default annotation into a field value.
#[derive(Debug, Clone, Error)]
pub enum CoerceError {
    /// The annotation is not a base-10 integer.
    #[error("invalid integer {value:?}: {source}")]
    InvalidInteger {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The annotation is not a base-10 float.
    #[error("invalid float {value:?}: {source}")]
    InvalidFloat {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// The annotation is outside the boolean vocabulary.
    #[error("invalid boolean {value:?}")]
    InvalidBool { value: String },

    /// The annotation is not a human-readable duration such as `30s` or `1h30m`.
    #[error("invalid duration {value:?}: {source}")]
    InvalidDuration {
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    /// The annotation parsed, but does not fit the field's width.
    #[error("value {value:?} out of range for {type_name}")]
    OutOfRange {
        value: String,
        type_name: &'static str,
    },

    /// The field carries a default annotation but its type has no coercion rule.
    #[error("unsupported field type {type_name}")]
    UnsupportedType { type_name: &'static str },
}

/// Errors returned by [`new`](crate::new) and the override steps.
#[derive(Debug, Error)]
pub enum Error {
    /// The target is not a record.
    #[error("target must be a record, got {type_name}")]
    InvalidTarget { type_name: &'static str },

    /// An override names a field the record does not have.
    #[error("no such field: {field}")]
    NoSuchField { field: String },

    /// An override names a field hidden from outside its defining module.
    #[error("cannot set field: {field}")]
    CannotSet { field: String },

    /// An override value cannot be converted to the field's static type.
    #[error("cannot convert {from} to {to} for field {field}")]
    CannotConvert {
        field: String,
        from: &'static str,
        to: &'static str,
    },

    /// A default annotation could not be applied.
    #[error("error setting default for field {path}: {source}")]
    Default {
        path: String,
        #[source]
        source: CoerceError,
    },

    /// A required field still holds its zero value after overrides.
    #[error("required field {path} is zero")]
    RequiredZero { path: String },

    /// A required nested reference is absent.
    #[error("nil pointer encountered in validation of field {path}")]
    NilReference { path: String },
}

impl Error {
    /// Get the field path this error relates to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::InvalidTarget { .. } => None,
            Error::NoSuchField { field }
            | Error::CannotSet { field }
            | Error::CannotConvert { field, .. } => Some(field),
            Error::Default { path, .. }
            | Error::RequiredZero { path }
            | Error::NilReference { path } => Some(path),
        }
    }

    /// Check if this error came from required-field validation.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::RequiredZero { .. } | Error::NilReference { .. }
        )
    }
}

/// Join a parent path and a field name with a dot.
pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
