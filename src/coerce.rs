//! Type-directed conversion of default annotations into field values.

use crate::config::UnsupportedPolicy;
use crate::error::CoerceError;
use crate::field::{Field, FieldType, Kind, Slot};
use crate::value::Value;

/// Parse `raw` according to the field's kind and store it in the slot.
///
/// Opaque slots and nested records have no coercion rule; whether that is an
/// error depends on `policy`.
pub fn coerce_slot(
    slot: Slot<'_>,
    raw: &str,
    field_type: &FieldType,
    policy: UnsupportedPolicy,
) -> Result<(), CoerceError> {
    match slot {
        Slot::Field(field) => coerce_field(field, raw, field_type, policy),
        Slot::Opaque(_) => unsupported(field_type, policy),
    }
}

/// Parse `raw` according to the field's kind and assign it.
pub fn coerce_field(
    field: &mut dyn Field,
    raw: &str,
    field_type: &FieldType,
    policy: UnsupportedPolicy,
) -> Result<(), CoerceError> {
    let value = match field_type.kind {
        Kind::String => Value::String(raw.to_string()),
        Kind::Int => Value::Int(raw.parse().map_err(|source| {
            CoerceError::InvalidInteger {
                value: raw.to_string(),
                source,
            }
        })?),
        Kind::Uint => Value::Uint(raw.parse().map_err(|source| {
            CoerceError::InvalidInteger {
                value: raw.to_string(),
                source,
            }
        })?),
        Kind::Float => Value::Float(parse_float(raw, field_type)?),
        Kind::Bool => Value::Bool(parse_bool(raw)?),
        Kind::Duration => Value::Duration(humantime::parse_duration(raw).map_err(|source| {
            CoerceError::InvalidDuration {
                value: raw.to_string(),
                source,
            }
        })?),
        Kind::Record | Kind::Reference | Kind::Opaque => {
            return unsupported(field_type, policy);
        }
    };

    field.assign(value).map_err(|_| CoerceError::OutOfRange {
        value: raw.to_string(),
        type_name: field_type.name,
    })
}

/// Parse a boolean from the fixed vocabulary `1 t T TRUE true True` /
/// `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Result<bool, CoerceError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoerceError::InvalidBool {
            value: raw.to_string(),
        }),
    }
}

/// Parse a float, rejecting values too large for `f64` unless spelled as
/// infinity.
fn parse_float(raw: &str, field_type: &FieldType) -> Result<f64, CoerceError> {
    let f: f64 = raw.parse().map_err(|source| CoerceError::InvalidFloat {
        value: raw.to_string(),
        source,
    })?;
    if f.is_infinite() && !is_inf_literal(raw) {
        return Err(CoerceError::OutOfRange {
            value: raw.to_string(),
            type_name: field_type.name,
        });
    }
    Ok(f)
}

fn is_inf_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn unsupported(field_type: &FieldType, policy: UnsupportedPolicy) -> Result<(), CoerceError> {
    match policy {
        UnsupportedPolicy::Strict => Err(CoerceError::UnsupportedType {
            type_name: field_type.name,
        }),
        UnsupportedPolicy::Lenient => Ok(()),
    }
}
