//! Required-field validation.
//!
//! Runs after overrides. Fields are checked in declaration order; a nested
//! record is walked before the field slot holding it is checked, and the first
//! violation ends the walk.

use crate::config::AnnotationConfig;
use crate::error::{join_path, Error};
use crate::field::{Record, SlotRef};
use crate::metadata::describe_record;

/// Check that every field marked required holds a non-zero value, at every
/// level of nesting.
pub fn validate_required(record: &dyn Record, config: &AnnotationConfig) -> Result<(), Error> {
    validate_at(record, config, "")
}

fn validate_at(record: &dyn Record, config: &AnnotationConfig, prefix: &str) -> Result<(), Error> {
    let descriptors = describe_record(record, config);

    for descriptor in descriptors.iter() {
        let Some(slot) = record.slot(descriptor.index) else {
            continue;
        };
        let path = join_path(prefix, descriptor.name);

        if descriptor.field_type.kind.is_nested() {
            if let SlotRef::Field(field) = &slot {
                match field.as_record() {
                    Some(nested) => validate_at(nested, config, &path)?,
                    None if descriptor.required => return Err(Error::NilReference { path }),
                    None => continue,
                }
            }
        }

        if descriptor.required && slot.is_zero() {
            return Err(Error::RequiredZero { path });
        }
    }

    Ok(())
}
