//! Recursive application of default annotations.

use tracing::trace;

use crate::coerce::coerce_slot;
use crate::config::AnnotationConfig;
use crate::error::{join_path, Error};
use crate::field::{Record, Slot};
use crate::metadata::describe_record;

/// Fill every zero-valued field that carries a default annotation, depth-first.
///
/// Absent nested references are allocated and defaulted before the parent
/// looks at the field itself. Fields already holding a non-zero value are
/// left alone, so running this twice changes nothing the second time.
pub fn apply_defaults(record: &mut dyn Record, config: &AnnotationConfig) -> Result<(), Error> {
    apply_at(record, config, "")
}

fn apply_at(record: &mut dyn Record, config: &AnnotationConfig, prefix: &str) -> Result<(), Error> {
    let descriptors = describe_record(record, config);

    for descriptor in descriptors.iter() {
        let Some(mut slot) = record.slot_mut(descriptor.index) else {
            continue;
        };
        let path = join_path(prefix, descriptor.name);

        if descriptor.field_type.kind.is_nested() {
            if let Slot::Field(field) = &mut slot {
                field.allocate();
                if let Some(nested) = field.as_record_mut() {
                    apply_at(nested, config, &path)?;
                }
            }
        }

        if slot.is_zero() && descriptor.has_default() {
            trace!(field = %path, default = descriptor.default, "applying default");
            coerce_slot(
                slot,
                descriptor.default,
                &descriptor.field_type,
                config.unsupported,
            )
            .map_err(|source| Error::Default { path, source })?;
        }
    }

    Ok(())
}
