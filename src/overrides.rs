//! Deferred, by-name field overrides.
//!
//! An [`Override`] is a unit of work run against the target after defaults
//! and before validation. Steps run in the order given; the first failure
//! stops the sequence, and fields set by earlier steps keep their new values.

use std::fmt;

use tracing::trace;

use crate::error::Error;
use crate::field::{Field, Kind, Record};
use crate::value::Value;

type Step<T> = Box<dyn FnOnce(&mut T) -> Result<(), Error>>;

/// A deferred modification of a target record.
pub struct Override<T> {
    field: Option<String>,
    step: Step<T>,
}

impl<T> Override<T> {
    /// Wrap an arbitrary closure as an override step.
    pub fn from_fn<F>(step: F) -> Self
    where
        F: FnOnce(&mut T) -> Result<(), Error> + 'static,
    {
        Self {
            field: None,
            step: Box::new(step),
        }
    }

    /// Name of the field this step sets, if it was built by [`with`].
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Run the step against `target`.
    pub fn apply(self, target: &mut T) -> Result<(), Error> {
        (self.step)(target)
    }
}

impl<T> fmt::Debug for Override<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Override")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// Build a step that sets the field named `field` to `value`.
///
/// The value is converted to the field's type when the step runs; see
/// [`Value`] for the conversion rules.
///
/// ```ignore
/// let server = fieldwise::new(
///     &mut Server::zero(),
///     [with("address", "127.0.0.1"), with("max_conns", 200)],
/// )?;
/// ```
pub fn with<T: Field>(field: impl Into<String>, value: impl Into<Value>) -> Override<T> {
    let field = field.into();
    let value = value.into();
    let name = field.clone();
    Override {
        field: Some(field),
        step: Box::new(move |target: &mut T| {
            let record = target_record(target)?;
            set_field(record, &name, value)
        }),
    }
}

/// Borrow the target as a record, rejecting anything that is not one.
pub(crate) fn target_record<T: Field>(target: &mut T) -> Result<&mut dyn Record, Error> {
    let type_name = T::field_type().name;
    if T::field_type().kind != Kind::Record {
        return Err(Error::InvalidTarget { type_name });
    }
    target
        .as_record_mut()
        .ok_or(Error::InvalidTarget { type_name })
}

/// Assign `value` to the field named `name` on `record`.
pub fn set_field(record: &mut dyn Record, name: &str, value: Value) -> Result<(), Error> {
    let (index, spec) = record
        .fields()
        .iter()
        .enumerate()
        .find(|(_, spec)| spec.name == name)
        .ok_or_else(|| Error::NoSuchField {
            field: name.to_string(),
        })?;

    let cannot_set = || Error::CannotSet {
        field: name.to_string(),
    };
    if !spec.exported {
        return Err(cannot_set());
    }
    let slot = record.slot_mut(index).ok_or_else(cannot_set)?;

    trace!(field = name, value = value.type_name(), "applying override");
    slot.assign(value).map_err(|rejected| Error::CannotConvert {
        field: name.to_string(),
        from: rejected.type_name(),
        to: (spec.field_type)().name,
    })
}
