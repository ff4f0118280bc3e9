//! Field access for record types.
//!
//! Rust has no runtime reflection, so every field type the initializer can
//! touch implements [`Field`]: it knows its static type, its zero value, and
//! how to accept a converted override. Records implement it through
//! `#[derive(Record)]`, which also generates the [`Record`] accessor table.

use std::any::{Any, TypeId};
use std::time::Duration;

use serde::Serialize;

use crate::value::Value;

/// The kind of a field's static type, which selects the coercion rule for
/// default annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    String,
    Int,
    Uint,
    Float,
    Bool,
    /// `std::time::Duration`, matched by exact type rather than by shape
    Duration,
    /// A nested record held by value
    Record,
    /// A nested record behind an `Option`, allocated on demand
    Reference,
    /// An externally-owned type the initializer never looks inside
    Opaque,
}

impl Kind {
    /// Check if this kind holds a nested record.
    pub fn is_nested(self) -> bool {
        matches!(self, Kind::Record | Kind::Reference)
    }
}

/// Static type information for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldType {
    pub kind: Kind,
    pub name: &'static str,
    #[serde(skip)]
    pub id: TypeId,
}

impl FieldType {
    /// Describe `T` as a field of the given kind.
    pub fn of<T: Any>(kind: Kind) -> Self {
        Self {
            kind,
            name: std::any::type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// Describe a record type held by value.
    pub fn record<T: Any>() -> Self {
        Self::of::<T>(Kind::Record)
    }

    /// Describe an opaque type.
    pub fn opaque<T: Any>() -> Self {
        Self::of::<T>(Kind::Opaque)
    }
}

/// A field value the initializer can inspect and assign.
pub trait Field: Any {
    /// Static type of the field.
    fn field_type() -> FieldType
    where
        Self: Sized;

    /// The type's zero value: empty string, `0`, `false`, `None`, or a record
    /// whose fields are all zero.
    fn zero() -> Self
    where
        Self: Sized;

    /// Check if the value is its type's zero value.
    fn is_zero(&self) -> bool;

    /// Assign an override value, converting it to the field's type.
    ///
    /// Hands the value back when it cannot be converted.
    fn assign(&mut self, value: Value) -> Result<(), Value>;

    /// Allocate storage for an absent reference. No-op for everything else.
    fn allocate(&mut self) {}

    /// Borrow the nested record, if this field holds one.
    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    /// Mutably borrow the nested record, if this field holds one.
    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        None
    }
}

/// Static description of one field of a record, generated by the derive macro.
#[derive(Debug)]
pub struct FieldSpec {
    /// Field name as written in the struct.
    pub name: &'static str,
    /// Every `key = "value"` pair from the field's `#[tag(...)]` attributes.
    pub tags: &'static [(&'static str, &'static str)],
    /// True for `pub` fields.
    pub exported: bool,
    /// Static type of the field.
    pub field_type: fn() -> FieldType,
}

impl FieldSpec {
    /// Get the value of an annotation by key.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }
}

/// Shared access to one field of a record.
pub enum SlotRef<'a> {
    Field(&'a dyn Field),
    Opaque { zero: bool },
}

impl SlotRef<'_> {
    /// Check if the field holds its zero value.
    pub fn is_zero(&self) -> bool {
        match self {
            SlotRef::Field(field) => field.is_zero(),
            SlotRef::Opaque { zero } => *zero,
        }
    }
}

/// Mutable access to one field of a record.
pub enum Slot<'a> {
    Field(&'a mut dyn Field),
    Opaque(OpaqueSlot<'a>),
}

impl Slot<'_> {
    /// Check if the field holds its zero value.
    pub fn is_zero(&self) -> bool {
        match self {
            Slot::Field(field) => field.is_zero(),
            Slot::Opaque(opaque) => opaque.zero,
        }
    }

    /// Assign an override value to the field.
    pub fn assign(self, value: Value) -> Result<(), Value> {
        match self {
            Slot::Field(field) => field.assign(value),
            Slot::Opaque(opaque) => opaque.assign(value),
        }
    }
}

/// Mutable access to an opaque field. Only exact-type assignment is possible.
pub struct OpaqueSlot<'a> {
    value: &'a mut dyn Any,
    zero: bool,
    replace: fn(&mut dyn Any, Value) -> Result<(), Value>,
}

impl<'a> OpaqueSlot<'a> {
    pub fn new<T: Any>(value: &'a mut T, zero: bool) -> Self {
        Self {
            value,
            zero,
            replace: replace_exact::<T>,
        }
    }

    /// Check if the field holds its zero value.
    pub fn is_zero(&self) -> bool {
        self.zero
    }

    /// Replace the field with a value of exactly the same type.
    pub fn assign(self, value: Value) -> Result<(), Value> {
        (self.replace)(self.value, value)
    }
}

fn replace_exact<T: Any>(slot: &mut dyn Any, value: Value) -> Result<(), Value> {
    let value = value.downcast::<T>()?;
    match slot.downcast_mut::<T>() {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(Value::any(value)),
    }
}

/// Object-safe accessor table over a record type's fields.
///
/// Implement it with `#[derive(Record)]`; the indices match [`Record::fields`].
pub trait Record: Field {
    /// Static description of every field, in declaration order.
    fn fields(&self) -> &'static [FieldSpec];

    /// Static type of the record, used as its metadata cache key.
    fn record_type(&self) -> FieldType;

    /// Name of the record type as written in its declaration.
    fn type_name(&self) -> &'static str;

    /// Shared access to the field at `index`. `None` for hidden fields.
    fn slot(&self, index: usize) -> Option<SlotRef<'_>>;

    /// Mutable access to the field at `index`. `None` for hidden fields.
    fn slot_mut(&mut self, index: usize) -> Option<Slot<'_>>;
}

/// Replace a whole record with an override value of the same type.
pub fn assign_record<T: Record>(record: &mut T, value: Value) -> Result<(), Value> {
    *record = value.downcast::<T>()?;
    Ok(())
}

impl<T: Record> Field for Option<T> {
    fn field_type() -> FieldType {
        FieldType::of::<Self>(Kind::Reference)
    }

    fn zero() -> Self {
        None
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn assign(&mut self, value: Value) -> Result<(), Value> {
        match value.downcast::<Option<T>>() {
            Ok(reference) => *self = reference,
            Err(value) => *self = Some(value.downcast::<T>()?),
        }
        Ok(())
    }

    fn allocate(&mut self) {
        if self.is_none() {
            *self = Some(T::zero());
        }
    }

    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().map(|record| record as &dyn Record)
    }

    fn as_record_mut(&mut self) -> Option<&mut dyn Record> {
        self.as_mut().map(|record| record as &mut dyn Record)
    }
}

impl Field for String {
    fn field_type() -> FieldType {
        FieldType::of::<Self>(Kind::String)
    }

    fn zero() -> Self {
        String::new()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn assign(&mut self, value: Value) -> Result<(), Value> {
        match value {
            Value::String(s) => {
                *self = s;
                Ok(())
            }
            other => Err(other),
        }
    }
}

impl Field for bool {
    fn field_type() -> FieldType {
        FieldType::of::<Self>(Kind::Bool)
    }

    fn zero() -> Self {
        false
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn assign(&mut self, value: Value) -> Result<(), Value> {
        match value {
            Value::Bool(b) => {
                *self = b;
                Ok(())
            }
            other => Err(other),
        }
    }
}

impl Field for Duration {
    fn field_type() -> FieldType {
        FieldType::of::<Self>(Kind::Duration)
    }

    fn zero() -> Self {
        Duration::ZERO
    }

    fn is_zero(&self) -> bool {
        Duration::is_zero(self)
    }

    fn assign(&mut self, value: Value) -> Result<(), Value> {
        match value.as_duration() {
            Some(d) => {
                *self = d;
                Ok(())
            }
            None => Err(value),
        }
    }
}

macro_rules! impl_integer_field {
    ($kind:ident: $($t:ty),*) => {
        $(
            impl Field for $t {
                fn field_type() -> FieldType {
                    FieldType::of::<Self>(Kind::$kind)
                }

                fn zero() -> Self {
                    0
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn assign(&mut self, value: Value) -> Result<(), Value> {
                    match value.as_integer().and_then(|n| <$t>::try_from(n).ok()) {
                        Some(n) => {
                            *self = n;
                            Ok(())
                        }
                        None => Err(value),
                    }
                }
            }
        )*
    };
}

impl_integer_field!(Int: i8, i16, i32, i64, isize);
impl_integer_field!(Uint: u8, u16, u32, u64, usize);

macro_rules! impl_float_field {
    ($($t:ty),*) => {
        $(
            impl Field for $t {
                fn field_type() -> FieldType {
                    FieldType::of::<Self>(Kind::Float)
                }

                fn zero() -> Self {
                    0.0
                }

                fn is_zero(&self) -> bool {
                    *self == 0.0
                }

                fn assign(&mut self, value: Value) -> Result<(), Value> {
                    match value.as_float() {
                        // a finite value must stay finite after narrowing
                        Some(f) if !(f.is_finite() && (f as $t).is_infinite()) => {
                            *self = f as $t;
                            Ok(())
                        }
                        _ => Err(value),
                    }
                }
            }
        )*
    };
}

impl_float_field!(f32, f64);
