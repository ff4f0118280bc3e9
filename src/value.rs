//! Value types for field overrides.
//!
//! Overrides carry a `Value` rather than the field's concrete type, so one
//! `with("name", 200)` call works whether the field is an `i64`, a `u16`
//! or an `f64`. The conversion into the field type happens in
//! [`Field::assign`](crate::Field::assign).

use std::any::Any;
use std::fmt;
use std::time::Duration;

/// A boxed value of an arbitrary type, used for records, references and
/// opaque fields.
pub struct AnyValue {
    inner: Box<dyn Any>,
    type_name: &'static str,
}

impl AnyValue {
    /// Box a value, remembering its type name for error messages.
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Name of the boxed value's type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check if the boxed value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyValue({})", self.type_name)
    }
}

/// Override payload.
#[derive(Debug)]
pub enum Value {
    /// String value
    String(String),
    /// Signed integer value
    Int(i64),
    /// Unsigned integer value
    Uint(u64),
    /// Floating-point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Duration value
    Duration(Duration),
    /// Any other value; assignable only to a field of the same type
    Any(AnyValue),
}

impl Value {
    /// Wrap a value of any type. Use this for records, references and
    /// opaque fields.
    pub fn any<T: Any>(value: T) -> Self {
        Value::Any(AnyValue::new(value))
    }

    /// Get a human-readable type name for this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "integer",
            Value::Uint(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Duration(_) => "duration",
            Value::Any(any) => any.type_name(),
        }
    }

    /// Try to get this value as an integer.
    ///
    /// Floats qualify only when finite and integral.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Int(i) => Some(i128::from(*i)),
            Value::Uint(u) => Some(i128::from(*u)),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i128),
            _ => None,
        }
    }

    /// Try to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::Uint(u) => Some(*u as f64),
            _ => None,
        }
    }

    /// Try to get this value as a duration. Non-negative integers are read as
    /// nanoseconds.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Value::Duration(d) => Some(*d),
            Value::Int(i) => u64::try_from(*i).ok().map(Duration::from_nanos),
            Value::Uint(u) => Some(Duration::from_nanos(*u)),
            _ => None,
        }
    }

    /// Take the boxed value out if it is a `T`; otherwise hand `self` back.
    pub fn downcast<T: Any>(self) -> Result<T, Value> {
        match self {
            Value::Any(AnyValue { inner, type_name }) => match inner.downcast::<T>() {
                Ok(value) => Ok(*value),
                Err(inner) => Err(Value::Any(AnyValue { inner, type_name })),
            },
            other => Err(other),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

macro_rules! impl_from_number {
    ($variant:ident as $repr:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::$variant(n as $repr)
                }
            }
        )*
    };
}

impl_from_number!(Int as i64: i8, i16, i32, i64, isize);
impl_from_number!(Uint as u64: u8, u16, u32, u64, usize);
impl_from_number!(Float as f64: f32, f64);
