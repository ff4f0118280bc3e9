//! Entry points: defaults, then overrides, then required-field validation.
//!
//! Each call runs its phases in order and stops at the first error. Nothing is
//! rolled back, so a caller that gets an error may see a partially defaulted
//! or partially overridden target.

use tracing::debug;

use crate::config::AnnotationConfig;
use crate::defaults::apply_defaults;
use crate::error::Error;
use crate::field::Field;
use crate::overrides::{target_record, with, Override};
use crate::validate::validate_required;
use crate::value::Value;

/// Initialize `target` with the built-in annotation keys `default` and
/// `required`.
///
/// # Example
///
/// ```ignore
/// use fieldwise::{with, DeriveRecord, Field};
///
/// #[derive(Debug, DeriveRecord)]
/// struct Server {
///     #[tag(default = "0.0.0.0", required = "true")]
///     pub address: String,
///     #[tag(default = "30s")]
///     pub timeout: Duration,
///     #[tag(default = "100")]
///     pub max_conns: i64,
/// }
///
/// let mut server = Server::zero();
/// fieldwise::new(&mut server, [with("max_conns", 200)])?;
/// assert_eq!(server.max_conns, 200);
/// ```
pub fn new<T, I>(target: &mut T, overrides: I) -> Result<&mut T, Error>
where
    T: Field,
    I: IntoIterator<Item = Override<T>>,
{
    new_with_config(target, &AnnotationConfig::default(), overrides)
}

/// Initialize `target`, reading the annotation keys named in `config`.
pub fn new_with_config<'a, T, I>(
    target: &'a mut T,
    config: &AnnotationConfig,
    overrides: I,
) -> Result<&'a mut T, Error>
where
    T: Field,
    I: IntoIterator<Item = Override<T>>,
{
    let record = target_record(target)?;
    let type_name = record.type_name();

    debug!(record = type_name, "applying defaults");
    apply_defaults(record, config)?;

    let mut applied = 0usize;
    for step in overrides {
        step.apply(target)?;
        applied += 1;
    }
    debug!(record = type_name, overrides = applied, "applied overrides");

    let record = target_record(target)?;
    validate_required(record, config)?;
    debug!(record = type_name, "validated required fields");

    Ok(target)
}

/// Builder that collects overrides and a config before initializing.
///
/// # Example
///
/// ```ignore
/// let server = Initializer::<Server>::new()
///     .with("address", "127.0.0.1")
///     .with("max_conns", 200)
///     .build()?;
/// ```
pub struct Initializer<T> {
    config: AnnotationConfig,
    overrides: Vec<Override<T>>,
}

impl<T: Field> Default for Initializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Field> Initializer<T> {
    /// Create a builder with the built-in annotation config and no overrides.
    pub fn new() -> Self {
        Self {
            config: AnnotationConfig::default(),
            overrides: Vec::new(),
        }
    }

    /// Use a custom annotation config.
    pub fn config(mut self, config: AnnotationConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a by-name override.
    ///
    /// Overrides run in the order they are added; later ones win.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.push(with(field, value));
        self
    }

    /// Add an arbitrary override step.
    pub fn step(mut self, step: Override<T>) -> Self {
        self.overrides.push(step);
        self
    }

    /// Initialize an existing target in place.
    pub fn apply(self, target: &mut T) -> Result<&mut T, Error> {
        new_with_config(target, &self.config, self.overrides)
    }

    /// Initialize a fresh zero-valued target and return it.
    pub fn build(self) -> Result<T, Error> {
        let mut target = T::zero();
        self.apply(&mut target)?;
        Ok(target)
    }
}
