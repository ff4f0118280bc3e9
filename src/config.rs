//! Annotation names and coercion policy.
//!
//! The algorithm is fixed; `AnnotationConfig` only changes which `#[tag]`
//! keys are read and how a default on an uncoercible type is treated.

use serde::{Deserialize, Serialize};

/// How to treat a default annotation on a field whose type has no coercion
/// rule (records, references, opaque types).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedPolicy {
    /// Fail with an "unsupported field type" error.
    #[default]
    Strict,
    /// Leave the field untouched.
    Lenient,
}

/// Which annotation keys denote a default and a required field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Key holding a field's default, in textual form.
    pub default_key: String,
    /// Key marking a field mandatory when its value is `"true"`.
    pub required_key: String,
    /// Policy for defaults on types without a coercion rule.
    pub unsupported: UnsupportedPolicy,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            default_key: "default".to_string(),
            required_key: "required".to_string(),
            unsupported: UnsupportedPolicy::Strict,
        }
    }
}

impl AnnotationConfig {
    /// Create a config with custom annotation keys and the strict policy.
    pub fn new(default_key: impl Into<String>, required_key: impl Into<String>) -> Self {
        Self {
            default_key: default_key.into(),
            required_key: required_key.into(),
            unsupported: UnsupportedPolicy::Strict,
        }
    }

    /// Set the policy for defaults on types without a coercion rule.
    pub fn with_unsupported(mut self, policy: UnsupportedPolicy) -> Self {
        self.unsupported = policy;
        self
    }

    /// Shorthand for [`UnsupportedPolicy::Lenient`].
    pub fn lenient(self) -> Self {
        self.with_unsupported(UnsupportedPolicy::Lenient)
    }

    /// Check if two configs read the same annotation keys.
    pub(crate) fn same_keys(&self, other: &AnnotationConfig) -> bool {
        self.default_key == other.default_key && self.required_key == other.required_key
    }
}
