//! Field metadata extraction and the process-wide metadata cache.
//!
//! Descriptors are built once per record type and kept for the life of the
//! process. Record shapes cannot change at run time, so entries are never
//! invalidated; an entry is only rebuilt when a call reads different
//! annotation keys than the ones it was built with.

use std::any::TypeId;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

use crate::config::AnnotationConfig;
use crate::field::{FieldType, Record};

/// Cached metadata for one field of a record type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Position of the field within its declaring record.
    pub index: usize,
    /// Field name as written in the struct.
    pub name: &'static str,
    /// Raw default annotation; empty when absent.
    pub default: &'static str,
    /// True when the required annotation is exactly `"true"`.
    pub required: bool,
    /// Static type of the field.
    pub field_type: FieldType,
}

impl FieldDescriptor {
    /// Check if the field carries a default annotation.
    pub fn has_default(&self) -> bool {
        !self.default.is_empty()
    }
}

struct CacheEntry {
    config: AnnotationConfig,
    fields: Arc<[FieldDescriptor]>,
}

fn cache() -> &'static DashMap<TypeId, Arc<CacheEntry>> {
    static CACHE: OnceLock<DashMap<TypeId, Arc<CacheEntry>>> = OnceLock::new();
    CACHE.get_or_init(DashMap::new)
}

/// Get the descriptors of `T`'s exported fields, in declaration order.
pub fn describe<T: Record>(config: &AnnotationConfig) -> Arc<[FieldDescriptor]> {
    let record = T::zero();
    describe_record(&record, config)
}

/// Get the descriptors of a record's exported fields, in declaration order.
pub fn describe_record(record: &dyn Record, config: &AnnotationConfig) -> Arc<[FieldDescriptor]> {
    let type_id = record.record_type().id;

    let cached = cache()
        .get(&type_id)
        .filter(|entry| entry.config.same_keys(config))
        .map(|entry| Arc::clone(&entry.fields));
    if let Some(fields) = cached {
        return fields;
    }

    let fields = extract(record, config);
    debug!(
        record = record.type_name(),
        fields = fields.len(),
        "extracted field metadata"
    );
    let entry = CacheEntry {
        config: config.clone(),
        fields: Arc::clone(&fields),
    };
    cache().insert(type_id, Arc::new(entry));
    fields
}

fn extract(record: &dyn Record, config: &AnnotationConfig) -> Arc<[FieldDescriptor]> {
    record
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, spec)| spec.exported)
        .map(|(index, spec)| FieldDescriptor {
            index,
            name: spec.name,
            default: spec.tag(&config.default_key).unwrap_or(""),
            required: spec.tag(&config.required_key) == Some("true"),
            field_type: (spec.field_type)(),
        })
        .collect()
}
