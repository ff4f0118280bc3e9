//! Integration tests for the Record derive macro and the initializer built on it.

use std::time::Duration;

use fieldwise::prelude::*;
use fieldwise::{describe, FieldType, Kind, Slot, SlotRef};

// ============================================================================
// Basic Derive Tests
// ============================================================================

#[derive(Debug, DeriveRecord)]
struct EmptyConfig {}

#[derive(Debug, DeriveRecord)]
struct UnitConfig;

#[test]
fn test_empty_structs() {
    let config = EmptyConfig::zero();
    assert!(config.is_zero());
    assert!(config.fields().is_empty());
    assert!(config.slot(0).is_none());

    let mut unit = UnitConfig::zero();
    assert!(new(&mut unit, []).is_ok());
    assert_eq!(unit.type_name(), "UnitConfig");
}

#[derive(Debug, DeriveRecord)]
struct Endpoint {
    #[tag(default = "localhost")]
    pub host: String,
    #[tag(default = 443, required = true)]
    pub port: u16,
    #[tag(default = 0.25)]
    pub jitter: f32,
    #[tag(env = "ENDPOINT_TOKEN")]
    token: String,
}

#[test]
fn test_field_table() {
    let endpoint = Endpoint::zero();
    let fields = endpoint.fields();
    assert_eq!(fields.len(), 4);

    assert_eq!(fields[0].name, "host");
    assert_eq!(fields[0].tag("default"), Some("localhost"));
    assert!(fields[0].exported);

    // non-string literals are stored as text
    assert_eq!(fields[1].tag("default"), Some("443"));
    assert_eq!(fields[1].tag("required"), Some("true"));
    assert_eq!(fields[2].tag("default"), Some("0.25"));

    assert_eq!(fields[3].name, "token");
    assert_eq!(fields[3].tag("env"), Some("ENDPOINT_TOKEN"));
    assert!(!fields[3].exported);
    assert_eq!((fields[3].field_type)().kind, Kind::Opaque);
}

#[test]
fn test_zero_and_slots() {
    let mut endpoint = Endpoint::zero();
    assert!(endpoint.is_zero());
    assert!(endpoint.token.is_empty());

    assert!(matches!(endpoint.slot(1), Some(SlotRef::Field(_))));
    assert!(endpoint.slot(3).is_none());
    assert!(endpoint.slot_mut(3).is_none());
    assert!(endpoint.slot(4).is_none());

    match endpoint.slot_mut(1) {
        Some(Slot::Field(field)) => field.assign(Value::Int(8443)).unwrap(),
        _ => panic!("expected a field slot"),
    }
    assert_eq!(endpoint.port, 8443);
    assert!(!endpoint.is_zero());
}

#[test]
fn test_hidden_field_does_not_affect_zero() {
    let mut endpoint = Endpoint::zero();
    endpoint.token = "secret".to_string();
    assert!(endpoint.is_zero());
}

#[test]
fn test_record_type_identity() {
    let endpoint = Endpoint::zero();
    assert_eq!(endpoint.record_type(), FieldType::record::<Endpoint>());
    assert_eq!(Endpoint::field_type().kind, Kind::Record);
    assert_eq!(<Option<Endpoint>>::field_type().kind, Kind::Reference);
}

#[test]
fn test_describe_skips_hidden_fields() {
    let descriptors = describe::<Endpoint>(&AnnotationConfig::default());
    let names: Vec<_> = descriptors.iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["host", "port", "jitter"]);

    assert_eq!(descriptors[1].index, 1);
    assert!(descriptors[1].required);
    assert!(!descriptors[0].required);
    assert_eq!(descriptors[2].default, "0.25");
}

// ============================================================================
// Nested and Opaque Fields
// ============================================================================

#[derive(Debug, Default, PartialEq)]
struct TlsConfig {
    min_version: u16,
}

#[derive(Debug, DeriveRecord)]
struct Nested {
    #[tag(default = "8080", required = "true")]
    pub port: i64,
    #[tag(default = "localhost", required = "true")]
    pub host: String,
}

#[derive(Debug, DeriveRecord)]
struct Server {
    #[tag(default = "0.0.0.0", required = "true")]
    pub address: String,
    #[tag(default = "30s")]
    pub timeout: Duration,
    #[tag(default = "100")]
    pub max_conns: i64,
    #[fieldwise(opaque)]
    pub tls_config: Option<TlsConfig>,
    pub nested: Option<Nested>,
}

#[test]
fn test_server_defaults() {
    let mut server = Server::zero();
    new(&mut server, []).unwrap();

    assert_eq!(server.address, "0.0.0.0");
    assert_eq!(server.timeout, Duration::from_secs(30));
    assert_eq!(server.max_conns, 100);
    assert_eq!(server.tls_config, None);

    let nested = server.nested.as_ref().unwrap();
    assert_eq!(nested.port, 8080);
    assert_eq!(nested.host, "localhost");
}

#[test]
fn test_server_overrides() {
    let mut server = Server::zero();
    new(
        &mut server,
        [with("address", "127.0.0.1"), with("max_conns", 200)],
    )
    .unwrap();

    assert_eq!(server.address, "127.0.0.1");
    assert_eq!(server.timeout, Duration::from_secs(30));
    assert_eq!(server.max_conns, 200);
    assert_eq!(server.nested.as_ref().map(|n| n.port), Some(8080));
}

#[test]
fn test_opaque_field_override() {
    let mut server = Server::zero();
    new(
        &mut server,
        [with(
            "tls_config",
            Value::any(Some(TlsConfig { min_version: 13 })),
        )],
    )
    .unwrap();
    assert_eq!(server.tls_config, Some(TlsConfig { min_version: 13 }));
}

#[test]
fn test_nested_reference_replaced_whole() {
    let mut server = Server::zero();
    new(
        &mut server,
        [with(
            "nested",
            Value::any(Nested {
                port: 9000,
                host: "db".to_string(),
            }),
        )],
    )
    .unwrap();

    let nested = server.nested.as_ref().unwrap();
    assert_eq!(nested.port, 9000);
    assert_eq!(nested.host, "db");
}

#[test]
fn test_prepopulated_fields_kept() {
    let mut server = Server::zero();
    server.address = "10.1.1.1".to_string();
    server.nested = Some(Nested {
        port: 1,
        host: String::new(),
    });
    new(&mut server, []).unwrap();

    assert_eq!(server.address, "10.1.1.1");
    let nested = server.nested.as_ref().unwrap();
    assert_eq!(nested.port, 1);
    assert_eq!(nested.host, "localhost");
}

// ============================================================================
// Error Scenarios
// ============================================================================

#[derive(Debug, DeriveRecord)]
struct Required {
    #[tag(default = "", required = "true")]
    pub field1: String,
}

#[test]
fn test_required_field_without_default() {
    let err = new(&mut Required::zero(), []).unwrap_err();
    assert_eq!(err.to_string(), "required field field1 is zero");
    assert_eq!(err.path(), Some("field1"));
    assert!(err.is_validation_error());
}

#[derive(Debug, DeriveRecord)]
struct BadDefault {
    #[tag(default = "lots")]
    pub workers: u32,
}

#[test]
fn test_bad_default() {
    let err = new(&mut BadDefault::zero(), []).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("error setting default for field workers:"));
    assert!(!err.is_validation_error());
}

#[derive(Debug, DeriveRecord)]
struct Outer {
    pub inner: Inner,
}

#[derive(Debug, DeriveRecord)]
struct Inner {
    #[tag(required = "true")]
    pub name: String,
}

#[test]
fn test_nested_required_path() {
    let err = new(&mut Outer::zero(), []).unwrap_err();
    assert_eq!(err.to_string(), "required field inner.name is zero");

    let mut outer = Outer::zero();
    outer.inner.name = "set".to_string();
    assert!(new(&mut outer, []).is_ok());
}

#[test]
fn test_override_errors() {
    let err = new(&mut Server::zero(), [with("adress", "x")]).unwrap_err();
    assert_eq!(err.to_string(), "no such field: adress");

    let err = new(&mut Server::zero(), [with("max_conns", "lots")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot convert string to i64 for field max_conns"
    );

    let err = new(&mut Endpoint::zero(), [with("token", "abc")]).unwrap_err();
    assert_eq!(err.to_string(), "cannot set field: token");
}

#[test]
fn test_custom_annotation_keys() {
    #[derive(Debug, DeriveRecord)]
    struct Renamed {
        #[tag(fallback = "7", default = "1", must = "true")]
        pub retries: u8,
        #[tag(must = "true")]
        pub name: String,
    }

    let config = AnnotationConfig::new("fallback", "must");
    let mut renamed = Renamed::zero();
    let err = new_with_config(&mut renamed, &config, []).unwrap_err();
    assert_eq!(err.to_string(), "required field name is zero");
    assert_eq!(renamed.retries, 7);

    // the built-in keys still work for the same type afterwards
    let mut renamed = Renamed::zero();
    new(&mut renamed, []).unwrap();
    assert_eq!(renamed.retries, 1);
}

#[test]
fn test_float_default_out_of_range() {
    #[derive(Debug, DeriveRecord)]
    struct Ratios {
        #[tag(default = "1e39")]
        pub narrow: f32,
    }

    let mut ratios = Ratios::zero();
    let err = new(&mut ratios, []).unwrap_err();
    assert!(matches!(
        err,
        Error::Default {
            source: CoerceError::OutOfRange { .. },
            ..
        }
    ));
    assert_eq!(ratios.narrow, 0.0);
}
