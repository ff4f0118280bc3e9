//! Property-based tests for fieldwise using proptest.
//!
//! These tests check the invariants of initialization for generated inputs:
//! defaults only touch zero fields, defaulting is idempotent, and overrides
//! apply in order.

use std::time::Duration;

use proptest::prelude::*;

use fieldwise::coerce::parse_bool;
use fieldwise::defaults::apply_defaults;
use fieldwise::prelude::*;

#[derive(Debug, Clone, PartialEq, DeriveRecord)]
struct Limits {
    #[tag(default = "64")]
    pub burst: u32,
    #[tag(default = "1.5")]
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, DeriveRecord)]
struct Service {
    #[tag(default = "svc", required = "true")]
    pub name: String,
    #[tag(default = "8080")]
    pub port: u16,
    #[tag(default = "-3")]
    pub offset: i32,
    #[tag(default = "true")]
    pub enabled: bool,
    #[tag(default = "1m30s")]
    pub interval: Duration,
    pub limits: Option<Limits>,
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Generate services with a random mix of zero and populated fields.
fn arb_service() -> impl Strategy<Value = Service> {
    (
        prop_oneof![Just(String::new()), "[a-z]{1,12}"],
        prop_oneof![Just(0u16), any::<u16>()],
        prop_oneof![Just(0i32), any::<i32>()],
        any::<bool>(),
        prop_oneof![Just(0u64), 1u64..86_400],
        proptest::option::of((any::<u32>(), -1e6f64..1e6)),
    )
        .prop_map(|(name, port, offset, enabled, secs, limits)| Service {
            name,
            port,
            offset,
            enabled,
            interval: Duration::from_secs(secs),
            limits: limits.map(|(burst, factor)| Limits { burst, factor }),
        })
}

// ============================================================================
// Defaults
// ============================================================================

proptest! {
    /// Property: applying defaults twice gives the same result as once.
    #[test]
    fn prop_defaults_idempotent(service in arb_service()) {
        let config = AnnotationConfig::default();

        let mut once = service.clone();
        apply_defaults(&mut once, &config).unwrap();

        let mut twice = once.clone();
        apply_defaults(&mut twice, &config).unwrap();

        prop_assert_eq!(once, twice);
    }

    /// Property: non-zero fields are never touched by defaults.
    #[test]
    fn prop_defaults_keep_populated_fields(service in arb_service()) {
        let mut target = service.clone();
        new(&mut target, []).unwrap();

        if !service.name.is_empty() {
            prop_assert_eq!(&target.name, &service.name);
        } else {
            prop_assert_eq!(target.name.as_str(), "svc");
        }
        if service.port != 0 {
            prop_assert_eq!(target.port, service.port);
        } else {
            prop_assert_eq!(target.port, 8080);
        }
        if service.offset != 0 {
            prop_assert_eq!(target.offset, service.offset);
        } else {
            prop_assert_eq!(target.offset, -3);
        }
        if service.interval.is_zero() {
            prop_assert_eq!(target.interval, Duration::from_secs(90));
        } else {
            prop_assert_eq!(target.interval, service.interval);
        }
        // false is the zero value, so the default always lands
        prop_assert!(target.enabled);

        let limits = target.limits.as_ref().unwrap();
        match &service.limits {
            Some(before) if before.burst != 0 => prop_assert_eq!(limits.burst, before.burst),
            _ => prop_assert_eq!(limits.burst, 64),
        }
    }

    /// Property: the last override of a field wins.
    #[test]
    fn prop_last_override_wins(values in proptest::collection::vec(1u16.., 1..8)) {
        let overrides: Vec<_> = values.iter().map(|&port| with("port", port)).collect();

        let mut service = Service::zero();
        new(&mut service, overrides).unwrap();

        prop_assert_eq!(Some(&service.port), values.last());
    }

    /// Property: overrides land after defaults, so they always win.
    #[test]
    fn prop_override_beats_default(name in "[a-z]{1,12}", port in 1u16..) {
        let mut service = Service::zero();
        new(&mut service, [with("name", name.clone()), with("port", port)]).unwrap();

        prop_assert_eq!(service.name, name);
        prop_assert_eq!(service.port, port);
    }

    /// Property: integer overrides outside the field's range are rejected
    /// and leave the field untouched.
    #[test]
    fn prop_out_of_range_override_rejected(value in prop_oneof![i64::MIN..0, 65_536i64..]) {
        let mut service = Service::zero();
        let err = new(&mut service, [with("port", value)]).unwrap_err();

        let is_convert_error = matches!(err, Error::CannotConvert { .. });
        prop_assert!(is_convert_error);
        prop_assert_eq!(service.port, 8080);
    }

    /// Property: only the documented spellings parse as booleans.
    #[test]
    fn prop_bool_vocabulary(raw in "[a-zA-Z01]{1,6}") {
        let expected = match raw.as_str() {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
            _ => None,
        };
        prop_assert_eq!(parse_bool(&raw).ok(), expected);
    }
}
