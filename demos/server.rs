//! Server configuration example.
//!
//! Demonstrates tag-driven defaults, by-name overrides and required-field
//! validation on a small server config with a nested pool and an opaque
//! TLS handle.
//!
//! Run with:
//!   cargo run --example server
//!   RUST_LOG=fieldwise=trace cargo run --example server  # see each default land

use std::time::Duration;

use fieldwise::prelude::*;
use tracing_subscriber::EnvFilter;

/// TLS settings owned by another library; fieldwise never looks inside.
#[derive(Debug, Default)]
#[allow(dead_code)]
struct TlsConfig {
    cert_path: String,
}

#[derive(Debug, DeriveRecord)]
struct PoolConfig {
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
    pub tls: Option<TlsConfig>,
    pub pool: Option<PoolConfig>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Defaults Only ===\n");
    let mut server = Server::zero();
    match fieldwise::new(&mut server, []) {
        Ok(server) => println!("{:#?}\n", server),
        Err(e) => eprintln!("error: {}", e),
    }

    println!("=== With Overrides ===\n");
    let result = Initializer::<Server>::new()
        .with("address", "127.0.0.1")
        .with("max_conns", 200)
        .with(
            "tls",
            Value::any(Some(TlsConfig {
                cert_path: "/etc/ssl/server.pem".to_string(),
            })),
        )
        .build();
    match result {
        Ok(server) => println!("{:#?}\n", server),
        Err(e) => eprintln!("error: {}", e),
    }

    println!("=== Failing Override ===\n");
    let mut server = Server::zero();
    if let Err(e) = fieldwise::new(&mut server, [with("max_conn", 5)]) {
        println!("error: {}", e);
    }
    println!("defaults still applied: address = {:?}\n", server.address);

    println!("=== Required Field Cleared ===\n");
    let mut server = Server::zero();
    if let Err(e) = fieldwise::new(&mut server, [with("address", "")]) {
        println!("error: {}", e);
    }
}
