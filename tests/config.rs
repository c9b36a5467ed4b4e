//! Integration tests for configuration types.

use anyhow::Result;
use raiigraph::{Config, RngKind};

#[test]
fn config_default_values() {
    let config = Config::default();
    assert_eq!(config.default_seed, 42);
    assert_eq!(config.rng_kind, RngKind::Std);
}

#[test]
fn rng_kind_from_str() {
    assert_eq!("std".parse::<RngKind>(), Ok(RngKind::Std));
    assert_eq!("ChaCha20".parse::<RngKind>(), Ok(RngKind::ChaCha20));
    let err = "mt19937".parse::<RngKind>().unwrap_err();
    assert!(err.contains("Unknown RNG kind"));
}

#[test]
fn rng_kind_names() {
    assert_eq!(RngKind::Std.name(), "std");
    assert_eq!(RngKind::ChaCha20.name(), "chacha20");
}

#[test]
fn config_serde_round_trip() -> Result<()> {
    let config = Config::new(7, RngKind::ChaCha20);
    let json = serde_json::to_string(&config)?;
    assert_eq!(json, r#"{"default_seed":7,"rng_kind":"chacha20"}"#);
    let back: Config = serde_json::from_str(&json)?;
    assert_eq!(back, config);
    Ok(())
}

#[test]
fn config_missing_fields_use_defaults() -> Result<()> {
    let config: Config = serde_json::from_str(r#"{"rng_kind":"std"}"#)?;
    assert_eq!(config, Config::default());
    Ok(())
}
