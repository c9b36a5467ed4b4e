use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::sys;

/// Generator family used for the library's random numbers.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RngKind {
    /// `rand`'s `StdRng`.
    #[default]
    Std,
    /// ChaCha20 stream, stable across `rand` releases.
    #[serde(rename = "chacha20")]
    ChaCha20,
}

impl RngKind {
    pub(crate) fn rng_type(self) -> &'static sys::igraph_rng_type_t {
        match self {
            RngKind::Std => &sys::igraph_rngtype_std,
            RngKind::ChaCha20 => &sys::igraph_rngtype_chacha20,
        }
    }

    pub fn name(self) -> &'static str {
        self.rng_type().name
    }
}

impl FromStr for RngKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "std" => Ok(RngKind::Std),
            "chacha20" | "chacha" => Ok(RngKind::ChaCha20),
            _ => Err(format!(
                "Unknown RNG kind: {}. Expected one of `std` or `chacha20`",
                s
            )),
        }
    }
}

/// Library-wide settings applied by [`initialize_with`](crate::initialize_with).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Seed of the built-in default generator.
    pub default_seed: u64,
    pub rng_kind: RngKind,
}

impl Config {
    pub fn new(default_seed: u64, rng_kind: RngKind) -> Self {
        Self {
            default_seed,
            rng_kind,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_seed: 42,
            rng_kind: RngKind::Std,
        }
    }
}
