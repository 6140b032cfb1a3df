//! config.rs
//! Encoder session configuration.
//!
//! Every field is optional; `None` resolves to the documented default so a
//! config deserialized from a partial JSON document behaves like `Default`.

use serde::{Deserialize, Serialize};

/// Byte order of the packed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireOrder {
    /// The executor's native order.
    #[default]
    Little,
    Big,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Seed for the session RNG used by `seed(None)` and random burst phases.
    /// - `None` → seeded from OS entropy (production default).
    /// - `Some(n)` → reproducible streams for tests.
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Byte order used by `Commands::pack`.
    #[serde(default)]
    pub byte_order: Option<WireOrder>,

    /// Refuse to pack a session that has not been terminated.
    #[serde(default)]
    pub require_terminated: Option<bool>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            rng_seed: None,
            byte_order: Some(WireOrder::Little),
            require_terminated: Some(false),
        }
    }
}

impl EncoderConfig {
    pub fn new(
        rng_seed: Option<u64>,
        byte_order: Option<WireOrder>,
        require_terminated: Option<bool>,
    ) -> Self {
        Self {
            rng_seed,
            byte_order: byte_order.or(Some(WireOrder::Little)),
            require_terminated: require_terminated.or(Some(false)),
        }
    }

    /// Deterministic config for tests and reproducible builds.
    pub fn seeded(seed: u64) -> Self {
        Self { rng_seed: Some(seed), ..Default::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn byte_order(&self) -> WireOrder {
        self.byte_order.unwrap_or_default()
    }

    pub fn require_terminated(&self) -> bool {
        self.require_terminated.unwrap_or(false)
    }
}
