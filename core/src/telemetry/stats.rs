//! telemetry/stats.rs
//! Counts collected while a session builds its command stream.
//!
//! Summary: how many commands went out, how many the change check saved and
//! how often a timestep change forced dependent values to be re-emitted.

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderStats {
    /// Command words emitted (operands not included).
    pub commands_emitted: u64,
    /// Diffed commands skipped because their effective value was unchanged.
    pub commands_suppressed: u64,
    /// Dependent setters re-run after a timestep change.
    pub rederivations: u64,
    /// Total words in the stream (commands + operands).
    pub words: u64,
}

impl EncoderStats {
    pub fn add_command(&mut self, words: usize) {
        self.commands_emitted += 1;
        self.words += words as u64;
    }

    pub fn add_suppressed(&mut self) {
        self.commands_suppressed += 1;
    }

    pub fn add_rederivation(&mut self) {
        self.rederivations += 1;
    }
}
