//! traffic-commands
//!
//! Compiles traffic-generator configuration calls into the length-prefixed
//! command stream run by the embedded executor.
//! No transport, no result decoding.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod config;

pub mod opcodes;
pub mod counters;
pub mod telemetry;

// Session + wire format
pub mod encoder;
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::{EncoderConfig, WireOrder};
    pub use crate::counters::Counters;
    pub use crate::encoder::Commands;
    pub use crate::opcodes::Opcode;
    pub use crate::stream::{disassemble, pack, unpack_words, Command};
    pub use crate::types::CommandError;
}
