//! Opcode registry and command-word bitfield.
//!
//! Responsibilities:
//! - Define the closed opcode set and each opcode's arity
//! - Pack a channel ordinal into the command word
//!
//! Non-responsibilities:
//! - Unit conversion
//! - Change suppression
//! - Stream framing

pub mod types;
pub mod encode;

pub use types::{Arity, Opcode, OpcodeError};
pub use encode::{command_word, split_word};
