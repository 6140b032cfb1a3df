//! Wire format for finished command sequences.
//!
//! Responsibilities:
//! - Pack words behind a byte-length prefix
//! - Read packed streams back into words and commands
//!
//! Non-responsibilities:
//! - Deciding which commands to emit
//! - Transport to the executor

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{Command, StreamError};
pub use encode::{pack, pack_with, packed_len, payload_len};
pub use decode::{disassemble, unpack_words, unpack_words_with};
