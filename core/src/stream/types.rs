use std::fmt;
use thiserror::Error;

use crate::opcodes::{Opcode, OpcodeError};

/// One decoded command: opcode, channel ordinal and optional operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub opcode: Opcode,
    /// Zero for global opcodes.
    pub channel: u8,
    pub operand: Option<u32>,
}

impl Command {
    /// Number of words this command occupies on the wire.
    pub fn word_len(&self) -> usize {
        1 + self.opcode.arity().operand_words()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.opcode)?;
        if self.opcode.is_per_channel() {
            write!(f, "[{}]", self.channel)?;
        }
        if let Some(operand) = self.operand {
            write!(f, " {}", operand)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// Fewer bytes than the 4-byte length prefix.
    #[error("truncated stream")]
    Truncated,

    /// Length prefix is not a whole number of words.
    #[error("stream length {len} is not a multiple of 4")]
    UnalignedLength { len: usize },

    /// Length prefix disagrees with the bytes that follow it.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A one-operand opcode was the last word of the stream.
    #[error("opcode {opcode:?} is missing its operand")]
    MissingOperand { opcode: Opcode },

    #[error(transparent)]
    Opcode(#[from] OpcodeError),
}
