//! opcodes/encode.rs
//!
//! Command word packing.
//!
//! Layout (u32):
//!
//! ```text
//! [ 31..16 unused (zero) ][ 15..8 channel ][ 7..0 opcode ]
//! ```

use crate::constants::{CHANNEL_SHIFT, MAX_CHANNEL_INDEX};
use crate::opcodes::types::{Opcode, OpcodeError};

/// Build the command word for `opcode`, placing `channel` in bits 8..16.
///
/// Global opcodes only accept channel 0. Channels above 255 are rejected
/// rather than wrapped into the opcode's neighbouring bits.
#[inline]
pub fn command_word(opcode: Opcode, channel: usize) -> Result<u32, OpcodeError> {
    if channel > MAX_CHANNEL_INDEX {
        return Err(OpcodeError::ChannelOverflow { channel });
    }
    if channel != 0 && !opcode.is_per_channel() {
        return Err(OpcodeError::NotPerChannel { opcode });
    }
    Ok(opcode.to_u8() as u32 | ((channel as u32) << CHANNEL_SHIFT))
}

/// Inverse of [`command_word`]: recover the opcode and channel ordinal.
#[inline]
pub fn split_word(word: u32) -> Result<(Opcode, u8), OpcodeError> {
    let raw = (word & 0xFF) as u8;
    let channel = ((word >> CHANNEL_SHIFT) & 0xFF) as u8;
    let opcode = Opcode::try_from(raw).map_err(|_| OpcodeError::UnknownOpcode { raw })?;
    Ok((opcode, channel))
}
