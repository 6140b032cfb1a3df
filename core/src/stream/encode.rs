use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{LENGTH_PREFIX_LEN, WORD_LEN};

/// Bytes of command payload (the value of the length prefix).
#[inline]
pub fn payload_len(words: &[u32]) -> usize {
    words.len() * WORD_LEN
}

/// Bytes of the fully packed stream, prefix included.
#[inline]
pub fn packed_len(words: &[u32]) -> usize {
    LENGTH_PREFIX_LEN + payload_len(words)
}

/// Pack a command sequence into the executor's wire format.
///
/// Layout:
///
/// ```text
/// [ payload length in bytes (4) ]
/// [ word 0 (4) ]
/// [ word 1 (4) ]
/// ...
/// ```
pub fn pack(words: &[u32]) -> Vec<u8> {
    pack_with::<LittleEndian>(words)
}

/// [`pack`] with an explicit byte order.
pub fn pack_with<B: ByteOrder>(words: &[u32]) -> Vec<u8> {
    let mut out = vec![0u8; packed_len(words)];

    B::write_u32(&mut out[..LENGTH_PREFIX_LEN], payload_len(words) as u32);
    B::write_u32_into(words, &mut out[LENGTH_PREFIX_LEN..]);

    out
}

