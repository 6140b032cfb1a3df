use byteorder::{ByteOrder, LittleEndian};

use crate::constants::{LENGTH_PREFIX_LEN, WORD_LEN};
use crate::opcodes::{split_word, Arity};
use crate::stream::types::{Command, StreamError};

/// Read a packed stream back into its command words.
///
/// The buffer must hold exactly the prefix plus the number of bytes the
/// prefix announces.
pub fn unpack_words(buf: &[u8]) -> Result<Vec<u32>, StreamError> {
    unpack_words_with::<LittleEndian>(buf)
}

/// [`unpack_words`] with an explicit byte order.
pub fn unpack_words_with<B: ByteOrder>(buf: &[u8]) -> Result<Vec<u32>, StreamError> {
    if buf.len() < LENGTH_PREFIX_LEN {
        return Err(StreamError::Truncated);
    }

    let len = B::read_u32(&buf[..LENGTH_PREFIX_LEN]) as usize;
    if len % WORD_LEN != 0 {
        return Err(StreamError::UnalignedLength { len });
    }

    let body = &buf[LENGTH_PREFIX_LEN..];
    if body.len() != len {
        return Err(StreamError::LengthMismatch { expected: len, actual: body.len() });
    }

    let mut words = vec![0u32; len / WORD_LEN];
    B::read_u32_into(body, &mut words);
    Ok(words)
}

/// Split a word sequence into commands using each opcode's arity.
pub fn disassemble(words: &[u32]) -> Result<Vec<Command>, StreamError> {
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < words.len() {
        let (opcode, channel) = split_word(words[i])?;
        i += 1;

        let operand = match opcode.arity() {
            Arity::Bare => None,
            Arity::OneOperand => {
                let operand = *words.get(i).ok_or(StreamError::MissingOperand { opcode })?;
                i += 1;
                Some(operand)
            }
        };

        out.push(Command { opcode, channel, operand });
    }

    Ok(out)
}
