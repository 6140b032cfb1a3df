use crate::constants::CHANNEL_SHIFT;
use crate::opcodes::Opcode;

/// Human-readable form of a command word, e.g. `Probability[3]` or `Sleep`.
///
/// Per-channel opcodes always carry their channel suffix, matching
/// `Command`'s `Display`. Bytes outside the registry are shown as hex, with
/// a suffix only when the channel byte is set.
pub fn describe_word(word: u32) -> String {
    let raw = (word & 0xFF) as u8;
    let channel = (word >> CHANNEL_SHIFT) & 0xFF;
    match Opcode::try_from(raw) {
        Ok(opcode) if opcode.is_per_channel() => format!("{:?}[{}]", opcode, channel),
        Ok(opcode) => format!("{:?}", opcode),
        Err(_) if channel != 0 => format!("0x{:x}[{}]", raw, channel),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// Hex dump of a word sequence, for logs.
pub fn fmt_words(words: &[u32]) -> String {
    let parts: Vec<String> = words.iter().map(|w| format!("0x{:08x}", w)).collect();
    format!("[{}]", parts.join(", "))
}
