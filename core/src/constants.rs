//! constants.rs
//! Wire constants and unit scale factors shared by the encoder and the packer.

/// Command opcode identifiers (mirrored by the executor).
pub mod cmd_ids {
    pub const EXIT: u8            = 0x00;
    pub const SLEEP: u8           = 0x01;
    pub const BARRIER: u8         = 0x02;
    pub const SEED: u8            = 0x03;
    pub const TIMESTEP: u8        = 0x04;
    pub const RUN: u8             = 0x05;
    pub const NUM: u8             = 0x06;

    pub const RECORD: u8          = 0x10;
    pub const RECORD_INTERVAL: u8 = 0x11;

    pub const PROBABILITY: u8     = 0x20;
    pub const BURST_PERIOD: u8    = 0x21;
    pub const BURST_DUTY: u8      = 0x22;
    pub const BURST_PHASE: u8     = 0x23;
    pub const SOURCE_KEY: u8      = 0x24;
    pub const PAYLOAD: u8         = 0x25;
    pub const NO_PAYLOAD: u8      = 0x26;

    pub const CONSUME: u8         = 0x30;
    pub const NO_CONSUME: u8      = 0x31;
    pub const SINK_KEY: u8        = 0x32;
}

/// Bits 8..16 of a command word carry the channel index.
pub const CHANNEL_SHIFT: u32 = 8;

/// Largest channel index that fits the command word bitfield.
pub const MAX_CHANNEL_INDEX: usize = 0xFF;

/// Largest number of sources (or sinks) the `NUM` operand can describe.
pub const MAX_CHANNELS: usize = 0xFF;

/// Sink count occupies bits 8..16 of the `NUM` operand.
pub const NUM_SINKS_SHIFT: u32 = 8;

/// Only the top 24 bits of a routing key are configurable.
pub const KEY_MASK: u32 = !0xFF;

/// Encoded probability for "always generate".
pub const PROBABILITY_ALWAYS: u32 = 0xFFFF_FFFF;

/// 2^32, the fixed-point scale of an encoded probability.
pub const PROBABILITY_SCALE: f64 = 4_294_967_296.0;

/// Seconds to microseconds (sleep operand).
pub const US_PER_SEC: f64 = 1e6;

/// Seconds to nanoseconds (timestep operand).
pub const NS_PER_SEC: f64 = 1e9;

/// Every word on the wire, including the length prefix, is 4 bytes.
pub const WORD_LEN: usize = 4;

/// Length prefix size in bytes.
pub const LENGTH_PREFIX_LEN: usize = 4;
