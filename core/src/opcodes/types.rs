//! opcodes/types.rs
//! Closed opcode registry and its arity rules.
//!
//! Notes:
//! - `#[repr(u8)]` keeps the discriminant equal to the wire value.
//! - Per-channel opcodes carry their channel ordinal in bits 8..16 of the word.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

use crate::constants::cmd_ids;

/// Command opcodes understood by the executor.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum Opcode {
    Exit           = cmd_ids::EXIT,
    Sleep          = cmd_ids::SLEEP,
    Barrier        = cmd_ids::BARRIER,
    Seed           = cmd_ids::SEED,
    Timestep       = cmd_ids::TIMESTEP,
    Run            = cmd_ids::RUN,
    Num            = cmd_ids::NUM,

    Record         = cmd_ids::RECORD,
    RecordInterval = cmd_ids::RECORD_INTERVAL,

    Probability    = cmd_ids::PROBABILITY,
    BurstPeriod    = cmd_ids::BURST_PERIOD,
    BurstDuty      = cmd_ids::BURST_DUTY,
    BurstPhase     = cmd_ids::BURST_PHASE,
    SourceKey      = cmd_ids::SOURCE_KEY,
    Payload        = cmd_ids::PAYLOAD,
    NoPayload      = cmd_ids::NO_PAYLOAD,

    Consume        = cmd_ids::CONSUME,
    NoConsume      = cmd_ids::NO_CONSUME,
    SinkKey        = cmd_ids::SINK_KEY,
}

/// Number of operand words trailing a command word.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Bare,
    OneOperand,
}

impl Arity {
    pub const fn operand_words(self) -> usize {
        match self {
            Arity::Bare => 0,
            Arity::OneOperand => 1,
        }
    }
}

impl Opcode {
    /// Every opcode, in wire-value order.
    pub const ALL: [Opcode; 19] = [
        Opcode::Exit,
        Opcode::Sleep,
        Opcode::Barrier,
        Opcode::Seed,
        Opcode::Timestep,
        Opcode::Run,
        Opcode::Num,
        Opcode::Record,
        Opcode::RecordInterval,
        Opcode::Probability,
        Opcode::BurstPeriod,
        Opcode::BurstDuty,
        Opcode::BurstPhase,
        Opcode::SourceKey,
        Opcode::Payload,
        Opcode::NoPayload,
        Opcode::Consume,
        Opcode::NoConsume,
        Opcode::SinkKey,
    ];

    pub const fn arity(self) -> Arity {
        match self {
            Opcode::Exit
            | Opcode::Barrier
            | Opcode::Payload
            | Opcode::NoPayload
            | Opcode::Consume
            | Opcode::NoConsume => Arity::Bare,
            _ => Arity::OneOperand,
        }
    }

    /// True for opcodes that encode a source or sink ordinal in the word.
    pub const fn is_per_channel(self) -> bool {
        matches!(
            self,
            Opcode::Probability
                | Opcode::SourceKey
                | Opcode::Payload
                | Opcode::NoPayload
                | Opcode::SinkKey
        )
    }

    pub fn verify(raw: u8) -> Result<(), OpcodeError> {
        Opcode::try_from(raw)
            .map(|_| ())
            .map_err(|_| OpcodeError::UnknownOpcode { raw })
    }

    #[inline(always)]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpcodeError {
    /// Low byte of a word is not in the registry.
    #[error("unknown opcode: 0x{raw:02x}")]
    UnknownOpcode { raw: u8 },

    /// Channel ordinal does not fit bits 8..16.
    #[error("channel index {channel} does not fit the 8-bit channel field")]
    ChannelOverflow { channel: usize },

    /// A channel was supplied to an opcode that has no channel field.
    #[error("opcode {opcode:?} does not take a channel index")]
    NotPerChannel { opcode: Opcode },
}
