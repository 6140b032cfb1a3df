use thiserror::Error;

use crate::opcodes::OpcodeError;

/// Usage errors raised by the encoder.
/// - Raised synchronously by the call that triggers them.
/// - The session is left exactly as it was before the failing call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// The session already emitted its terminating `EXIT`.
    #[error("session already terminated")]
    SessionClosed,

    /// A set-once parameter was set a second time.
    #[error("{what} already configured")]
    AlreadyConfigured { what: &'static str },

    /// A channel index or count outside its configured bound.
    #[error("{what} out of range: {index} (limit {limit})")]
    OutOfRange { what: &'static str, index: usize, limit: usize },

    /// An operation was called before something it depends on was set.
    #[error("{op} requires {requires}")]
    PreconditionUnmet { op: &'static str, requires: &'static str },

    /// A recording-set name outside the counter registry.
    #[error("unknown counter: {0:?}")]
    UnknownCounter(String),

    /// An input the executor cannot represent (NaN, negative, out of [0, 1]).
    #[error("invalid {what}: {value}")]
    InvalidValue { what: &'static str, value: f64 },

    /// A converted operand that does not fit a 32-bit word.
    #[error("{what} operand does not fit 32 bits: {value}")]
    OperandOverflow { what: &'static str, value: f64 },

    /// Command word could not be formed.
    #[error(transparent)]
    Opcode(#[from] OpcodeError),
}

pub type Result<T, E = CommandError> = std::result::Result<T, E>;
