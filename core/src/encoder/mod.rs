//! Session state machine.
//!
//! Responsibilities:
//! - Hold the last emitted value of every configurable aspect
//! - Convert seconds, fractions and probabilities into operands
//! - Emit commands only when their effective value changes
//! - Re-emit tick-valued parameters when the timestep changes
//!
//! Non-responsibilities:
//! - Wire framing (see `stream`)
//! - Interpreting what the executor does with the commands

pub mod convert;
pub mod state;
pub mod session;

pub use session::Commands;
pub use state::{BurstState, Channels, SessionState, SinkState, SourceState};
