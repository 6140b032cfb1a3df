//! encoder/state.rs
//! Last-emitted values, one field per configurable aspect.
//!
//! Each setter compares its input against these fields and only emits on a
//! difference. The `*_stale` flags force the next comparison to fail, which is
//! how a timestep change re-emits values expressed in ticks.

use crate::counters::Counters;

/// Per-source generator parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceState {
    pub probability: f64,
    /// Low 8 bits always zero.
    pub key: u32,
    pub payload_enabled: bool,
}

/// Per-sink parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SinkState {
    /// Low 8 bits always zero.
    pub key: u32,
}

/// Source and sink tables, sized once by `set_channel_counts`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Channels {
    pub sources: Vec<SourceState>,
    pub sinks: Vec<SinkState>,
}

impl Channels {
    pub fn new(num_sources: usize, num_sinks: usize) -> Self {
        Self {
            sources: vec![SourceState::default(); num_sources],
            sinks: vec![SinkState::default(); num_sinks],
        }
    }
}

/// Burst generator parameters. A zero period disables bursting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BurstState {
    /// Seconds.
    pub period: f64,
    /// Fraction of the period spent generating.
    pub duty: f64,
    /// Fraction of the period to start at.
    pub phase: f64,
    /// `phase` was drawn at random rather than supplied.
    pub phase_random: bool,

    pub period_stale: bool,
    pub duty_stale: bool,
    pub phase_stale: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub exited: bool,
    /// The last seed command carried a randomly drawn value.
    pub seeded_randomly: bool,
    /// Seconds; `None` until first set.
    pub timestep: Option<f64>,
    pub record_mask: Counters,
    /// Seconds; zero records only at the start and end of a run.
    pub record_interval: f64,
    pub record_interval_stale: bool,
    /// `None` until `set_channel_counts`.
    pub channels: Option<Channels>,
    pub consume_enabled: bool,
    pub burst: BurstState,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            exited: false,
            seeded_randomly: false,
            timestep: None,
            record_mask: Counters::empty(),
            record_interval: 0.0,
            record_interval_stale: false,
            channels: None,
            consume_enabled: true,
            burst: BurstState::default(),
        }
    }
}

impl SessionState {
    pub fn num_sources(&self) -> Option<usize> {
        self.channels.as_ref().map(|c| c.sources.len())
    }

    pub fn num_sinks(&self) -> Option<usize> {
        self.channels.as_ref().map(|c| c.sinks.len())
    }
}

/// Store `value` in `slot` and report whether it differed.
#[inline]
pub(crate) fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
