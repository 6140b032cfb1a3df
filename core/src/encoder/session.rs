//! encoder/session.rs
//!
//! `Commands`: the session state machine that turns configuration calls into
//! command words.
//!
//! Design notes:
//! - Each setter converts units, compares against the last emitted value and
//!   appends words only on change. Sleep, barrier, run and explicit seeds are
//!   never diffed.
//! - A timestep change re-runs the record-interval and burst setters with
//!   their stored seconds after marking them stale, since their operands are
//!   tick counts.
//! - Every public call is a transaction: on error the words, state and stats
//!   are restored to what they were before the call.

use byteorder::{BigEndian, LittleEndian};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::{EncoderConfig, WireOrder};
use crate::constants::{KEY_MASK, MAX_CHANNELS, NUM_SINKS_SHIFT};
use crate::counters::Counters;
use crate::encoder::convert::{probability_to_fixed, seconds_to_ns, seconds_to_ticks, seconds_to_us};
use crate::encoder::state::{replace_if_changed, Channels, SessionState, SinkState, SourceState};
use crate::opcodes::{command_word, Opcode};
use crate::stream;
use crate::telemetry::EncoderStats;
use crate::types::{CommandError, Result};
use crate::utils::{describe_word, fmt_words};

/// Where a burst phase comes from.
#[derive(Debug, Clone, Copy)]
enum PhaseInput {
    Fixed(f64),
    /// Draw a fresh fraction in [0, 1); always emitted.
    Random,
    /// Re-emit the stored phase, keeping its random/fixed origin.
    Retain,
}

/// A command stream under construction.
pub struct Commands {
    words: Vec<u32>,
    state: SessionState,
    stats: EncoderStats,
    rng: StdRng,
    config: EncoderConfig,
}

impl Default for Commands {
    fn default() -> Self {
        Self::new()
    }
}

impl Commands {
    pub fn new() -> Self {
        Self::with_config(EncoderConfig::default())
    }

    pub fn with_config(config: EncoderConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            words: Vec::new(),
            state: SessionState::default(),
            stats: EncoderStats::default(),
            rng,
            config,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Command and operand words emitted so far.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn into_words(self) -> Vec<u32> {
        self.words
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn stats(&self) -> EncoderStats {
        self.stats.clone()
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn is_terminated(&self) -> bool {
        self.state.exited
    }

    pub fn timestep(&self) -> Option<f64> {
        self.state.timestep
    }

    /// Payload bytes: 4 per word, length prefix excluded.
    pub fn size(&self) -> usize {
        stream::payload_len(&self.words)
    }

    /// Bytes `pack()` will return, length prefix included.
    pub fn packed_len(&self) -> usize {
        stream::packed_len(&self.words)
    }

    /// Render the stream in the configured byte order.
    pub fn pack(&self) -> Result<Vec<u8>> {
        if self.config.require_terminated() && !self.state.exited {
            return Err(CommandError::PreconditionUnmet {
                op: "pack",
                requires: "a terminated session",
            });
        }
        let bytes = match self.config.byte_order() {
            WireOrder::Little => stream::pack_with::<LittleEndian>(&self.words),
            WireOrder::Big => stream::pack_with::<BigEndian>(&self.words),
        };
        log::debug!("packed {} words into {} bytes", self.words.len(), bytes.len());
        Ok(bytes)
    }

    // -------------------------------------------------------------------------
    // Unconditional commands
    // -------------------------------------------------------------------------

    /// Stop the executor. No further calls are accepted afterwards.
    pub fn terminate(&mut self) -> Result<()> {
        self.transaction("terminate", |s| {
            s.emit(Opcode::Exit, 0, None)?;
            s.state.exited = true;
            Ok(())
        })
    }

    /// Sleep for `seconds`, truncated to whole microseconds.
    pub fn sleep(&mut self, seconds: f64) -> Result<()> {
        self.transaction("sleep", |s| {
            let us = seconds_to_us("sleep", seconds)?;
            s.emit(Opcode::Sleep, 0, Some(us))
        })
    }

    /// Wait at the executor's synchronisation barrier.
    pub fn barrier(&mut self) -> Result<()> {
        self.transaction("barrier", |s| s.emit(Opcode::Barrier, 0, None))
    }

    /// Seed the executor's random number generator.
    ///
    /// `None` seeds with a random value, unless the last seed was itself random
    /// in which case nothing is emitted. An explicit seed is always emitted.
    pub fn seed(&mut self, seed: Option<u32>) -> Result<()> {
        self.transaction("seed", |s| match seed {
            None if s.state.seeded_randomly => {
                s.stats.add_suppressed();
                Ok(())
            }
            None => {
                let value: u32 = s.rng.gen();
                s.state.seeded_randomly = true;
                s.emit(Opcode::Seed, 0, Some(value))
            }
            Some(value) => {
                s.state.seeded_randomly = false;
                s.emit(Opcode::Seed, 0, Some(value))
            }
        })
    }

    /// Generate traffic for `seconds`, rounded to whole ticks.
    pub fn run(&mut self, seconds: f64) -> Result<()> {
        self.transaction("run", |s| {
            let ticks = s.ticks("run", seconds)?;
            s.emit(Opcode::Run, 0, Some(ticks))
        })
    }

    // -------------------------------------------------------------------------
    // Session-wide parameters
    // -------------------------------------------------------------------------

    /// Set the tick length and re-emit every value expressed in ticks.
    pub fn set_timestep(&mut self, seconds: f64) -> Result<()> {
        self.transaction("set_timestep", |s| s.apply_timestep(seconds))
    }

    /// Size the source and sink tables. Allowed once per session.
    pub fn set_channel_counts(&mut self, num_sources: usize, num_sinks: usize) -> Result<()> {
        self.transaction("set_channel_counts", |s| {
            if s.state.channels.is_some() {
                return Err(CommandError::AlreadyConfigured { what: "channel counts" });
            }
            if num_sources > MAX_CHANNELS {
                return Err(CommandError::OutOfRange {
                    what: "source count",
                    index: num_sources,
                    limit: MAX_CHANNELS + 1,
                });
            }
            if num_sinks > MAX_CHANNELS {
                return Err(CommandError::OutOfRange {
                    what: "sink count",
                    index: num_sinks,
                    limit: MAX_CHANNELS + 1,
                });
            }

            log::debug!("configuring {} sources and {} sinks", num_sources, num_sinks);
            s.state.channels = Some(Channels::new(num_sources, num_sinks));

            let operand = num_sources as u32 | ((num_sinks as u32) << NUM_SINKS_SHIFT);
            s.emit(Opcode::Num, 0, Some(operand))
        })
    }

    /// Select the recorded counters by name (case-insensitive).
    pub fn set_recorded_counters<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.transaction("set_recorded_counters", |s| {
            let counters = Counters::from_counter_names(names)?;
            s.apply_recorded(counters)
        })
    }

    /// Typed form of [`Commands::set_recorded_counters`].
    pub fn set_recorded(&mut self, counters: Counters) -> Result<()> {
        self.transaction("set_recorded", |s| s.apply_recorded(counters))
    }

    /// Seconds between counter recordings; zero records only at start and end.
    pub fn set_record_interval(&mut self, seconds: f64) -> Result<()> {
        self.transaction("set_record_interval", |s| s.apply_record_interval(seconds))
    }

    /// Whether sinks consume packets or leave them in the network.
    pub fn set_consume(&mut self, enabled: bool) -> Result<()> {
        self.transaction("set_consume", |s| {
            if !replace_if_changed(&mut s.state.consume_enabled, enabled) {
                s.stats.add_suppressed();
                return Ok(());
            }
            let opcode = if enabled { Opcode::Consume } else { Opcode::NoConsume };
            s.emit(opcode, 0, None)
        })
    }

    /// Configure bursting: `period` seconds, generating for `duty` of each
    /// period and starting `phase` of the way in. A zero period disables
    /// bursting; a `None` phase picks a fresh random one on every call.
    pub fn set_burst(&mut self, period: f64, duty: f64, phase: Option<f64>) -> Result<()> {
        let phase = match phase {
            Some(fraction) => PhaseInput::Fixed(fraction),
            None => PhaseInput::Random,
        };
        self.transaction("set_burst", |s| s.apply_burst(period, duty, phase))
    }

    // -------------------------------------------------------------------------
    // Per-channel parameters
    // -------------------------------------------------------------------------

    /// Probability that `source` generates a packet each tick.
    pub fn set_probability(&mut self, source: usize, probability: f64) -> Result<()> {
        self.transaction("set_probability", |s| {
            let slot = &mut s.source_mut("set_probability", source)?.probability;
            let operand = probability_to_fixed(probability)?;
            if !replace_if_changed(slot, probability) {
                s.stats.add_suppressed();
                return Ok(());
            }
            s.emit(Opcode::Probability, source, Some(operand))
        })
    }

    /// Routing key of `source`. The low 8 bits are ignored.
    pub fn set_source_key(&mut self, source: usize, key: u32) -> Result<()> {
        self.transaction("set_source_key", |s| {
            let key = key & KEY_MASK;
            let slot = &mut s.source_mut("set_source_key", source)?.key;
            if !replace_if_changed(slot, key) {
                s.stats.add_suppressed();
                return Ok(());
            }
            s.emit(Opcode::SourceKey, source, Some(key))
        })
    }

    /// Whether packets generated by `source` carry a payload word.
    pub fn set_payload_enabled(&mut self, source: usize, enabled: bool) -> Result<()> {
        self.transaction("set_payload_enabled", |s| {
            let slot = &mut s.source_mut("set_payload_enabled", source)?.payload_enabled;
            if !replace_if_changed(slot, enabled) {
                s.stats.add_suppressed();
                return Ok(());
            }
            let opcode = if enabled { Opcode::Payload } else { Opcode::NoPayload };
            s.emit(opcode, source, None)
        })
    }

    /// Routing key `sink` accepts. The low 8 bits are ignored.
    pub fn set_sink_key(&mut self, sink: usize, key: u32) -> Result<()> {
        self.transaction("set_sink_key", |s| {
            let key = key & KEY_MASK;
            let slot = &mut s.sink_mut("set_sink_key", sink)?.key;
            if !replace_if_changed(slot, key) {
                s.stats.add_suppressed();
                return Ok(());
            }
            s.emit(Opcode::SinkKey, sink, Some(key))
        })
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Run `f` against the session, undoing every change it made if it fails.
    fn transaction<F>(&mut self, op: &'static str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        if self.state.exited {
            log::warn!("{} rejected: session already terminated", op);
            return Err(CommandError::SessionClosed);
        }

        let state = self.state.clone();
        let stats = self.stats.clone();
        let len = self.words.len();

        let result = f(self);
        if let Err(ref e) = result {
            log::debug!("{} failed, discarding {}: {}", op, fmt_words(&self.words[len..]), e);
            self.state = state;
            self.stats = stats;
            self.words.truncate(len);
        }
        result
    }

    fn emit(&mut self, opcode: Opcode, channel: usize, operand: Option<u32>) -> Result<()> {
        debug_assert_eq!(opcode.arity().operand_words(), operand.is_some() as usize);

        let word = command_word(opcode, channel)?;
        self.words.push(word);
        if let Some(value) = operand {
            self.words.push(value);
        }
        self.stats.add_command(1 + operand.is_some() as usize);

        match operand {
            Some(value) => log::trace!("emit {} {}", describe_word(word), value),
            None => log::trace!("emit {}", describe_word(word)),
        }
        Ok(())
    }

    fn ticks(&self, op: &'static str, seconds: f64) -> Result<u32> {
        let timestep = self
            .state
            .timestep
            .ok_or(CommandError::PreconditionUnmet { op, requires: "a timestep" })?;
        seconds_to_ticks(op, seconds, timestep)
    }

    fn source_mut(&mut self, op: &'static str, index: usize) -> Result<&mut SourceState> {
        let channels = self
            .state
            .channels
            .as_mut()
            .ok_or(CommandError::PreconditionUnmet { op, requires: "channel counts" })?;
        let limit = channels.sources.len();
        channels
            .sources
            .get_mut(index)
            .ok_or(CommandError::OutOfRange { what: "source index", index, limit })
    }

    fn sink_mut(&mut self, op: &'static str, index: usize) -> Result<&mut SinkState> {
        let channels = self
            .state
            .channels
            .as_mut()
            .ok_or(CommandError::PreconditionUnmet { op, requires: "channel counts" })?;
        let limit = channels.sinks.len();
        channels
            .sinks
            .get_mut(index)
            .ok_or(CommandError::OutOfRange { what: "sink index", index, limit })
    }

    fn apply_timestep(&mut self, seconds: f64) -> Result<()> {
        if self.state.timestep == Some(seconds) {
            self.stats.add_suppressed();
            return Ok(());
        }
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(CommandError::InvalidValue { what: "timestep", value: seconds });
        }

        let ns = seconds_to_ns("set_timestep", seconds)?;
        self.state.timestep = Some(seconds);
        self.emit(Opcode::Timestep, 0, Some(ns))?;

        self.rederive_tick_values()
    }

    /// Re-emit the record interval and burst parameters against the new
    /// timestep. Only non-zero (enabled) values are re-emitted.
    fn rederive_tick_values(&mut self) -> Result<()> {
        let interval = self.state.record_interval;
        if interval != 0.0 {
            log::debug!("timestep changed, re-deriving record interval {}s", interval);
            self.state.record_interval_stale = true;
            self.stats.add_rederivation();
            self.apply_record_interval(interval)?;
        }

        let burst = self.state.burst.clone();
        if burst.period != 0.0 {
            log::debug!("timestep changed, re-deriving burst period {}s", burst.period);
            self.state.burst.period_stale = true;
            self.stats.add_rederivation();
            let phase = if burst.phase_random {
                PhaseInput::Retain
            } else {
                PhaseInput::Fixed(burst.phase)
            };
            self.apply_burst(burst.period, burst.duty, phase)?;
        }

        Ok(())
    }

    fn apply_recorded(&mut self, counters: Counters) -> Result<()> {
        if !replace_if_changed(&mut self.state.record_mask, counters) {
            self.stats.add_suppressed();
            return Ok(());
        }
        self.emit(Opcode::Record, 0, Some(counters.bits()))
    }

    fn apply_record_interval(&mut self, seconds: f64) -> Result<()> {
        if !self.state.record_interval_stale && self.state.record_interval == seconds {
            self.stats.add_suppressed();
            return Ok(());
        }

        let ticks = self.ticks("set_record_interval", seconds)?;
        self.state.record_interval = seconds;
        self.state.record_interval_stale = false;
        self.emit(Opcode::RecordInterval, 0, Some(ticks))
    }

    fn apply_burst(&mut self, period: f64, duty: f64, phase: PhaseInput) -> Result<()> {
        // Duty and phase are fractions of the period, so a new period
        // invalidates both even when the fractions are unchanged.
        if self.state.burst.period_stale || self.state.burst.period != period {
            let ticks = self.ticks("set_burst", period)?;
            let burst = &mut self.state.burst;
            burst.period = period;
            burst.period_stale = false;
            burst.duty_stale = true;
            burst.phase_stale = true;
            self.emit(Opcode::BurstPeriod, 0, Some(ticks))?;
        } else {
            self.stats.add_suppressed();
        }

        // Bursting disabled: duty and phase mean nothing until a period is set.
        if period == 0.0 {
            return Ok(());
        }

        if self.state.burst.duty_stale || self.state.burst.duty != duty {
            let ticks = self.ticks("set_burst", period * duty)?;
            let burst = &mut self.state.burst;
            burst.duty = duty;
            burst.duty_stale = false;
            self.emit(Opcode::BurstDuty, 0, Some(ticks))?;
        } else {
            self.stats.add_suppressed();
        }

        let (fraction, random) = match phase {
            PhaseInput::Fixed(fraction) => (fraction, false),
            PhaseInput::Random => (self.rng.gen::<f64>(), true),
            PhaseInput::Retain => (self.state.burst.phase, self.state.burst.phase_random),
        };

        let current = &self.state.burst;
        let changed = random
            || current.phase_stale
            || current.phase_random
            || current.phase != fraction;
        if !changed {
            self.stats.add_suppressed();
            return Ok(());
        }

        let ticks = self.ticks("set_burst", period * fraction)?;
        let burst = &mut self.state.burst;
        burst.phase = fraction;
        burst.phase_random = random;
        burst.phase_stale = false;
        self.emit(Opcode::BurstPhase, 0, Some(ticks))
    }
}
