//! counters.rs
//! Counters the executor can record, as a bit set.
//!
//! Bits 0..16 are the router's per-event diagnostic counters. Bit 16 counts
//! packets the generator sent, bit 17 packets it could not send because the
//! router was blocked, and bit 24 packets the sinks received. The encoded
//! `RECORD` operand is the OR of the enabled bits.

use crate::types::{CommandError, Result};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Counters: u32 {
        const LOCAL_MULTICAST            = 1 << 0;
        const EXTERNAL_MULTICAST         = 1 << 1;
        const LOCAL_P2P                  = 1 << 2;
        const EXTERNAL_P2P               = 1 << 3;
        const LOCAL_NEAREST_NEIGHBOUR    = 1 << 4;
        const EXTERNAL_NEAREST_NEIGHBOUR = 1 << 5;
        const LOCAL_FIXED_ROUTE          = 1 << 6;
        const EXTERNAL_FIXED_ROUTE       = 1 << 7;
        const DROPPED_MULTICAST          = 1 << 8;
        const DROPPED_P2P                = 1 << 9;
        const DROPPED_NEAREST_NEIGHBOUR  = 1 << 10;
        const DROPPED_FIXED_ROUTE        = 1 << 11;
        const COUNTER12                  = 1 << 12;
        const COUNTER13                  = 1 << 13;
        const COUNTER14                  = 1 << 14;
        const COUNTER15                  = 1 << 15;

        const SENT                       = 1 << 16;
        const BLOCKED                    = 1 << 17;

        const RECEIVED                   = 1 << 24;
    }
}

impl Counters {
    /// Look up a single counter by name, case-insensitively
    /// (`"local_multicast"` and `"LOCAL_MULTICAST"` are the same counter).
    pub fn from_counter_name(name: &str) -> Result<Self> {
        Counters::all()
            .iter_names()
            .find(|(flag_name, _)| flag_name.eq_ignore_ascii_case(name))
            .map(|(_, flag)| flag)
            .ok_or_else(|| CommandError::UnknownCounter(name.to_string()))
    }

    /// OR together a list of counter names. An empty list records nothing.
    pub fn from_counter_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(Counters::empty(), |acc, name| {
            Ok(acc | Counters::from_counter_name(name.as_ref())?)
        })
    }

    /// Lower-case names of the enabled counters, in bit order.
    pub fn counter_names(&self) -> Vec<String> {
        self.iter_names().map(|(name, _)| name.to_ascii_lowercase()).collect()
    }
}
