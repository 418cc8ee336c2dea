//! Track - one periodic pitch-triggering rule
//!
//! A track pulses every `period` ticks starting at `offset`, and each pulse is
//! further filtered by the track's own gate. When it fires it sounds one
//! degree of the current scale.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::gate::{Gate, GateField};

/// Stable identity for a track within a session.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u64);

/// A periodic rule bound to one scale degree
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pub id: TrackId,
    /// 1-indexed scale degree (1 = root)
    pub degree: u8,
    /// Ticks between pulses
    pub period: u32,
    /// Tick of the first pulse
    pub offset: u32,
    /// Activation gate, evaluated at the absolute grid tick
    pub gate: Gate,
}

impl Track {
    /// A new track with the defaults used by "add track": root degree,
    /// pulsing every tick, gate always open.
    pub fn new(id: TrackId) -> Self {
        Self {
            id,
            degree: 1,
            period: 1,
            offset: 0,
            gate: Gate::ALWAYS_OPEN,
        }
    }

    pub fn with_degree(mut self, degree: u8) -> Self {
        self.degree = degree;
        self
    }

    pub fn with_period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    /// Does this track fire at grid tick `tick`?
    ///
    /// Fires iff `tick >= offset`, `(tick - offset) % period == 0`, and the
    /// track gate is open at `tick` itself (not at the pulse count). A zero
    /// period never fires.
    pub fn fires_at(&self, tick: usize) -> bool {
        let offset = self.offset as usize;
        let period = self.period as usize;
        if period == 0 || tick < offset {
            return false;
        }
        (tick - offset) % period == 0 && self.gate.is_open(tick)
    }

    /// Apply a single-field edit.
    pub fn apply(&mut self, field: TrackField) {
        match field {
            TrackField::Degree(degree) => self.degree = degree,
            TrackField::Period(period) => self.period = period,
            TrackField::Offset(offset) => self.offset = offset,
            TrackField::Gate(which, value) => self.gate.set(which, value),
        }
    }
}

/// One editable field of a track, carrying its new value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackField {
    Degree(u8),
    Period(u32),
    Offset(u32),
    Gate(GateField, u32),
}
