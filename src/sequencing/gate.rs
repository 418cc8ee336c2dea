/*
Periodic Gates
==============

A gate is a repeating on/off mask over the tick grid, described by three
integers:

    on      how many positions of each period are open
    total   the period length
    offset  rotation applied before testing

    position = (tick + offset) mod total       (always non-negative)
    open     = position < on

Example: on=2, total=4, offset=0

    tick      0 1 2 3 4 5 6 7
    position  0 1 2 3 0 1 2 3
    open      ■ ■ · · ■ ■ · ·

Degenerate shapes are accepted rather than rejected:

  - total <= 0   the gate never closes (no filtering)
  - on >= total  every position satisfies `position < on`, so the gate never
                 closes either. This falls out of the comparison; it is not
                 clamped or special-cased.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Is `tick` inside the open part of the gate `(on, total, offset)`?
///
/// Defined for every integer tick; the modulo is Euclidean so negative sums
/// still land in `0..total`.
pub fn is_gate_open(tick: i64, on: i64, total: i64, offset: i64) -> bool {
    if total <= 0 {
        return true;
    }
    let position = (tick + offset).rem_euclid(total);
    position < on
}

/// A gate as stored on tracks and as the master gate.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gate {
    pub on: u32,
    pub total: u32,
    pub offset: u32,
}

impl Gate {
    /// A gate that is open on every tick.
    pub const ALWAYS_OPEN: Gate = Gate {
        on: 1,
        total: 1,
        offset: 0,
    };

    pub const fn new(on: u32, total: u32, offset: u32) -> Self {
        Self { on, total, offset }
    }

    /// Evaluate the gate at an absolute grid tick.
    #[inline]
    pub fn is_open(&self, tick: usize) -> bool {
        is_gate_open(
            tick as i64,
            self.on as i64,
            self.total as i64,
            self.offset as i64,
        )
    }

    /// Apply a single-field edit.
    pub fn set(&mut self, field: GateField, value: u32) {
        match field {
            GateField::On => self.on = value,
            GateField::Total => self.total = value,
            GateField::Offset => self.offset = value,
        }
    }

    pub fn get(&self, field: GateField) -> u32 {
        match field {
            GateField::On => self.on,
            GateField::Total => self.total,
            GateField::Offset => self.offset,
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Gate::ALWAYS_OPEN
    }
}

/// Names one of the three gate parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateField {
    On,
    Total,
    Offset,
}
