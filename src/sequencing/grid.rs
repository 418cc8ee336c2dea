//! Track grid compilation
//!
//! Flattens tracks, the master gate and the current scale into one cycle of
//! per-tick frequency lists. The result is immutable; any change to an input
//! produces a brand-new grid.

use log::debug;

use super::gate::Gate;
use super::track::Track;
use crate::theory::midi_to_freq;

/// One cycle of ticks, each holding the frequencies (Hz) to sound.
///
/// Duplicates are kept: two tracks landing on the same pitch and tick are two
/// independent voices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackGrid {
    ticks: Vec<Vec<f32>>,
}

impl PlaybackGrid {
    pub fn from_ticks(ticks: Vec<Vec<f32>>) -> Self {
        Self { ticks }
    }

    /// Number of ticks in one cycle.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Frequencies at `tick`, empty when out of range.
    pub fn tick(&self, tick: usize) -> &[f32] {
        self.ticks.get(tick).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ticks(&self) -> &[Vec<f32>] {
        &self.ticks
    }

    /// Total number of tone events in one cycle.
    pub fn event_count(&self) -> usize {
        self.ticks.iter().map(Vec::len).sum()
    }
}

/// Build one cycle of the playback grid.
///
/// `scale_pitches` holds MIDI note numbers indexed by `degree - 1`. A track
/// whose degree falls outside the scale contributes nothing.
pub fn compile_grid(
    resolution: usize,
    master: &Gate,
    tracks: &[Track],
    scale_pitches: &[u8],
) -> PlaybackGrid {
    let ticks = (0..resolution)
        .map(|i| {
            if !master.is_open(i) {
                return Vec::new();
            }
            tracks
                .iter()
                .filter(|track| track.fires_at(i))
                .filter_map(|track| degree_pitch(scale_pitches, track.degree))
                .map(|pitch| midi_to_freq(pitch as f32))
                .collect()
        })
        .collect();

    let grid = PlaybackGrid { ticks };
    debug!(
        "compiled grid: {} ticks, {} tracks, {} events",
        resolution,
        tracks.len(),
        grid.event_count()
    );
    grid
}

fn degree_pitch(scale_pitches: &[u8], degree: u8) -> Option<u8> {
    let index = (degree as usize).checked_sub(1)?;
    scale_pitches.get(index).copied()
}

/// Display state of one cell of the degree × tick matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Master gate closed at this tick
    MasterOff,
    /// At least one track sounds this degree here
    On,
    Off,
}

/// Degree × tick activity matrix for display.
///
/// Row `d` is scale degree `d + 1`. Overlapping tracks on one cell collapse to
/// a single `On`.
pub fn degree_matrix(
    resolution: usize,
    master: &Gate,
    tracks: &[Track],
    degrees: usize,
) -> Vec<Vec<CellState>> {
    (1..=degrees)
        .map(|degree| {
            (0..resolution)
                .map(|i| {
                    if !master.is_open(i) {
                        CellState::MasterOff
                    } else if tracks
                        .iter()
                        .any(|t| t.degree as usize == degree && t.fires_at(i))
                    {
                        CellState::On
                    } else {
                        CellState::Off
                    }
                })
                .collect()
        })
        .collect()
}
