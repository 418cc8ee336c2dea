//! Session - the owner of everything the sequencer plays
//!
//! Holds the scale, tracks, master gate, resolution and tempo. Every mutator
//! rebuilds the playback grid in full before returning, and stores it as a
//! fresh `Rc`, so a transport pass holding the previous grid keeps a
//! consistent snapshot.

use std::rc::Rc;

use log::debug;

use super::gate::{Gate, GateField};
use super::grid::{compile_grid, degree_matrix, CellState, PlaybackGrid};
use super::input::{clamp_bpm, clamp_resolution, DEFAULT_BPM};
use super::track::{Track, TrackField, TrackId};
use crate::theory::scale::{Mode, Scale, SCALE_DEGREES};
use crate::transport::scheduler::TickSource;

/// Resolution a new session starts with.
pub const INITIAL_RESOLUTION: usize = 32;

pub struct Session {
    scale: Scale,
    tracks: Vec<Track>,
    master: Gate,
    resolution: usize,
    bpm: f64,
    grid: Rc<PlaybackGrid>,
    next_id: u64,
}

impl Session {
    /// C Ionian at 120 BPM, 32 ticks, master gate 2-of-4, with two starter
    /// tracks: the root every 4 ticks and the third every 3 ticks from tick 1.
    pub fn new() -> Self {
        let mut session = Self::empty(Scale::default());
        session.tracks.push(Track::new(TrackId(1)).with_period(4));
        session.tracks.push(
            Track::new(TrackId(2))
                .with_degree(3)
                .with_period(3)
                .with_offset(1),
        );
        session.next_id = 3;
        session.rebuild();
        session
    }

    /// A session with no tracks.
    pub fn empty(scale: Scale) -> Self {
        let mut session = Self {
            scale,
            tracks: Vec::new(),
            master: Gate::new(2, 4, 0),
            resolution: INITIAL_RESOLUTION,
            bpm: DEFAULT_BPM as f64,
            grid: Rc::new(PlaybackGrid::default()),
            next_id: 1,
        };
        session.rebuild();
        session
    }

    /* ----- reads ----- */

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn master_gate(&self) -> Gate {
        self.master
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Current grid. Cheap to clone; never changes after it is built.
    pub fn playback_grid(&self) -> Rc<PlaybackGrid> {
        Rc::clone(&self.grid)
    }

    /// Degree × tick display matrix for the current state.
    pub fn matrix(&self) -> Vec<Vec<CellState>> {
        degree_matrix(self.resolution, &self.master, &self.tracks, SCALE_DEGREES)
    }

    /* ----- mutators ----- */

    /// Append a track with default settings and return its id.
    pub fn add_track(&mut self) -> TrackId {
        let id = TrackId(self.next_id);
        self.next_id += 1;
        self.tracks.push(Track::new(id));
        self.rebuild();
        id
    }

    /// Remove a track. Returns false if no track has `id`.
    pub fn remove_track(&mut self, id: TrackId) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != id);
        let removed = self.tracks.len() != before;
        if removed {
            self.rebuild();
        }
        removed
    }

    /// Change one field of one track. Returns false if no track has `id`.
    pub fn update_track(&mut self, id: TrackId, field: TrackField) -> bool {
        let Some(track) = self.tracks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        track.apply(field);
        self.rebuild();
        true
    }

    /// Set the tempo. Non-positive or non-finite values fall back to 120;
    /// others are held to 1..=999.
    pub fn set_bpm(&mut self, bpm: f64) {
        self.bpm = clamp_bpm(bpm);
    }

    /// Set the cycle length. Zero falls back to 16; longer than 1024 is capped.
    pub fn set_resolution(&mut self, resolution: usize) {
        self.resolution = clamp_resolution(resolution);
        self.rebuild();
    }

    pub fn set_master_gate(&mut self, gate: Gate) {
        self.master = gate;
        self.rebuild();
    }

    pub fn set_master_field(&mut self, field: GateField, value: u32) {
        self.master.set(field, value);
        self.rebuild();
    }

    pub fn set_scale(&mut self, scale: Scale) {
        self.scale = scale;
        self.rebuild();
    }

    pub fn set_root(&mut self, root: u8) {
        self.set_scale(self.scale.with_root(root));
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.set_scale(self.scale.with_mode(mode));
    }

    fn rebuild(&mut self) {
        let grid = compile_grid(
            self.resolution,
            &self.master,
            &self.tracks,
            self.scale.midi_notes(),
        );
        debug!(
            "session grid rebuilt for {} ({} tracks)",
            self.scale.describe(),
            self.tracks.len()
        );
        self.grid = Rc::new(grid);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for Session {
    fn bpm(&self) -> f64 {
        self.bpm
    }

    fn grid(&self) -> Rc<PlaybackGrid> {
        self.playback_grid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_two_tracks() {
        let session = Session::new();
        assert_eq!(session.tracks().len(), 2);
        assert_eq!(session.resolution(), 32);
        assert_eq!(session.master_gate(), Gate::new(2, 4, 0));
        assert_eq!(session.bpm(), 120.0);
        assert_eq!(session.grid().len(), 32);

        // root every 4 ticks, master open at 0: tick 0 has C4
        assert!((session.grid().tick(0)[0] - 261.626).abs() < 0.01);
    }

    #[test]
    fn add_and_remove_rebuild_the_grid() {
        let mut session = Session::empty(Scale::default());
        assert_eq!(session.grid().event_count(), 0);

        let id = session.add_track();
        // default track fires every tick; master (2,4,0) leaves 16 of 32 open
        assert_eq!(session.grid().event_count(), 16);

        assert!(session.remove_track(id));
        assert!(!session.remove_track(id));
        assert_eq!(session.grid().event_count(), 0);
    }

    #[test]
    fn track_ids_are_never_reused() {
        let mut session = Session::new();
        let a = session.add_track();
        session.remove_track(a);
        let b = session.add_track();
        assert_ne!(a, b);
    }

    #[test]
    fn update_changes_one_field() {
        let mut session = Session::empty(Scale::default());
        session.set_master_gate(Gate::ALWAYS_OPEN);
        let id = session.add_track();
        assert!(session.update_track(id, TrackField::Period(8)));
        assert!(session.update_track(id, TrackField::Degree(5)));

        let grid = session.grid();
        assert_eq!(grid.event_count(), 4);
        assert!((grid.tick(8)[0] - 391.995).abs() < 0.01);
        assert!(!session.update_track(TrackId(999), TrackField::Period(2)));
    }

    #[test]
    fn grid_is_replaced_not_mutated() {
        let mut session = Session::new();
        let before = session.grid();
        session.set_resolution(8);
        let after = session.grid();
        assert_eq!(before.len(), 32);
        assert_eq!(after.len(), 8);
        assert!(!Rc::ptr_eq(&before, &after));
    }

    #[test]
    fn scale_change_moves_pitches() {
        let mut session = Session::new();
        session.set_root(9);
        assert!((session.grid().tick(0)[0] - 440.0).abs() < 1e-3);
        session.set_mode(Mode::Aeolian);
        assert_eq!(session.scale().mode(), Mode::Aeolian);
    }

    #[test]
    fn master_field_edit() {
        let mut session = Session::new();
        session.set_master_field(GateField::On, 4);
        assert_eq!(session.master_gate(), Gate::new(4, 4, 0));
        assert!(session.matrix().iter().flatten().all(|c| *c != CellState::MasterOff));
    }

    #[test]
    fn invalid_tempo_and_resolution_fall_back() {
        let mut session = Session::new();
        session.set_bpm(0.0);
        assert_eq!(session.bpm(), 120.0);
        session.set_bpm(f64::NAN);
        assert_eq!(session.bpm(), 120.0);
        session.set_resolution(0);
        assert_eq!(session.resolution(), 16);
    }

    #[test]
    fn extreme_tempo_and_resolution_are_capped() {
        let mut session = Session::new();
        session.set_bpm(1.0e7);
        assert_eq!(session.bpm(), 999.0);
        session.set_bpm(0.25);
        assert_eq!(session.bpm(), 1.0);
        session.set_resolution(4_000_000_000);
        assert_eq!(session.resolution(), 1024);
        assert_eq!(session.playback_grid().len(), 1024);
    }
}
