//! App - interactive state and key handling

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{info, warn};
use ratatui::DefaultTerminal;
use std::time::Duration;

use saavy_theory::{
    sequencing::{
        time_signature::Meter,
        Gate, GateField, Groove, Session, TrackField, TrackId,
    },
    synth::{chord_preview, interval_preview, ToneSpec},
    theory::{
        relationship::{RelationshipSelector, Translation},
        tables::{ChordQuality, EXTENDED_CHORDS},
        Mode, Scale,
    },
    transport::{SystemClock, TickSource, Transport},
};

use super::output::AudioOutput;
use super::ui;

/// Which panel the transport keys drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sequencer,
    Groove,
}

/// Editor row: the master gate or one track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Master,
    Track(usize),
}

/// Editable field of the selected row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Degree,
    Period,
    Offset,
    GateOn,
    GateTotal,
    GateOffset,
}

impl Field {
    const TRACK: [Field; 6] = [
        Field::Degree,
        Field::Period,
        Field::Offset,
        Field::GateOn,
        Field::GateTotal,
        Field::GateOffset,
    ];
    const MASTER: [Field; 3] = [Field::GateOn, Field::GateTotal, Field::GateOffset];

    pub fn label(self) -> &'static str {
        match self {
            Field::Degree => "Degree",
            Field::Period => "Period",
            Field::Offset => "Offset",
            Field::GateOn => "Gate On",
            Field::GateTotal => "Gate Total",
            Field::GateOffset => "Gate Offset",
        }
    }

    fn gate_field(self) -> Option<GateField> {
        match self {
            Field::GateOn => Some(GateField::On),
            Field::GateTotal => Some(GateField::Total),
            Field::GateOffset => Some(GateField::Offset),
            _ => None,
        }
    }
}

/// Startup settings from the command line
pub struct Settings {
    pub bpm: f64,
    pub resolution: usize,
    pub scale: Scale,
    pub master: Gate,
    pub seed: i64,
}

pub struct App {
    pub session: Session,
    pub transport: Transport<SystemClock>,
    pub groove: Groove,
    pub groove_transport: Transport<SystemClock>,
    pub output: AudioOutput,
    pub meter: Meter,
    pub relationship: RelationshipSelector,
    pub chord_root: u8,
    pub chord_index: usize,
    pub interval: u8,
    pub focus: Focus,
    pub row: Row,
    pub field: Field,
    pub status: String,
    should_quit: bool,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let clock = SystemClock::new();
        let mut session = Session::new();
        session.set_scale(settings.scale);
        session.set_resolution(settings.resolution);
        session.set_bpm(settings.bpm);
        session.set_master_gate(settings.master);
        let mut groove = Groove::new();
        groove.set_seed(settings.seed);

        let mut app = Self {
            session,
            transport: Transport::new(clock),
            groove,
            groove_transport: Transport::new(clock).with_tone(ToneSpec::GROOVE),
            output: AudioOutput::new(),
            meter: Meter::default(),
            relationship: RelationshipSelector::default(),
            chord_root: 0,
            chord_index: 0,
            interval: 7,
            focus: Focus::Sequencer,
            row: Row::Track(0),
            field: Field::Degree,
            status: String::from("Press Space to play"),
            should_quit: false,
        };
        app.regenerate_groove();
        app
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.transport.poll(&self.session, &mut self.output);
            self.groove_transport.poll(&self.groove, &mut self.output);

            terminal.draw(|frame| ui::render(frame, self))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        self.transport.stop();
        self.groove_transport.stop();
        Ok(())
    }

    pub fn chord_quality(&self) -> &'static ChordQuality {
        &EXTENDED_CHORDS[self.chord_index % EXTENDED_CHORDS.len()]
    }

    pub fn translation(&self) -> Option<Translation> {
        Translation::compute(self.session.scale(), &self.relationship.chord)
    }

    pub fn fields(&self) -> &'static [Field] {
        match self.row {
            Row::Master => &Field::MASTER,
            Row::Track(_) => &Field::TRACK,
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Sequencer => Focus::Groove,
                    Focus::Groove => Focus::Sequencer,
                }
            }

            // Scale
            KeyCode::Char('r') => self.shift_root(1),
            KeyCode::Char('R') => self.shift_root(11),
            KeyCode::Char('o') => self.change_mode(self.session.scale().mode().next()),
            KeyCode::Char('O') => self.change_mode(self.session.scale().mode().prev()),

            // Chord dictionary
            KeyCode::Char('c') => self.chord_index = (self.chord_index + 1) % EXTENDED_CHORDS.len(),
            KeyCode::Char('C') => self.chord_root = (self.chord_root + 1) % 12,
            KeyCode::Char('p') => self.play_chord(),

            // Intervals
            KeyCode::Char('i') => self.interval = self.interval % 12 + 1,
            KeyCode::Char('u') => self.play_interval(true),
            KeyCode::Char('j') => self.play_interval(false),

            // Relationships
            KeyCode::Char('e') => self.relationship.cycle(true),
            KeyCode::Char('E') => self.relationship.cycle(false),

            // Time signature
            KeyCode::Char('t') => self.change_beats(1),
            KeyCode::Char('T') => self.change_beats(-1),
            KeyCode::Char('n') => {
                let next = self.meter.signature().note_value.next();
                self.meter.set_note_value(next);
            }
            KeyCode::Char('g') => {
                self.meter.cycle_grouping();
                self.regenerate_groove();
            }

            _ => match self.focus {
                Focus::Sequencer => self.handle_sequencer_key(key),
                Focus::Groove => self.handle_groove_key(key),
            },
        }
    }

    fn handle_sequencer_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(' ') => {
                // only one transport plays at a time
                if self.groove_transport.stop() {
                    self.output.silence();
                }
                match self.transport.toggle(&self.session, &mut self.output) {
                    Ok(true) => self.status = String::from("Sequencer playing"),
                    Ok(false) => self.status = String::from("Stopped"),
                    Err(err) => self.status = format!("Audio unavailable: {}", err),
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.session.set_bpm(self.session.bpm() + 1.0)
            }
            KeyCode::Char('-') => self.session.set_bpm((self.session.bpm() - 1.0).max(1.0)),
            KeyCode::Char(']') => self.session.set_resolution(self.session.resolution() + 1),
            KeyCode::Char('[') => self
                .session
                .set_resolution(self.session.resolution().saturating_sub(1).max(1)),
            KeyCode::Up => self.move_row(-1),
            KeyCode::Down => self.move_row(1),
            KeyCode::Left => self.move_field(-1),
            KeyCode::Right => self.move_field(1),
            KeyCode::Char('.') => self.adjust_field(1),
            KeyCode::Char(',') => self.adjust_field(-1),
            KeyCode::Char('a') => {
                let id = self.session.add_track();
                self.row = Row::Track(self.session.tracks().len() - 1);
                info!("added track {:?}", id);
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_track_id() {
                    self.session.remove_track(id);
                    self.clamp_row();
                }
            }
            _ => {}
        }
    }

    fn handle_groove_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(' ') => {
                // only one transport plays at a time
                if self.transport.stop() {
                    self.output.silence();
                }
                match self.groove_transport.toggle(&self.groove, &mut self.output) {
                    Ok(true) => self.status = String::from("Groove playing"),
                    Ok(false) => self.status = String::from("Stopped"),
                    Err(err) => self.status = format!("Audio unavailable: {}", err),
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.groove.set_bpm(self.groove.bpm() + 1.0)
            }
            KeyCode::Char('-') => self.groove.set_bpm((self.groove.bpm() - 1.0).max(1.0)),
            KeyCode::Char('.') => {
                self.groove.set_seed(self.groove.seed().wrapping_add(1));
                self.regenerate_groove();
            }
            KeyCode::Char(',') => {
                self.groove.set_seed(self.groove.seed().wrapping_sub(1));
                self.regenerate_groove();
            }
            KeyCode::Char('v') => {
                let follow = !self.groove.follows_grouping();
                self.groove.set_follow_grouping(follow);
                self.regenerate_groove();
            }
            KeyCode::Char('y') => {
                self.groove.cycle_preset();
                self.regenerate_groove();
            }
            _ => {}
        }
    }

    fn regenerate_groove(&mut self) {
        let grouping = self.meter.grouping();
        self.groove
            .regenerate(self.session.scale(), grouping.as_ref());
    }

    fn shift_root(&mut self, semitones: u8) {
        let root = (self.session.scale().root() + semitones) % 12;
        self.session.set_root(root);
        self.regenerate_groove();
    }

    fn change_mode(&mut self, mode: Mode) {
        self.session.set_mode(mode);
        self.regenerate_groove();
    }

    fn change_beats(&mut self, delta: i16) {
        let beats = (self.meter.signature().beats as i16 + delta).clamp(1, 32) as u8;
        self.meter.set_beats(beats);
        self.regenerate_groove();
    }

    fn play_chord(&mut self) {
        let quality = self.chord_quality();
        if let Err(err) = chord_preview(&mut self.output, self.chord_root, quality) {
            warn!("chord preview failed: {}", err);
            self.status = format!("Audio unavailable: {}", err);
        }
    }

    fn play_interval(&mut self, up: bool) {
        let root = self.session.scale().root();
        if let Err(err) = interval_preview(&mut self.output, root, self.interval, up) {
            warn!("interval preview failed: {}", err);
            self.status = format!("Audio unavailable: {}", err);
        }
    }

    fn selected_track_id(&self) -> Option<TrackId> {
        match self.row {
            Row::Track(index) => self.session.tracks().get(index).map(|t| t.id),
            Row::Master => None,
        }
    }

    fn move_row(&mut self, delta: i32) {
        let tracks = self.session.tracks().len() as i32;
        let current = match self.row {
            Row::Master => -1,
            Row::Track(index) => index as i32,
        };
        let next = (current + delta).clamp(-1, tracks - 1);
        self.row = if next < 0 {
            Row::Master
        } else {
            Row::Track(next as usize)
        };
        if !self.fields().contains(&self.field) {
            self.field = self.fields()[0];
        }
    }

    fn clamp_row(&mut self) {
        self.move_row(0);
    }

    fn move_field(&mut self, delta: i32) {
        let fields = self.fields();
        let current = fields.iter().position(|&f| f == self.field).unwrap_or(0) as i32;
        let next = (current + delta).rem_euclid(fields.len() as i32) as usize;
        self.field = fields[next];
    }

    fn adjust_field(&mut self, delta: i64) {
        match self.row {
            Row::Master => {
                let Some(which) = self.field.gate_field() else {
                    return;
                };
                let gate = self.session.master_gate();
                let value = step_gate(gate, which, delta);
                self.session.set_master_field(which, value);
            }
            Row::Track(index) => {
                let Some(track) = self.session.tracks().get(index).copied() else {
                    return;
                };
                let edit = match self.field.gate_field() {
                    Some(which) => TrackField::Gate(which, step_gate(track.gate, which, delta)),
                    None => match self.field {
                        Field::Degree => {
                            TrackField::Degree((track.degree as i64 + delta).clamp(1, 7) as u8)
                        }
                        Field::Period => TrackField::Period(step(track.period, delta, 1)),
                        _ => TrackField::Offset(step(track.offset, delta, 0)),
                    },
                };
                self.session.update_track(track.id, edit);
            }
        }
    }
}

// Counts stay at 1 or above, offsets at 0 or above.
fn step(value: u32, delta: i64, min: i64) -> u32 {
    (value as i64 + delta).clamp(min, u32::MAX as i64) as u32
}

fn step_gate(gate: Gate, which: GateField, delta: i64) -> u32 {
    let min = match which {
        GateField::Offset => 0,
        _ => 1,
    };
    step(gate.get(which), delta, min)
}
