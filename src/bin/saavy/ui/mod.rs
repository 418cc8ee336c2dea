//! TUI module for saavy
//!
//! Draws the whole screen from the current `App` each frame.

mod groove;
mod grid;
mod theory;
mod transport;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use super::app::{App, Focus};

use groove::render_groove;
use grid::render_sequencer;
use theory::render_theory;
use transport::render_transport;

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: transport, body, groove, help
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Transport bar
            Constraint::Min(12),   // Sequencer + theory
            Constraint::Length(6), // Groove
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_transport(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);
    render_sequencer(frame, body[0], app);
    render_theory(frame, body[1], app);

    render_groove(frame, chunks[2], app);

    let help = match app.focus {
        Focus::Sequencer => {
            " [Q] Quit [Tab] Groove [Space] Play [+/-] BPM [[/]] Res [↑↓←→] Select [,/.] Edit [A/D] Track  [r/o] Scale [c/C/p] Chord [i/u/j] Interval [e] Rel [t/n/g] Meter"
        }
        Focus::Groove => {
            " [Q] Quit [Tab] Sequencer [Space] Play [+/-] BPM [,/.] Seed [y] Preset [v] Follow meter  [r/o] Scale [t/n/g] Meter"
        }
    };
    let help = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}
