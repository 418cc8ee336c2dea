//! Transport bar widget - shows BPM, play state, position, and output status

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_theory::transport::TickSource;

use super::super::app::App;
use super::super::output::OutputStatus;

/// Render the transport bar
pub fn render_transport(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" saavy ").borders(Borders::ALL);

    let playing = app.transport.is_playing() || app.groove_transport.is_playing();
    let play_symbol = if playing { "▶" } else { "■" };
    let play_state_str = if app.transport.is_playing() {
        "Sequencer"
    } else if app.groove_transport.is_playing() {
        "Groove"
    } else {
        "Stopped"
    };

    let position = match app.transport.playing_tick() {
        Some(tick) => format!("{}/{}  ", tick + 1, app.session.resolution()),
        None => format!("-/{}  ", app.session.resolution()),
    };

    let (output_str, output_color) = match app.output.status() {
        OutputStatus::Closed => (String::from("audio: idle"), Color::DarkGray),
        OutputStatus::Open { sample_rate } => {
            (format!("audio: {:.1}kHz", sample_rate / 1000.0), Color::DarkGray)
        }
        OutputStatus::Failed(reason) => (format!("audio: {}", reason), Color::Red),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", app.session.bpm()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} {}  ", play_symbol, play_state_str),
            Style::default().fg(if playing { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(position, Style::default().fg(Color::White)),
        Span::styled(
            format!("{}  ", app.session.scale().describe()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(output_str, Style::default().fg(output_color)),
        Span::raw("  "),
        Span::styled(app.status.clone(), Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
