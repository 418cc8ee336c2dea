//! Groove panel - melody row with playhead

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_theory::transport::TickSource;

use super::super::app::{App, Focus};

pub fn render_groove(frame: &mut Frame, area: Rect, app: &App) {
    let border = if app.focus == Focus::Groove {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Groove ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let groove = &app.groove;
    let source = if groove.follows_grouping() {
        format!(
            "Following {} ({})",
            app.meter.signature(),
            app.meter.grouping_text()
        )
    } else {
        format!("{}: {}", groove.preset().name, groove.preset().description)
    };

    let header = Line::from(vec![
        Span::styled(
            format!(" Seed {}  BPM {:.0}  ", groove.seed(), groove.bpm()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(source, Style::default().fg(Color::DarkGray)),
    ]);

    let playing = app.groove_transport.playing_tick();
    let mut cells = vec![Span::raw(" ")];
    for (slot, note) in groove.melody().iter().enumerate() {
        let text = match note {
            Some(note) => format!("{:<3}", note.name),
            None => String::from("·  "),
        };
        let mut style = match note {
            Some(_) => Style::default().fg(Color::Magenta),
            None => Style::default().fg(Color::DarkGray),
        };
        if playing == Some(slot) {
            style = style.bg(Color::Yellow).fg(Color::Black);
        }
        cells.push(Span::styled(text, style));
    }

    let sequence = Line::from(Span::styled(
        format!(" {}", groove.sequence_text()),
        Style::default().fg(Color::Green),
    ));

    let paragraph = Paragraph::new(vec![header, Line::from(cells), sequence]).block(block);
    frame.render_widget(paragraph, area);
}
