//! Sequencer matrix and track editor

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_theory::sequencing::{CellState, Gate};

use super::super::app::{App, Field, Focus, Row};

/// Render the degree × tick matrix above the track editor
pub fn render_sequencer(frame: &mut Frame, area: Rect, app: &App) {
    let border = if app.focus == Focus::Sequencer {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Sequencer ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(2)])
        .split(inner);

    render_matrix(frame, chunks[0], app);
    render_editor(frame, chunks[1], app);
}

fn render_matrix(frame: &mut Frame, area: Rect, app: &App) {
    let label_width = 6usize;
    let visible = (area.width as usize).saturating_sub(label_width);
    let resolution = app.session.resolution().min(visible);
    let playing = app.transport.playing_tick();
    let matrix = app.session.matrix();
    let names = app.session.scale().note_names();

    let mut lines = Vec::new();

    // Tick ruler
    let mut ruler = vec![Span::raw(" ".repeat(label_width))];
    for tick in 0..resolution {
        let style = if playing == Some(tick) {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        ruler.push(Span::styled(format!("{}", tick % 10), style));
    }
    lines.push(Line::from(ruler));

    // Degree rows, 7 at the top
    for (degree, row) in matrix.iter().enumerate().rev() {
        let name = names.get(degree).copied().unwrap_or("?");
        let mut spans = vec![Span::styled(
            format!("{} {:<3} ", degree + 1, name),
            Style::default().fg(Color::White),
        )];
        for (tick, cell) in row.iter().take(resolution).enumerate() {
            let (glyph, mut style) = match cell {
                CellState::MasterOff => ("·", Style::default().fg(Color::DarkGray)),
                CellState::On => ("♪", Style::default().fg(Color::Cyan)),
                CellState::Off => ("░", Style::default().fg(Color::Gray)),
            };
            if playing == Some(tick) {
                style = style.bg(Color::Yellow).fg(Color::Black);
            }
            spans.push(Span::styled(glyph, style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_editor(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    let master = app.session.master_gate();
    lines.push(editor_line(
        "Master",
        &gate_fields(master),
        app.row == Row::Master,
        app.field,
    ));

    let names = app.session.scale().note_names();
    for (index, track) in app.session.tracks().iter().enumerate() {
        let degree_name = names
            .get((track.degree as usize).saturating_sub(1))
            .copied()
            .unwrap_or("?");
        let mut fields = vec![
            (Field::Degree, format!("{} ({})", track.degree, degree_name)),
            (Field::Period, track.period.to_string()),
            (Field::Offset, track.offset.to_string()),
        ];
        fields.extend(gate_fields(track.gate));
        lines.push(editor_line(
            &format!("T{}", track.id.0),
            &fields,
            app.row == Row::Track(index),
            app.field,
        ));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn gate_fields(gate: Gate) -> Vec<(Field, String)> {
    vec![
        (Field::GateOn, gate.on.to_string()),
        (Field::GateTotal, gate.total.to_string()),
        (Field::GateOffset, gate.offset.to_string()),
    ]
}

fn editor_line(
    label: &str,
    fields: &[(Field, String)],
    selected: bool,
    field: Field,
) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{} {:<7}", if selected { "›" } else { " " }, label),
        Style::default().fg(if selected { Color::Yellow } else { Color::White }),
    )];
    for (which, value) in fields {
        let style = if selected && *which == field {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("{}: {}", which.label(), value), style));
    }
    Line::from(spans)
}
