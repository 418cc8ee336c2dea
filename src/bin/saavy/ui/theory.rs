//! Theory panel - scale, relationships, chord dictionary, intervals, meter

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use saavy_theory::theory::{
    chord::{chord_mask, chord_note_names},
    find_matching_modes,
    tables::CHROMATIC,
};

use super::super::app::App;

pub fn render_theory(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Theory ").borders(Borders::ALL);

    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let scale = app.session.scale();
    let mut lines = Vec::new();

    // Scale and its relatives
    lines.push(Line::from(Span::styled(scale.describe(), heading)));
    lines.push(Line::from(Span::styled(
        find_matching_modes(scale.note_names()).join("  |  "),
        dim,
    )));

    // Chord relationship
    let rel = &app.relationship;
    lines.push(Line::from(vec![
        Span::styled("Relationship ", heading),
        Span::raw(format!("{}  {}  ({})", rel.chord, rel.emotion, rel.spectrum)),
    ]));
    if let Some(t) = app.translation() {
        lines.push(Line::from(format!(
            "  {} [{}] → {} [{}]",
            t.chord1.name, t.chord1.spelling, t.chord2.name, t.chord2.spelling
        )));
        lines.push(Line::from(format!(
            "  relative ({} {}): {} → {}",
            CHROMATIC[t.relative_root as usize],
            if t.is_minor { "minor" } else { "major" },
            t.relative_chord1.name,
            t.relative_chord2.name
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}: {}", t.target_scale_name, t.target_notes.join(" ")),
            dim,
        )));
    }

    // Chord dictionary
    let quality = app.chord_quality();
    let mask: String = chord_mask(quality)
        .iter()
        .map(|&on| if on { '■' } else { '·' })
        .collect();
    lines.push(Line::from(vec![
        Span::styled("Chord ", heading),
        Span::raw(format!(
            "{} {}: {}  {}",
            CHROMATIC[app.chord_root as usize],
            quality.name,
            chord_note_names(app.chord_root, quality).join(" "),
            mask
        )),
    ]));
    lines.push(Line::from(Span::styled(format!("  {}", quality.description), dim)));

    // Interval preview
    let root = scale.root();
    lines.push(Line::from(vec![
        Span::styled("Interval ", heading),
        Span::raw(format!(
            "{} semitones: {} ↑ {}  {} ↓ {}",
            app.interval,
            scale.root_name(),
            CHROMATIC[((root + app.interval) % 12) as usize],
            scale.root_name(),
            CHROMATIC[((root + 12 - app.interval % 12) % 12) as usize],
        )),
    ]));

    // Meter
    let signature = app.meter.signature();
    lines.push(Line::from(vec![
        Span::styled("Meter ", heading),
        Span::raw(format!("{} ({})", signature, app.meter.grouping_text())),
    ]));
    if let Some(grouping) = app.meter.grouping() {
        let mut numbers = vec![Span::raw("  ")];
        let mut symbols = vec![Span::raw("  ")];
        let mut group = 0;
        for beat in grouping.beats() {
            if beat.group != group {
                numbers.push(Span::raw("│ "));
                symbols.push(Span::raw("│ "));
                group = beat.group;
            }
            let style = if beat.accent {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            numbers.push(Span::styled(format!("{:<3}", beat.number), style));
            symbols.push(Span::styled(
                format!("{:<3}", signature.note_value.symbol()),
                style,
            ));
        }
        lines.push(Line::from(numbers));
        lines.push(Line::from(symbols));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
