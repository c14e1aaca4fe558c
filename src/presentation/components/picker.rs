use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{DateTimePicker, PickerSegment};
use crate::domain::Field;

use super::layout::popup_rect;

pub fn render_picker(frame: &mut Frame<'_>, picker: &DateTimePicker) {
    let title = match picker.target() {
        Field::EndTime => " To ",
        _ => " From ",
    };
    let area = popup_rect(frame.area(), 34, 5);
    frame.render_widget(Clear, area);

    let value = picker.value();
    let segments = [
        (value.format("%d").to_string(), Some(PickerSegment::Day)),
        ("/".to_string(), None),
        (value.format("%m").to_string(), Some(PickerSegment::Month)),
        ("/".to_string(), None),
        (value.format("%Y").to_string(), Some(PickerSegment::Year)),
        ("   ".to_string(), None),
        (value.format("%H").to_string(), Some(PickerSegment::Hour)),
        (":".to_string(), None),
        (value.format("%M").to_string(), Some(PickerSegment::Minute)),
    ];

    let mut spans = vec![Span::raw("  ")];
    for (text, segment) in segments {
        let style = match segment {
            Some(segment) if segment == picker.segment() => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            Some(_) => Style::default().fg(Color::White),
            None => Style::default().fg(Color::DarkGray),
        };
        spans.push(Span::styled(text, style));
    }

    let body = vec![
        Line::from(spans),
        Line::from(Span::styled(
            "  ↑/↓ adjust · ←/→ segment · Enter · Esc",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let widget = Paragraph::new(body).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(widget, area);
}
