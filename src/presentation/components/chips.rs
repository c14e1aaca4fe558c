use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Renders one row of choice chips. Selection never lives here: the
/// caller derives the `selected` flag of each option from the draft
/// store's current value.
pub fn chip_line(options: &[(String, bool)]) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (label, selected) in options {
        let style = if *selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {label} "), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected_count(line: &Line<'_>) -> usize {
        line.spans
            .iter()
            .filter(|span| span.style.bg == Some(Color::Yellow))
            .count()
    }

    #[test]
    fn at_most_one_chip_renders_selected() {
        let line = chip_line(&[
            ("Hiking".to_string(), false),
            ("Cafe".to_string(), true),
            ("Movie".to_string(), false),
        ]);
        assert_eq!(selected_count(&line), 1);
    }

    #[test]
    fn no_selection_renders_no_highlight() {
        let line = chip_line(&[
            ("Hiking".to_string(), false),
            ("Cafe".to_string(), false),
        ]);
        assert_eq!(selected_count(&line), 0);
    }
}
