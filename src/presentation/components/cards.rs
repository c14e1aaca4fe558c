use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use textwrap::wrap;

use crate::catalog::ActivityCatalog;
use crate::domain::EventRecord;
use crate::list::{ListPhase, ListSync};

use super::super::view::UiContext;
use super::chips::chip_line;

const FILTER_LABELS: [&str; 4] = ["Up Coming", "My Events", "This Week", "This Weekend"];

pub fn render_cards(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    // inert filter strip; filtering itself is out of scope
    let filters: Vec<(String, bool)> = FILTER_LABELS
        .iter()
        .map(|label| ((*label).to_string(), false))
        .collect();
    frame.render_widget(Paragraph::new(chip_line(&filters)), chunks[0]);

    let width = chunks[1].width.saturating_sub(4) as usize;
    let lines = body_lines(ctx.list, ctx.catalog, width);
    let scroll = card_scroll(ctx.list, ctx.list_scroll);
    let body = Paragraph::new(lines)
        .block(Block::default().title("Events").borders(Borders::ALL))
        .scroll((scroll, 0));
    frame.render_widget(body, chunks[1]);
}

/// All body lines of the list screen for the current phase. Loading
/// and errored states render no cards; a loaded empty collection
/// renders the single empty-state message.
fn body_lines(list: &ListSync, catalog: &ActivityCatalog, width: usize) -> Vec<Line<'static>> {
    match list.phase() {
        ListPhase::Loading => vec![Line::from(Span::styled(
            "Loading events…",
            Style::default().fg(Color::Gray),
        ))],
        ListPhase::Errored => vec![Line::from(Span::styled(
            "Couldn't load events. Press r to retry.",
            Style::default().fg(Color::Red),
        ))],
        ListPhase::Loaded(records) if records.is_empty() => vec![Line::from(Span::styled(
            "No events yet",
            Style::default().fg(Color::Gray),
        ))],
        ListPhase::Loaded(records) => {
            let mut lines = Vec::new();
            for record in records {
                lines.extend(card_lines(record, catalog, width));
            }
            lines
        }
    }
}

fn card_lines(record: &EventRecord, catalog: &ActivityCatalog, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        record.name.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));

    let activity = catalog
        .options()
        .iter()
        .find(|option| option.value == record.activity_kind)
        .map(|option| option.label.clone())
        .unwrap_or_else(|| record.activity_kind.clone());
    lines.push(Line::from(Span::styled(
        format!(
            "{activity} · {} guests · {}",
            record.guest_count,
            record.payment_method.label()
        ),
        Style::default().fg(Color::Cyan),
    )));

    lines.push(Line::from(Span::styled(
        format!(
            "{} · {} – {}",
            record.start_time.format("%A %d %B"),
            record.start_time.format("%H:%M"),
            record.end_time.format("%H:%M"),
        ),
        Style::default().fg(Color::Gray),
    )));

    lines.push(Line::from(Span::styled(
        format!("@ {}", record.location),
        Style::default().fg(Color::Gray),
    )));

    if !record.description.is_empty() {
        for segment in wrap(&record.description, width.max(16)) {
            lines.push(Line::from(Span::styled(
                segment.into_owned(),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    if let Some(map_url) = &record.map_url {
        lines.push(Line::from(Span::styled(
            format!("map: {map_url}"),
            Style::default().fg(Color::Blue),
        )));
    }

    lines.push(Line::from(" "));
    lines
}

/// Rough per-card scroll: jumping a whole card per step is enough for
/// a short feed.
fn card_scroll(list: &ListSync, selected: usize) -> u16 {
    match list.records() {
        Some(records) if !records.is_empty() => {
            let per_card = 6u16;
            per_card.saturating_mul(selected.min(records.len() - 1) as u16)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentMethod;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, name: &str) -> EventRecord {
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 8, 0, 0).unwrap();
        EventRecord {
            id: id.to_string(),
            collection_id: "events".to_string(),
            created_at: at,
            updated_at: at,
            name: name.to_string(),
            activity_kind: "hiking".to_string(),
            guest_count: 4,
            payment_method: PaymentMethod::Free,
            description: "A walk".to_string(),
            start_time: at,
            end_time: at + chrono::Duration::hours(3),
            location: "Park".to_string(),
            map_url: None,
        }
    }

    fn text_of(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_collection_renders_the_empty_state_message() {
        let mut list = ListSync::new();
        list.resolve(Ok(Vec::new()));
        let lines = body_lines(&list, &ActivityCatalog::builtin(), 60);
        assert_eq!(lines.len(), 1);
        assert!(text_of(&lines).contains("No events yet"));
    }

    #[test]
    fn loaded_records_render_one_card_each_in_received_order() {
        let mut list = ListSync::new();
        list.resolve(Ok(vec![record("a", "Morning Trek"), record("b", "Evening Ride")]));
        let text = text_of(&body_lines(&list, &ActivityCatalog::builtin(), 60));
        let first = text.find("Morning Trek").unwrap();
        let second = text.find("Evening Ride").unwrap();
        assert!(first < second);
        assert!(text.contains("Hiking · 4 guests · Free"));
    }

    #[test]
    fn loading_and_errored_render_no_cards() {
        let list = ListSync::new();
        let text = text_of(&body_lines(&list, &ActivityCatalog::builtin(), 60));
        assert!(text.contains("Loading events"));

        let mut errored = ListSync::new();
        errored.resolve(Err(crate::store::StoreError::Http("boom".to_string())));
        let text = text_of(&body_lines(&errored, &ActivityCatalog::builtin(), 60));
        assert!(text.contains("Couldn't load events"));
        assert!(!text.contains("Morning Trek"));
    }
}
