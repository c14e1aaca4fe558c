use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use unicode_width::UnicodeWidthStr;

use crate::app::{FormFocus, TemporalField};
use crate::catalog::{GUEST_CHOICES, payment_options};
use crate::domain::Field;

use super::super::view::UiContext;
use super::chips::chip_line;
use super::layout::slide_rect;

pub fn render_form(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let Some(overlay) = slide_rect(area, ctx.slide.visible_fraction()) else {
        return;
    };
    frame.render_widget(Clear, overlay);

    let submit_label = if ctx.submitting {
        " Posting… "
    } else {
        " Ctrl+S · Post "
    };
    let block = Block::default()
        .title(" Plan your event ")
        .title_bottom(Line::from(Span::styled(
            submit_label,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .borders(Borders::ALL);

    let items: Vec<ListItem<'static>> = FormFocus::ORDER
        .iter()
        .map(|focus| ListItem::new(field_lines(*focus, ctx)))
        .collect();

    let selected = FormFocus::ORDER
        .iter()
        .position(|focus| *focus == ctx.focus)
        .unwrap_or(0);
    let mut state = ListState::default();
    state.select(Some(selected));

    let list = List::new(items)
        .block(block)
        .highlight_symbol("» ")
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, overlay, &mut state);
}

fn field_lines(focus: FormFocus, ctx: &UiContext<'_>) -> Vec<Line<'static>> {
    let draft = ctx.draft.draft();
    let mut lines = Vec::new();
    let (field, label) = match focus {
        FormFocus::Name => (Field::Name, Field::Name.label()),
        FormFocus::Activity => (Field::ActivityKind, Field::ActivityKind.label()),
        FormFocus::Guests => (Field::GuestCount, Field::GuestCount.label()),
        FormFocus::Payment => (Field::PaymentMethod, Field::PaymentMethod.label()),
        FormFocus::Description => (Field::Description, Field::Description.label()),
        FormFocus::Location => (Field::Location, Field::Location.label()),
        FormFocus::MapUrl => (Field::MapUrl, Field::MapUrl.label()),
        FormFocus::StartTime => (Field::StartTime, Field::StartTime.label()),
        FormFocus::EndTime => (Field::EndTime, Field::EndTime.label()),
    };

    let selected = focus == ctx.focus;
    let label_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(label.to_string(), label_style)));

    match focus {
        FormFocus::Name => {
            lines.extend(text_value_lines(&draft.name, "Type here", selected));
            lines.push(helper_line(format!(
                "Min 10 characters · {}/30",
                draft.name.chars().count()
            )));
        }
        FormFocus::Activity => {
            let options: Vec<(String, bool)> = ctx
                .catalog
                .options()
                .iter()
                .map(|option| {
                    (
                        option.label.clone(),
                        option.value == ctx.draft.selected_activity(),
                    )
                })
                .collect();
            lines.push(chip_line(&options));
        }
        FormFocus::Guests => {
            let options: Vec<(String, bool)> = GUEST_CHOICES
                .iter()
                .map(|count| (count.to_string(), *count == ctx.draft.selected_guest_count()))
                .collect();
            lines.push(chip_line(&options));
        }
        FormFocus::Payment => {
            let options: Vec<(String, bool)> = payment_options()
                .map(|(method, label)| (label.to_string(), method == ctx.draft.selected_payment()))
                .collect();
            lines.push(chip_line(&options));
        }
        FormFocus::Description => {
            lines.extend(text_value_lines(&draft.description, "Type here", selected));
            lines.push(helper_line(format!(
                "{}/200 characters",
                draft.description.chars().count()
            )));
        }
        FormFocus::Location => {
            lines.extend(text_value_lines(&draft.location, "Type here", selected));
        }
        FormFocus::MapUrl => {
            lines.extend(text_value_lines(
                &draft.map_url,
                "https://maps.example.com/…",
                selected,
            ));
        }
        FormFocus::StartTime => {
            lines.push(temporal_line(ctx.start_field));
        }
        FormFocus::EndTime => {
            lines.push(temporal_line(ctx.end_field));
        }
    }

    if let Some(message) = ctx.draft.error_for(field) {
        lines.push(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(" "));
    lines
}

/// The focused text input renders as a bordered box with the value
/// padded to its display width; unfocused inputs render flat.
fn text_value_lines(value: &str, placeholder: &str, selected: bool) -> Vec<Line<'static>> {
    let empty = value.is_empty();
    let shown = if empty { placeholder } else { value };
    let value_style = if empty {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    if !selected {
        return vec![Line::from(Span::styled(
            format!("  {shown}"),
            value_style,
        ))];
    }

    let inner_width = UnicodeWidthStr::width(shown).max(12);
    let mut content = shown.to_string();
    let mut width = UnicodeWidthStr::width(content.as_str());
    while width < inner_width {
        content.push(' ');
        width += 1;
    }
    let border = "─".repeat(inner_width + 2);
    let border_style = Style::default().fg(Color::Yellow);
    vec![
        Line::from(Span::styled(format!("┌{border}┐"), border_style)),
        Line::from(vec![
            Span::styled("│ ", border_style),
            Span::styled(content, value_style.add_modifier(Modifier::BOLD)),
            Span::styled(" │", border_style),
        ]),
        Line::from(Span::styled(format!("└{border}┘"), border_style)),
    ]
}

fn helper_line(text: String) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {text}"),
        Style::default().fg(Color::DarkGray),
    ))
}

fn temporal_line(field: &TemporalField) -> Line<'static> {
    let style = if field.confirmed().is_some() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(
            format!("  {} · {}", field.display_date(), field.display_time()),
            style,
        ),
        Span::styled("  (Enter to pick)", Style::default().fg(Color::DarkGray)),
    ])
}
