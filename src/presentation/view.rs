use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::{DateTimePicker, FormFocus, TemporalField};
use crate::catalog::ActivityCatalog;
use crate::form::{DraftStore, Slide};
use crate::list::ListSync;

use super::components::{render_cards, render_footer, render_form, render_picker};

pub struct UiContext<'a> {
    pub list: &'a ListSync,
    pub list_scroll: usize,
    pub catalog: &'a ActivityCatalog,
    pub draft: &'a DraftStore,
    pub slide: &'a Slide,
    pub focus: FormFocus,
    pub start_field: &'a TemporalField,
    pub end_field: &'a TemporalField,
    pub picker: Option<&'a DateTimePicker>,
    pub status_message: &'a str,
    pub submitting: bool,
    pub help: Option<&'a str>,
}

pub fn draw(frame: &mut Frame<'_>, ctx: &UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(2)])
        .split(frame.area());

    render_cards(frame, chunks[0], ctx);
    if !ctx.slide.is_closed() {
        render_form(frame, chunks[0], ctx);
    }
    render_footer(frame, chunks[1], ctx);

    if let Some(picker) = ctx.picker {
        render_picker(frame, picker);
    }
}
