use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::catalog::{ActivityCatalog, GUEST_CHOICES};
use crate::domain::{EventRecord, Field, FieldEdit, PaymentMethod};
use crate::form::{DraftStore, DraftValidator, Slide, SubmitError, Submitter};
use crate::list::ListSync;
use crate::presentation::{self, UiContext};
use crate::store::{CollectionStore, StoreError};

use super::options::UiOptions;
use super::picker::{DateTimePicker, PickerOutcome, TemporalField};
use super::status::StatusLine;
use super::terminal::TerminalGuard;

const LIST_HELP: &str = "n new event • r refresh • ↑/↓ scroll • q quit";
const FORM_HELP: &str =
    "Tab/↓ next • ←/→ choose • Enter pick time • Ctrl+S post • Esc close";

/// Messages delivered back to the event loop by worker threads.
pub enum AppEvent {
    SubmitFinished(Result<EventRecord, SubmitError>),
    FetchFinished(Result<Vec<EventRecord>, StoreError>),
}

/// Form fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Name,
    Activity,
    Guests,
    Payment,
    Description,
    Location,
    MapUrl,
    StartTime,
    EndTime,
}

impl FormFocus {
    pub const ORDER: [FormFocus; 9] = [
        FormFocus::Name,
        FormFocus::Activity,
        FormFocus::Guests,
        FormFocus::Payment,
        FormFocus::Description,
        FormFocus::Location,
        FormFocus::MapUrl,
        FormFocus::StartTime,
        FormFocus::EndTime,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn text_field(self) -> Option<Field> {
        match self {
            FormFocus::Name => Some(Field::Name),
            FormFocus::Description => Some(Field::Description),
            FormFocus::Location => Some(Field::Location),
            FormFocus::MapUrl => Some(Field::MapUrl),
            _ => None,
        }
    }
}

/// Steps a wrapping selection index. `None` means nothing is selected
/// yet; the first step lands on the first option regardless of
/// direction.
fn step_index(len: usize, current: Option<usize>, delta: i32) -> usize {
    if len == 0 {
        return 0;
    }
    let Some(current) = current else {
        return 0;
    };
    let len = len as i32;
    let next = (current as i32 + delta).rem_euclid(len);
    next as usize
}

/// The application controller: owns the draft lifecycle, the overlay
/// transition, the submission pipeline and the list state, and routes
/// every key press and worker message between them.
pub struct EventsApp<S: CollectionStore + Send + Sync + 'static> {
    store: Arc<S>,
    collection: String,
    catalog: ActivityCatalog,
    options: UiOptions,
    draft: DraftStore,
    slide: Slide,
    submitter: Submitter<S>,
    list: ListSync,
    status: StatusLine,
    focus: FormFocus,
    start_field: TemporalField,
    end_field: TemporalField,
    picker: Option<DateTimePicker>,
    list_scroll: usize,
    exit_armed: bool,
    should_quit: bool,
    events_tx: Sender<AppEvent>,
    events_rx: Receiver<AppEvent>,
}

impl<S: CollectionStore + Send + Sync + 'static> EventsApp<S> {
    pub fn new(
        store: Arc<S>,
        collection: impl Into<String>,
        catalog: ActivityCatalog,
        options: UiOptions,
    ) -> Result<Self> {
        let collection = collection.into();
        let validator = Arc::new(DraftValidator::new(&catalog)?);
        let (events_tx, events_rx) = mpsc::channel();
        Ok(Self {
            submitter: Submitter::new(Arc::clone(&store), collection.clone(), Arc::clone(&validator)),
            draft: DraftStore::new(validator),
            store,
            collection,
            catalog,
            options,
            slide: Slide::new(),
            list: ListSync::new(),
            status: StatusLine::new(),
            focus: FormFocus::Name,
            start_field: TemporalField::new(Field::StartTime),
            end_field: TemporalField::new(Field::EndTime),
            picker: None,
            list_scroll: 0,
            exit_armed: false,
            should_quit: false,
            events_tx,
            events_rx,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = TerminalGuard::new()?;
        self.begin_fetch();

        let mut last_tick = Instant::now();
        while !self.should_quit {
            terminal.draw(|frame| presentation::draw(frame, &self.ui_context()))?;

            if event::poll(self.options.tick_rate)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }

            let now = Instant::now();
            self.slide.tick(now - last_tick);
            last_tick = now;

            self.drain_events();
        }
        Ok(())
    }

    fn ui_context(&self) -> UiContext<'_> {
        UiContext {
            list: &self.list,
            list_scroll: self.list_scroll,
            catalog: &self.catalog,
            draft: &self.draft,
            slide: &self.slide,
            focus: self.focus,
            start_field: &self.start_field,
            end_field: &self.end_field,
            picker: self.picker.as_ref(),
            status_message: self.status.message(),
            submitting: self.submitter.in_flight(),
            help: self.options.show_help.then_some(if self.slide.is_closed() {
                LIST_HELP
            } else {
                FORM_HELP
            }),
        }
    }

    fn begin_fetch(&self) {
        let tx = self.events_tx.clone();
        ListSync::begin_fetch(Arc::clone(&self.store), self.collection.clone(), move |result| {
            let _ = tx.send(AppEvent::FetchFinished(result));
        });
    }

    fn drain_events(&mut self) {
        while let Ok(app_event) = self.events_rx.try_recv() {
            match app_event {
                AppEvent::SubmitFinished(result) => self.on_submit_finished(result),
                AppEvent::FetchFinished(result) => {
                    if result.is_err() {
                        self.status.fetch_failed();
                    }
                    self.list.resolve(result);
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.picker.is_some() {
            self.handle_picker_key(&key);
            return;
        }
        if self.slide.is_closed() {
            self.handle_list_key(&key);
        } else {
            self.handle_form_key(&key);
        }
    }

    fn handle_list_key(&mut self, key: &KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q' | 'Q' | 'c' | 'C'))
        {
            self.on_exit();
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.on_exit(),
            KeyCode::Char('n') => self.open_overlay(),
            KeyCode::Char('r') => self.on_refresh(),
            KeyCode::Up => self.list_scroll = self.list_scroll.saturating_sub(1),
            KeyCode::Down => {
                let max = self.list.records().map(<[EventRecord]>::len).unwrap_or(0);
                if self.list_scroll + 1 < max {
                    self.list_scroll += 1;
                }
            }
            _ => {}
        }
    }

    fn open_overlay(&mut self) {
        self.exit_armed = false;
        self.slide.set_visible(true);
        self.focus = FormFocus::Name;
        self.status.editing(Field::Name.label());
    }

    fn on_refresh(&mut self) {
        if self.list.is_loading() {
            return;
        }
        self.list.refresh();
        self.list_scroll = 0;
        self.status.set_raw("Refreshing…");
        self.begin_fetch();
    }

    fn on_exit(&mut self) {
        if self.options.confirm_exit && self.draft.is_dirty() && !self.exit_armed {
            self.exit_armed = true;
            self.status.pending_exit();
            return;
        }
        self.should_quit = true;
    }

    fn handle_form_key(&mut self, key: &KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s' | 'S') => {
                    self.on_submit();
                    return;
                }
                KeyCode::Char('q' | 'Q' | 'c' | 'C') => {
                    self.close_overlay();
                    return;
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => self.close_overlay(),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => self.open_picker(),
            KeyCode::Left => self.cycle_choice(-1),
            KeyCode::Right => self.cycle_choice(1),
            _ => {
                if self.handle_text_key(key) {
                    self.after_edit();
                }
            }
        }
    }

    fn close_overlay(&mut self) {
        // the draft is retained; only a successful submission discards it
        self.slide.set_visible(false);
        self.status.ready();
    }

    fn open_picker(&mut self) {
        let target = match self.focus {
            FormFocus::StartTime => Field::StartTime,
            FormFocus::EndTime => Field::EndTime,
            _ => return,
        };
        let initial = match target {
            Field::EndTime => self.draft.draft().end_time,
            _ => self.draft.draft().start_time,
        };
        self.picker = Some(DateTimePicker::open(target, initial));
        self.status.set_raw("↑/↓ adjust • ←/→ segment • Enter confirm • Esc cancel");
    }

    fn handle_picker_key(&mut self, key: &KeyEvent) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        match picker.handle_key(key) {
            PickerOutcome::Pending => {}
            PickerOutcome::Cancelled => {
                self.picker = None;
                self.status.editing(picker_label(self.focus));
            }
            PickerOutcome::Confirmed(instant) => {
                let target = picker.target();
                self.picker = None;
                match target {
                    Field::EndTime => {
                        self.end_field.confirm(instant);
                        self.draft.apply(FieldEdit::EndTime(instant));
                    }
                    _ => {
                        self.start_field.confirm(instant);
                        self.draft.apply(FieldEdit::StartTime(instant));
                    }
                }
                self.after_edit();
            }
        }
    }

    /// Left/Right on a chip group: the draft store is the only
    /// selection state, so cycling is a plain field edit.
    fn cycle_choice(&mut self, delta: i32) {
        let edit = match self.focus {
            FormFocus::Activity => {
                let options = self.catalog.options();
                let current = options
                    .iter()
                    .position(|option| option.value == self.draft.selected_activity());
                let next = step_index(options.len(), current, delta);
                options
                    .get(next)
                    .map(|option| FieldEdit::ActivityKind(option.value.clone()))
            }
            FormFocus::Guests => {
                let current = GUEST_CHOICES
                    .iter()
                    .position(|count| *count == self.draft.selected_guest_count());
                let next = step_index(GUEST_CHOICES.len(), current, delta);
                Some(FieldEdit::GuestCount(GUEST_CHOICES[next]))
            }
            FormFocus::Payment => {
                let current = PaymentMethod::ALL
                    .iter()
                    .position(|method| *method == self.draft.selected_payment());
                let next = step_index(PaymentMethod::ALL.len(), current, delta);
                Some(FieldEdit::PaymentMethod(PaymentMethod::ALL[next]))
            }
            _ => None,
        };
        if let Some(edit) = edit {
            self.draft.apply(edit);
            self.after_edit();
        }
    }

    fn handle_text_key(&mut self, key: &KeyEvent) -> bool {
        let Some(field) = self.focus.text_field() else {
            return false;
        };
        let draft = self.draft.draft();
        let mut buffer = match field {
            Field::Name => draft.name.clone(),
            Field::Description => draft.description.clone(),
            Field::Location => draft.location.clone(),
            Field::MapUrl => draft.map_url.clone(),
            _ => return false,
        };
        match key.code {
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return false;
                }
                buffer.push(ch);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Delete => buffer.clear(),
            _ => return false,
        }
        let edit = match field {
            Field::Name => FieldEdit::Name(buffer),
            Field::Description => FieldEdit::Description(buffer),
            Field::Location => FieldEdit::Location(buffer),
            Field::MapUrl => FieldEdit::MapUrl(buffer),
            _ => return false,
        };
        self.draft.apply(edit);
        true
    }

    fn after_edit(&mut self) {
        self.exit_armed = false;
        self.status.editing(picker_label(self.focus));
        if self.options.auto_validate {
            self.draft.revalidate();
        }
    }

    fn on_submit(&mut self) {
        let draft = self.draft.draft().clone();
        let tx = self.events_tx.clone();
        match self
            .submitter
            .submit_in_background(draft, move |result| {
                let _ = tx.send(AppEvent::SubmitFinished(result));
            }) {
            Ok(()) => self.status.posting(),
            Err(SubmitError::AlreadySubmitting) => {
                // disabled-state hint, not an alert
                self.status.posting();
            }
            Err(_) => {}
        }
    }

    fn on_submit_finished(&mut self, result: Result<EventRecord, SubmitError>) {
        match result {
            Ok(record) => {
                self.status.posted();
                self.slide.set_visible(false);
                self.list.prepend(record);
                self.list_scroll = 0;
                self.draft.reset();
                self.start_field.clear();
                self.end_field.clear();
                self.focus = FormFocus::Name;
            }
            Err(SubmitError::ValidationFailed(errors)) => {
                let issues = errors.len();
                self.draft.set_errors(errors);
                self.status.issues_remaining(issues);
            }
            Err(SubmitError::RemoteWriteFailed(_)) => self.status.post_failed(),
            Err(SubmitError::AlreadySubmitting) => {}
        }
    }
}

fn picker_label(focus: FormFocus) -> &'static str {
    match focus {
        FormFocus::Name => Field::Name.label(),
        FormFocus::Activity => Field::ActivityKind.label(),
        FormFocus::Guests => Field::GuestCount.label(),
        FormFocus::Payment => Field::PaymentMethod.label(),
        FormFocus::Description => Field::Description.label(),
        FormFocus::Location => Field::Location.label(),
        FormFocus::MapUrl => Field::MapUrl.label(),
        FormFocus::StartTime => Field::StartTime.label(),
        FormFocus::EndTime => Field::EndTime.label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_order_wraps_both_ways() {
        assert_eq!(FormFocus::Name.next(), FormFocus::Activity);
        assert_eq!(FormFocus::EndTime.next(), FormFocus::Name);
        assert_eq!(FormFocus::Name.prev(), FormFocus::EndTime);
    }

    #[test]
    fn step_index_wraps_and_handles_unselected_state() {
        assert_eq!(step_index(3, Some(2), 1), 0);
        assert_eq!(step_index(3, Some(0), -1), 2);
        assert_eq!(step_index(3, None, 1), 0);
        assert_eq!(step_index(3, None, -1), 0);
        assert_eq!(step_index(0, None, 1), 0);
    }
}
