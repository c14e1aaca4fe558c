use chrono::{DateTime, Duration, Months, Utc};
use crossterm::event::{KeyCode, KeyEvent};

use crate::domain::Field;

/// Display state of one temporal form field. Holds only the
/// last-confirmed instant, for formatting; the authoritative value
/// lives in the draft store.
#[derive(Debug, Clone)]
pub struct TemporalField {
    field: Field,
    confirmed: Option<DateTime<Utc>>,
}

impl TemporalField {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            confirmed: None,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn confirm(&mut self, instant: DateTime<Utc>) {
        self.confirmed = Some(instant);
    }

    pub fn clear(&mut self) {
        self.confirmed = None;
    }

    pub fn confirmed(&self) -> Option<DateTime<Utc>> {
        self.confirmed
    }

    pub fn display_date(&self) -> String {
        match self.confirmed {
            Some(instant) => instant.format("%d/%m").to_string(),
            None => "DD/MM".to_string(),
        }
    }

    pub fn display_time(&self) -> String {
        match self.confirmed {
            Some(instant) => instant.format("%H:%M").to_string(),
            None => "HH:MM".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerSegment {
    Day,
    Month,
    Year,
    Hour,
    Minute,
}

impl PickerSegment {
    const ORDER: [PickerSegment; 5] = [
        PickerSegment::Day,
        PickerSegment::Month,
        PickerSegment::Year,
        PickerSegment::Hour,
        PickerSegment::Minute,
    ];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|s| *s == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|s| *s == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Outcome of feeding one key into the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Pending,
    Confirmed(DateTime<Utc>),
    Cancelled,
}

/// Modal date/time chooser. Opaque to the form: it hands back a single
/// confirmed instant or a cancellation, and never blocks confirmation
/// on validation.
#[derive(Debug, Clone)]
pub struct DateTimePicker {
    target: Field,
    value: DateTime<Utc>,
    segment: PickerSegment,
}

impl DateTimePicker {
    pub fn open(target: Field, initial: DateTime<Utc>) -> Self {
        Self {
            target,
            value: initial,
            segment: PickerSegment::Day,
        }
    }

    pub fn target(&self) -> Field {
        self.target
    }

    pub fn value(&self) -> DateTime<Utc> {
        self.value
    }

    pub fn segment(&self) -> PickerSegment {
        self.segment
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> PickerOutcome {
        match key.code {
            KeyCode::Esc => PickerOutcome::Cancelled,
            KeyCode::Enter => PickerOutcome::Confirmed(self.value),
            KeyCode::Left => {
                self.segment = self.segment.prev();
                PickerOutcome::Pending
            }
            KeyCode::Right | KeyCode::Tab => {
                self.segment = self.segment.next();
                PickerOutcome::Pending
            }
            KeyCode::Up => {
                self.adjust(1);
                PickerOutcome::Pending
            }
            KeyCode::Down => {
                self.adjust(-1);
                PickerOutcome::Pending
            }
            _ => PickerOutcome::Pending,
        }
    }

    fn adjust(&mut self, delta: i64) {
        let updated = match self.segment {
            PickerSegment::Day => Some(self.value + Duration::days(delta)),
            PickerSegment::Month => shift_months(self.value, delta),
            PickerSegment::Year => shift_months(self.value, delta * 12),
            PickerSegment::Hour => Some(self.value + Duration::hours(delta)),
            PickerSegment::Minute => Some(self.value + Duration::minutes(delta)),
        };
        if let Some(value) = updated {
            self.value = value;
        }
    }
}

fn shift_months(value: DateTime<Utc>, delta: i64) -> Option<DateTime<Utc>> {
    let months = Months::new(delta.unsigned_abs() as u32);
    if delta >= 0 {
        value.checked_add_months(months)
    } else {
        value.checked_sub_months(months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crossterm::event::KeyModifiers;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 31, 10, 30, 0).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn adjusts_the_focused_segment() {
        let mut picker = DateTimePicker::open(Field::StartTime, base());
        assert_eq!(picker.handle_key(&key(KeyCode::Up)), PickerOutcome::Pending);
        assert_eq!(picker.value().format("%d").to_string(), "01");

        picker.handle_key(&key(KeyCode::Right));
        picker.handle_key(&key(KeyCode::Right));
        picker.handle_key(&key(KeyCode::Right));
        assert_eq!(picker.segment(), PickerSegment::Hour);
        picker.handle_key(&key(KeyCode::Down));
        assert_eq!(picker.value().format("%H").to_string(), "09");
    }

    #[test]
    fn month_step_clamps_to_valid_dates() {
        // Jan 31 + 1 month has no Feb 31; chrono clamps to Feb 28
        let mut picker = DateTimePicker::open(Field::StartTime, base());
        picker.handle_key(&key(KeyCode::Right));
        picker.handle_key(&key(KeyCode::Up));
        assert_eq!(picker.value().format("%m-%d").to_string(), "02-28");
    }

    #[test]
    fn confirm_returns_the_edited_instant() {
        let mut picker = DateTimePicker::open(Field::EndTime, base());
        picker.handle_key(&key(KeyCode::Up));
        match picker.handle_key(&key(KeyCode::Enter)) {
            PickerOutcome::Confirmed(instant) => {
                assert_eq!(instant, base() + Duration::days(1));
            }
            other => panic!("expected confirmation, got {other:?}"),
        }
    }

    #[test]
    fn cancellation_leaves_nothing_confirmed() {
        let mut field = TemporalField::new(Field::StartTime);
        let mut picker = DateTimePicker::open(field.field(), base());
        assert_eq!(picker.handle_key(&key(KeyCode::Esc)), PickerOutcome::Cancelled);
        assert_eq!(field.display_date(), "DD/MM");
        assert_eq!(field.display_time(), "HH:MM");

        field.confirm(base());
        assert_eq!(field.display_date(), "31/01");
        assert_eq!(field.display_time(), "10:30");
    }
}
