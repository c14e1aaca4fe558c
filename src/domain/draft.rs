use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::EventPayload;

/// How the cost of an event is shared among its guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Free,
    SplitEvenly,
    SplitBill,
    HostPays,
    EntryFee,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Free,
        PaymentMethod::SplitEvenly,
        PaymentMethod::SplitBill,
        PaymentMethod::HostPays,
        PaymentMethod::EntryFee,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Free => "Free",
            PaymentMethod::SplitEvenly => "Split Evenly",
            PaymentMethod::SplitBill => "Split the Bill",
            PaymentMethod::HostPays => "Host Pays",
            PaymentMethod::EntryFee => "Entry Fee",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Free => "free",
            PaymentMethod::SplitEvenly => "split_evenly",
            PaymentMethod::SplitBill => "split_bill",
            PaymentMethod::HostPays => "host_pays",
            PaymentMethod::EntryFee => "entry_fee",
        }
    }
}

/// Identifies one editable field of the draft. Used as the key of the
/// validation error map and as the target of edit messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    ActivityKind,
    GuestCount,
    PaymentMethod,
    Description,
    StartTime,
    EndTime,
    Location,
    MapUrl,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::ActivityKind,
        Field::GuestCount,
        Field::PaymentMethod,
        Field::Description,
        Field::StartTime,
        Field::EndTime,
        Field::Location,
        Field::MapUrl,
    ];

    /// JSON pointer of the field inside the serialized payload.
    pub fn pointer(&self) -> &'static str {
        match self {
            Field::Name => "/name",
            Field::ActivityKind => "/activity_kind",
            Field::GuestCount => "/guest_count",
            Field::PaymentMethod => "/payment_method",
            Field::Description => "/description",
            Field::StartTime => "/start_time",
            Field::EndTime => "/end_time",
            Field::Location => "/location",
            Field::MapUrl => "/map_url",
        }
    }

    pub fn from_pointer(pointer: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.pointer() == pointer)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Event Name",
            Field::ActivityKind => "Activity",
            Field::GuestCount => "Number of Guests",
            Field::PaymentMethod => "Who's Paying?",
            Field::Description => "Description",
            Field::StartTime => "From",
            Field::EndTime => "To",
            Field::Location => "Location",
            Field::MapUrl => "Map URL (Optional)",
        }
    }
}

/// A single `(field, value)` edit message. Every mutation of the draft
/// flows through one of these; widgets never hold field state of their
/// own.
#[derive(Debug, Clone)]
pub enum FieldEdit {
    Name(String),
    ActivityKind(String),
    GuestCount(i64),
    PaymentMethod(PaymentMethod),
    Description(String),
    StartTime(DateTime<Utc>),
    EndTime(DateTime<Utc>),
    Location(String),
    MapUrl(String),
}

impl FieldEdit {
    pub fn field(&self) -> Field {
        match self {
            FieldEdit::Name(_) => Field::Name,
            FieldEdit::ActivityKind(_) => Field::ActivityKind,
            FieldEdit::GuestCount(_) => Field::GuestCount,
            FieldEdit::PaymentMethod(_) => Field::PaymentMethod,
            FieldEdit::Description(_) => Field::Description,
            FieldEdit::StartTime(_) => Field::StartTime,
            FieldEdit::EndTime(_) => Field::EndTime,
            FieldEdit::Location(_) => Field::Location,
            FieldEdit::MapUrl(_) => Field::MapUrl,
        }
    }
}

/// An unpersisted, user-editable event candidate. Consumed exactly once
/// by a successful submission; retained verbatim when submission fails.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub name: String,
    pub activity_kind: String,
    pub guest_count: i64,
    pub payment_method: PaymentMethod,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub map_url: String,
}

impl EventDraft {
    /// Fresh draft with the fixed defaults used every time the overlay
    /// opens on a clean slate.
    pub fn with_defaults(now: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            activity_kind: String::new(),
            guest_count: 1,
            payment_method: PaymentMethod::Free,
            description: String::new(),
            start_time: now,
            end_time: now,
            location: String::new(),
            map_url: String::new(),
        }
    }

    /// Wire form of the draft: instants become RFC 3339 text and a
    /// blank map URL becomes an explicit null.
    pub fn to_payload(&self) -> EventPayload {
        let map_url = self.map_url.trim();
        EventPayload {
            name: self.name.clone(),
            activity_kind: self.activity_kind.clone(),
            guest_count: self.guest_count,
            payment_method: self.payment_method,
            description: self.description.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location.clone(),
            map_url: if map_url.is_empty() {
                None
            } else {
                Some(map_url.to_string())
            },
        }
    }

    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Name(value) => self.name = value,
            FieldEdit::ActivityKind(value) => self.activity_kind = value,
            FieldEdit::GuestCount(value) => self.guest_count = value,
            FieldEdit::PaymentMethod(value) => self.payment_method = value,
            FieldEdit::Description(value) => self.description = value,
            FieldEdit::StartTime(value) => self.start_time = value,
            FieldEdit::EndTime(value) => self.end_time = value,
            FieldEdit::Location(value) => self.location = value,
            FieldEdit::MapUrl(value) => self.map_url = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 18, 0, 0).unwrap()
    }

    #[test]
    fn defaults_match_the_fresh_overlay_state() {
        let draft = EventDraft::with_defaults(now());
        assert!(draft.name.is_empty());
        assert!(draft.activity_kind.is_empty());
        assert_eq!(draft.guest_count, 1);
        assert_eq!(draft.payment_method, PaymentMethod::Free);
        assert_eq!(draft.start_time, draft.end_time);
    }

    #[test]
    fn blank_map_url_serializes_to_null() {
        let mut draft = EventDraft::with_defaults(now());
        draft.map_url = "   ".to_string();
        let value = serde_json::to_value(draft.to_payload()).unwrap();
        assert!(value["map_url"].is_null());
    }

    #[test]
    fn instants_serialize_as_iso_8601_text() {
        let draft = EventDraft::with_defaults(now());
        let value = serde_json::to_value(draft.to_payload()).unwrap();
        let start = value["start_time"].as_str().unwrap();
        assert!(start.starts_with("2026-03-14T18:00:00"));
    }

    #[test]
    fn edits_route_to_the_named_field() {
        let mut draft = EventDraft::with_defaults(now());
        draft.apply(FieldEdit::Location("Riverside Park".to_string()));
        draft.apply(FieldEdit::GuestCount(4));
        assert_eq!(draft.location, "Riverside Park");
        assert_eq!(draft.guest_count, 4);
        assert_eq!(FieldEdit::GuestCount(4).field(), Field::GuestCount);
    }
}
