use anyhow::{Context, Result};
use indexmap::IndexMap;
use jsonschema::{Validator, validator_for};
use serde_json::{Value, json};
use url::Url;

use crate::catalog::ActivityCatalog;
use crate::domain::{EventDraft, Field};

/// Field name → human-readable message, in canonical field order. An
/// empty map means the draft is submittable.
pub type ErrorMap = IndexMap<Field, String>;

/// Declarative validation of an [`EventDraft`]. Per-field constraints
/// live in a JSON Schema compiled once at startup (with the activity
/// catalog baked into the enum); the cross-field temporal rule and the
/// map-URL rule are evaluated beside it and attached to their fields.
pub struct DraftValidator {
    validator: Validator,
}

impl DraftValidator {
    pub fn new(catalog: &ActivityCatalog) -> Result<Self> {
        let schema = draft_schema(catalog);
        let validator = validator_for(&schema).context("failed to compile draft schema")?;
        Ok(Self { validator })
    }

    /// Pure and total: every applicable rule is evaluated, every
    /// violated one reported, and nothing is thrown. The temporal rule
    /// is independent of the single-field rules and lands on the end
    /// time's entry.
    pub fn validate(&self, draft: &EventDraft) -> ErrorMap {
        let value = serde_json::to_value(draft.to_payload()).unwrap_or(Value::Null);
        let mut violated = Vec::new();
        for error in self.validator.iter_errors(&value) {
            let pointer = error.instance_path.to_string();
            if let Some(field) = Field::from_pointer(&pointer)
                && !violated.contains(&field)
            {
                violated.push(field);
            }
        }

        if draft.end_time <= draft.start_time && !violated.contains(&Field::EndTime) {
            violated.push(Field::EndTime);
        }
        let map_url = draft.map_url.trim();
        if !map_url.is_empty() && Url::parse(map_url).is_err() && !violated.contains(&Field::MapUrl)
        {
            violated.push(Field::MapUrl);
        }

        let mut errors = ErrorMap::new();
        for field in Field::ALL {
            if violated.contains(&field) {
                errors.insert(field, message_for(field).to_string());
            }
        }
        errors
    }
}

fn draft_schema(catalog: &ActivityCatalog) -> Value {
    let activities: Vec<&str> = catalog.values().collect();
    json!({
        "type": "object",
        "required": [
            "name",
            "activity_kind",
            "guest_count",
            "payment_method",
            "start_time",
            "end_time",
            "location"
        ],
        "properties": {
            "name": {"type": "string", "minLength": 10},
            "activity_kind": {"type": "string", "enum": activities},
            "guest_count": {"type": "integer", "minimum": 1, "maximum": 7},
            "payment_method": {
                "type": "string",
                "enum": ["free", "split_evenly", "split_bill", "host_pays", "entry_fee"]
            },
            "description": {"type": "string", "maxLength": 200},
            "start_time": {"type": "string"},
            "end_time": {"type": "string"},
            "location": {"type": "string", "minLength": 1}
        }
    })
}

fn message_for(field: Field) -> &'static str {
    match field {
        Field::Name => "Name must be at least 10 characters",
        Field::ActivityKind => "Choose an activity",
        Field::GuestCount => "Guest count must be between 1 and 7",
        Field::PaymentMethod => "Choose a payment option",
        Field::Description => "Description must be 200 characters or less",
        Field::StartTime => "Start time is required",
        Field::EndTime => "End time must be after start time",
        Field::Location => "Location is required",
        Field::MapUrl => "Map URL must be a valid URL",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentMethod;
    use chrono::{Duration, TimeZone, Utc};

    fn validator() -> DraftValidator {
        DraftValidator::new(&ActivityCatalog::builtin()).expect("schema compiles")
    }

    fn valid_draft() -> EventDraft {
        let start = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        EventDraft {
            name: "Morning Trek".to_string(),
            activity_kind: "hiking".to_string(),
            guest_count: 4,
            payment_method: PaymentMethod::Free,
            description: "A walk".to_string(),
            start_time: start,
            end_time: start + Duration::hours(1),
            location: "Park".to_string(),
            map_url: String::new(),
        }
    }

    #[test]
    fn a_satisfying_draft_produces_no_errors() {
        assert!(validator().validate(&valid_draft()).is_empty());
    }

    #[test]
    fn short_name_is_reported_on_the_name_field() {
        let mut draft = valid_draft();
        draft.name = "Trek".to_string();
        let errors = validator().validate(&draft);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&Field::Name));
    }

    #[test]
    fn unknown_activity_is_rejected() {
        let mut draft = valid_draft();
        draft.activity_kind = "skydiving".to_string();
        let errors = validator().validate(&draft);
        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), [Field::ActivityKind]);
    }

    #[test]
    fn guest_count_outside_range_is_rejected() {
        let mut draft = valid_draft();
        draft.guest_count = 0;
        assert!(validator().validate(&draft).contains_key(&Field::GuestCount));
        draft.guest_count = 8;
        assert!(validator().validate(&draft).contains_key(&Field::GuestCount));
    }

    #[test]
    fn overlong_description_is_rejected() {
        let mut draft = valid_draft();
        draft.description = "x".repeat(201);
        let errors = validator().validate(&draft);
        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), [Field::Description]);
    }

    #[test]
    fn empty_location_is_rejected() {
        let mut draft = valid_draft();
        draft.location = String::new();
        assert!(validator().validate(&draft).contains_key(&Field::Location));
    }

    #[test]
    fn end_before_start_lands_on_the_end_time_entry() {
        let mut draft = valid_draft();
        draft.end_time = draft.start_time - Duration::seconds(60);
        let errors = validator().validate(&draft);
        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), [Field::EndTime]);
    }

    #[test]
    fn end_equal_to_start_is_not_strictly_after() {
        let mut draft = valid_draft();
        draft.end_time = draft.start_time;
        assert!(validator().validate(&draft).contains_key(&Field::EndTime));
    }

    #[test]
    fn temporal_rule_is_independent_of_other_violations() {
        let mut draft = valid_draft();
        draft.name = "Trek".to_string();
        draft.end_time = draft.start_time - Duration::seconds(1);
        let errors = validator().validate(&draft);
        assert!(errors.contains_key(&Field::Name));
        assert!(errors.contains_key(&Field::EndTime));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn malformed_map_url_is_rejected_but_blank_is_fine() {
        let mut draft = valid_draft();
        draft.map_url = "not a url".to_string();
        assert!(validator().validate(&draft).contains_key(&Field::MapUrl));
        draft.map_url = "https://maps.example.com/spot/12".to_string();
        assert!(validator().validate(&draft).is_empty());
        draft.map_url = String::new();
        assert!(validator().validate(&draft).is_empty());
    }

    #[test]
    fn errors_come_back_in_canonical_field_order() {
        let mut draft = valid_draft();
        draft.location = String::new();
        draft.name = "x".to_string();
        draft.activity_kind = String::new();
        let fields: Vec<Field> = validator().validate(&draft).keys().copied().collect();
        assert_eq!(fields, [Field::Name, Field::ActivityKind, Field::Location]);
    }
}
