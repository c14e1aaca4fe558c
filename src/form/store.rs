use std::sync::Arc;

use chrono::Utc;

use crate::domain::{EventDraft, Field, FieldEdit, PaymentMethod};

use super::validate::{DraftValidator, ErrorMap};

/// Holds the draft being edited plus its current error map. All edits
/// arrive as [`FieldEdit`] messages and are consumed here, once; chip
/// highlighting and the rest of the derived UI read the watched values
/// back out of the store instead of tracking selection on their own.
pub struct DraftStore {
    draft: EventDraft,
    errors: ErrorMap,
    validator: Arc<DraftValidator>,
    dirty: bool,
}

impl DraftStore {
    pub fn new(validator: Arc<DraftValidator>) -> Self {
        Self {
            draft: EventDraft::with_defaults(Utc::now()),
            errors: ErrorMap::new(),
            validator,
            dirty: false,
        }
    }

    /// Applies one edit. Updating state is the only side effect;
    /// callers opt into re-validation separately.
    pub fn apply(&mut self, edit: FieldEdit) {
        self.draft.apply(edit);
        self.dirty = true;
    }

    pub fn revalidate(&mut self) {
        self.errors = self.validator.validate(&self.draft);
    }

    /// Replaces the error map with one produced elsewhere (the
    /// submission pipeline re-validates unconditionally and reports
    /// back through this).
    pub fn set_errors(&mut self, errors: ErrorMap) {
        self.errors = errors;
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    // Watched values: the single source of truth for which chip in
    // each group renders as selected.

    pub fn selected_activity(&self) -> &str {
        &self.draft.activity_kind
    }

    pub fn selected_guest_count(&self) -> i64 {
        self.draft.guest_count
    }

    pub fn selected_payment(&self) -> PaymentMethod {
        self.draft.payment_method
    }

    /// True once any edit has been applied since the last reset.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Discards the draft after a successful submission; the next
    /// overlay open starts from fixed defaults.
    pub fn reset(&mut self) {
        self.draft = EventDraft::with_defaults(Utc::now());
        self.errors = ErrorMap::new();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ActivityCatalog;

    fn store() -> DraftStore {
        let validator = DraftValidator::new(&ActivityCatalog::builtin()).unwrap();
        DraftStore::new(Arc::new(validator))
    }

    #[test]
    fn watched_values_follow_the_draft() {
        let mut store = store();
        assert_eq!(store.selected_guest_count(), 1);
        assert_eq!(store.selected_payment(), PaymentMethod::Free);
        store.apply(FieldEdit::ActivityKind("cafe".to_string()));
        store.apply(FieldEdit::GuestCount(3));
        assert_eq!(store.selected_activity(), "cafe");
        assert_eq!(store.selected_guest_count(), 3);
    }

    #[test]
    fn apply_does_not_validate_until_asked() {
        let mut store = store();
        store.apply(FieldEdit::Name("x".to_string()));
        assert!(store.errors().is_empty());
        store.revalidate();
        assert!(store.error_for(Field::Name).is_some());
    }

    #[test]
    fn reset_returns_to_defaults_and_clears_errors() {
        let mut store = store();
        store.apply(FieldEdit::Location("Docks".to_string()));
        store.revalidate();
        assert!(store.is_dirty());
        store.reset();
        assert!(!store.is_dirty());
        assert!(store.errors().is_empty());
        assert_eq!(store.selected_guest_count(), 1);
    }
}
