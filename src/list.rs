use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use crate::domain::EventRecord;
use crate::store::{CollectionStore, ListQuery, StoreError};

/// Where the list screen currently stands with respect to the remote
/// collection.
#[derive(Debug)]
pub enum ListPhase {
    Loading,
    Loaded(Vec<EventRecord>),
    Errored,
}

/// Fetch-state machine for the list screen. One fetch is issued on
/// first activation; a failed fetch stays `Errored` until the user
/// asks for a refresh — there is no automatic retry.
pub struct ListSync {
    phase: ListPhase,
}

impl Default for ListSync {
    fn default() -> Self {
        Self::new()
    }
}

impl ListSync {
    pub fn new() -> Self {
        Self {
            phase: ListPhase::Loading,
        }
    }

    /// Issues one fetch on a worker thread; the outcome comes back as
    /// a message handed to `notify` and is applied via [`resolve`].
    ///
    /// [`resolve`]: ListSync::resolve
    pub fn begin_fetch<S, F>(store: Arc<S>, collection: String, notify: F)
    where
        S: CollectionStore + Send + Sync + 'static,
        F: FnOnce(Result<Vec<EventRecord>, StoreError>) + Send + 'static,
    {
        thread::spawn(move || {
            let result = store.list(&collection, &ListQuery::default());
            notify(result);
        });
    }

    pub fn resolve(&mut self, result: Result<Vec<EventRecord>, StoreError>) {
        self.phase = match result {
            Ok(records) => {
                debug!(count = records.len(), "event collection loaded");
                // store order is preserved as returned; no client-side
                // re-sorting
                ListPhase::Loaded(records)
            }
            Err(err) => {
                warn!(error = %err, "event collection fetch failed");
                ListPhase::Errored
            }
        };
    }

    /// Re-enters `Loading`; the caller is responsible for issuing the
    /// accompanying fetch.
    pub fn refresh(&mut self) {
        self.phase = ListPhase::Loading;
    }

    /// Optimistically places a freshly created record at the top of a
    /// loaded list so a successful submission is visible immediately.
    pub fn prepend(&mut self, record: EventRecord) {
        if let ListPhase::Loaded(records) = &mut self.phase {
            records.insert(0, record);
        }
    }

    pub fn phase(&self) -> &ListPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ListPhase::Loading)
    }

    pub fn records(&self) -> Option<&[EventRecord]> {
        match &self.phase {
            ListPhase::Loaded(records) => Some(records),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentMethod;
    use chrono::{TimeZone, Utc};

    fn record(id: &str) -> EventRecord {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();
        EventRecord {
            id: id.to_string(),
            collection_id: "events".to_string(),
            created_at: at,
            updated_at: at,
            name: format!("Event {id}"),
            activity_kind: "cafe".to_string(),
            guest_count: 2,
            payment_method: PaymentMethod::Free,
            description: String::new(),
            start_time: at,
            end_time: at + chrono::Duration::hours(1),
            location: "Somewhere".to_string(),
            map_url: None,
        }
    }

    #[test]
    fn starts_loading_and_resolves_to_loaded() {
        let mut list = ListSync::new();
        assert!(list.is_loading());
        list.resolve(Ok(vec![record("a"), record("b")]));
        let ids: Vec<&str> = list.records().unwrap().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn empty_result_is_loaded_not_errored() {
        let mut list = ListSync::new();
        list.resolve(Ok(Vec::new()));
        assert_eq!(list.records().unwrap().len(), 0);
    }

    #[test]
    fn failure_enters_errored_until_refreshed() {
        let mut list = ListSync::new();
        list.resolve(Err(StoreError::Http("timeout".to_string())));
        assert!(matches!(list.phase(), ListPhase::Errored));
        assert!(list.records().is_none());
        list.refresh();
        assert!(list.is_loading());
    }

    #[test]
    fn prepend_puts_the_new_record_first() {
        let mut list = ListSync::new();
        list.resolve(Ok(vec![record("a")]));
        list.prepend(record("b"));
        let ids: Vec<&str> = list.records().unwrap().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn prepend_is_ignored_while_not_loaded() {
        let mut list = ListSync::new();
        list.prepend(record("a"));
        assert!(list.is_loading());
    }
}
