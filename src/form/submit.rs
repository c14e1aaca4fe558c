use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{EventDraft, EventRecord};
use crate::store::{CollectionStore, StoreError};

use super::validate::{DraftValidator, ErrorMap};

#[derive(Debug, Error)]
pub enum SubmitError {
    /// A submission is already outstanding for this overlay instance.
    /// Surfaced as a disabled-state hint, never an alert.
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    /// The draft violates its invariants; nothing reached the network.
    #[error("draft failed validation")]
    ValidationFailed(ErrorMap),
    /// The remote write failed; the draft is preserved for retry.
    #[error("remote write failed: {0}")]
    RemoteWriteFailed(#[from] StoreError),
}

/// Orchestrates validate → serialize → remote write for one draft
/// overlay instance, with an at-most-one-concurrent-submission guard.
/// Cloning shares the store and the guard, so a clone handed to a
/// worker thread still excludes submissions started from the UI side.
pub struct Submitter<S> {
    store: Arc<S>,
    collection: String,
    validator: Arc<DraftValidator>,
    in_flight: Arc<AtomicBool>,
}

impl<S> Clone for Submitter<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            collection: self.collection.clone(),
            validator: Arc::clone(&self.validator),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<S: CollectionStore + Send + Sync + 'static> Submitter<S> {
    pub fn new(store: Arc<S>, collection: impl Into<String>, validator: Arc<DraftValidator>) -> Self {
        Self {
            store,
            collection: collection.into(),
            validator,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Runs the full pipeline on the calling thread. The guard is
    /// checked first and released on every exit path.
    pub fn submit(&self, draft: &EventDraft) -> Result<EventRecord, SubmitError> {
        let _guard = self.acquire()?;
        self.run(draft)
    }

    /// Same pipeline, but the guard is claimed synchronously on the
    /// calling thread while validation and the remote write run on a
    /// worker. A second attempt while the worker is busy is rejected
    /// here, before anything is spawned.
    pub fn submit_in_background<F>(&self, draft: EventDraft, notify: F) -> Result<(), SubmitError>
    where
        F: FnOnce(Result<EventRecord, SubmitError>) + Send + 'static,
    {
        let guard = self.acquire()?;
        let submitter = self.clone();
        thread::spawn(move || {
            let result = submitter.run(&draft);
            drop(guard);
            notify(result);
        });
        Ok(())
    }

    fn acquire(&self) -> Result<InFlightGuard, SubmitError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("submission rejected: already in flight");
            return Err(SubmitError::AlreadySubmitting);
        }
        Ok(InFlightGuard(Arc::clone(&self.in_flight)))
    }

    fn run(&self, draft: &EventDraft) -> Result<EventRecord, SubmitError> {
        // validation always completes before any network effect
        let errors = self.validator.validate(draft);
        if !errors.is_empty() {
            debug!(issues = errors.len(), "submission rejected by validation");
            return Err(SubmitError::ValidationFailed(errors));
        }

        let payload = draft.to_payload();
        match self.store.create(&self.collection, &payload) {
            Ok(record) => {
                debug!(id = %record.id, "event created");
                Ok(record)
            }
            Err(err) => {
                warn!(error = %err, "remote write failed");
                Err(SubmitError::RemoteWriteFailed(err))
            }
        }
    }
}

/// Releases the in-flight flag when dropped, so failures and panics in
/// the pipeline cannot leave the guard stuck.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
