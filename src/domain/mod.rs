mod draft;
mod record;

pub use draft::{EventDraft, Field, FieldEdit, PaymentMethod};
pub use record::{DocumentsPage, EventPayload, EventRecord};
