mod slide;
mod store;
mod submit;
mod validate;

pub use slide::{CLOSED_OFFSET, SLIDE_DURATION, Slide, SlidePhase};
pub use store::DraftStore;
pub use submit::{SubmitError, Submitter};
pub use validate::{DraftValidator, ErrorMap};
