mod options;
mod picker;
mod runtime;
mod status;
mod terminal;

pub use options::UiOptions;
pub use picker::{DateTimePicker, PickerOutcome, PickerSegment, TemporalField};
pub use runtime::{AppEvent, EventsApp, FormFocus};
pub use status::StatusLine;
pub use terminal::TerminalGuard;
