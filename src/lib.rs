#![deny(rust_2018_idioms)]

pub mod app;
pub mod catalog;
pub mod domain;
pub mod form;
pub mod list;
pub mod presentation;
pub mod store;

pub mod prelude {
    pub use crate::app::{EventsApp, UiOptions};
    pub use crate::catalog::ActivityCatalog;
    pub use crate::domain::{EventDraft, EventRecord};
    pub use crate::store::{CollectionStore, HttpStore, StoreConfig};
}
