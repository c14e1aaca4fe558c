mod cards;
mod chips;
mod footer;
mod form;
mod layout;
mod picker;

pub use cards::render_cards;
pub use footer::render_footer;
pub use form::render_form;
pub use picker::render_picker;
