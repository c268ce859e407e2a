//! jcat-view: presentation adapter for the journal catalog.
//!
//! Turns records into [`Card`]s and [`Detail`]s, renders them as HTML
//! fragments ([`html`]) or terminal text ([`text`]), and keeps the browse
//! [`Session`] that produces queries. Nothing here performs I/O.

pub mod card;
pub mod detail;
pub mod html;
pub mod session;
pub mod status;
pub mod text;

pub use card::{Card, Tag};
pub use detail::{Detail, DetailRow};
pub use session::{Session, Ticket};
pub use status::Status;

use jcat_core::SearchPage;

/// Cards for every record of a served page.
pub fn cards(page: &SearchPage, image_base: &str) -> Vec<Card> {
    page.items
        .iter()
        .map(|r| Card::from_record(r, image_base))
        .collect()
}

/// 1-based position in the full result of the first record on `page`.
pub fn first_number(page: &SearchPage) -> usize {
    (page.page.max(1) - 1) * page.page_size + 1
}
