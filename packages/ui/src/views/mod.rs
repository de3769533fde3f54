mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod journal_page;
pub use journal_page::JournalPage;
