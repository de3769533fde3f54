//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod backend;
pub use backend::{open_store, AppStore};

mod context;
pub use context::{use_journal, JournalContext, JournalProvider, Session};

pub mod strings;

pub mod views;

pub const JOURNAL_CSS: Asset = asset!("/assets/journal.css");

mod entry_card;
pub use entry_card::{EntryCard, EntryImage, Gallery};

mod entry_editor;
pub use entry_editor::EntryEditorModal;

mod entry_reader;
pub use entry_reader::EntryReaderModal;

mod admin_toggle;
pub use admin_toggle::AdminToggle;

mod delete_confirm;
pub use delete_confirm::DeleteConfirm;

mod notice_banner;
pub use notice_banner::NoticeBanner;

mod search_bar;
pub use search_bar::SearchBar;
