use dioxus::prelude::*;
use journal::{today, ListState};

use crate::admin_toggle::AdminToggle;
use crate::context::use_journal;
use crate::delete_confirm::DeleteConfirm;
use crate::entry_card::Gallery;
use crate::entry_editor::EntryEditorModal;
use crate::entry_reader::EntryReaderModal;
use crate::icons::FaPlus;
use crate::notice_banner::NoticeBanner;
use crate::search_bar::SearchBar;
use crate::strings::strings;
use crate::Icon;

/// The journal page: header, search, gallery, and whichever modal is open.
#[component]
pub fn JournalPage() -> Element {
    let ctx = use_journal();
    let mut journal = ctx.journal;
    let config = ctx.config.read().clone();
    let text = strings(config.locale);
    let query = use_signal(String::new);

    let session = journal.read();
    let admin = session.is_admin();
    let editor_open = session.editor().is_open();
    let reader_open = session.reader().is_some();
    let confirming = session.pending_delete().is_some();
    let entries: Vec<_> = session
        .visible_entries(&query())
        .into_iter()
        .cloned()
        .collect();
    let status = match session.list() {
        ListState::Loading => Some(text.loading),
        ListState::Failed(_) => Some(text.failed),
        ListState::Ready(all) if all.is_empty() => Some(text.empty),
        ListState::Ready(_) if entries.is_empty() => Some(text.no_matches),
        ListState::Ready(_) => None,
    };
    drop(session);

    let memory_only = ctx.store.read().as_ref().is_some_and(|s| !s.is_persistent());

    rsx! {
        header {
            class: "page-header",
            div {
                class: "page-heading",
                h1 { "{config.title}" }
                if !config.author.is_empty() {
                    p { class: "page-author", "{config.author}" }
                }
            }
            div {
                class: "page-tools",
                SearchBar { query, placeholder: text.search.to_string() }
                if admin {
                    button {
                        class: "button button--primary",
                        onclick: move |_| {
                            if let Err(e) = journal.write().start_new(today()) {
                                tracing::warn!("cannot start a new entry: {e}");
                            }
                        },
                        Icon { icon: FaPlus, width: 12, height: 12 }
                        " {text.new_entry}"
                    }
                }
                AdminToggle {}
            }
        }

        NoticeBanner {}

        if memory_only {
            p { class: "page-hint", "{text.memory_only}" }
        }

        main {
            class: "page-main",
            if let Some(message) = status {
                p { class: "gallery-status", "{message}" }
            } else {
                Gallery {
                    entries,
                    locale: config.locale,
                    default_image: config.default_image_url.clone(),
                    admin,
                    on_open: move |id: String| {
                        let _ = journal.write().open_reader(&id);
                    },
                    on_edit: move |id: String| {
                        if let Err(e) = journal.write().start_edit(&id) {
                            tracing::warn!("cannot edit entry: {e}");
                        }
                    },
                    on_delete: move |id: String| {
                        if let Err(e) = journal.write().ask_delete(&id) {
                            tracing::warn!("cannot delete entry: {e}");
                        }
                    },
                }
            }
        }

        if reader_open {
            EntryReaderModal {}
        }
        if editor_open {
            EntryEditorModal {}
        }
        if confirming {
            DeleteConfirm {}
        }
    }
}
