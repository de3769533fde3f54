use dioxus::prelude::*;
use journal::format_long;

use crate::context::use_journal;
use crate::entry_card::EntryImage;
use crate::icons::{FaPen, FaTrash, FaXmark};
use crate::strings::strings;
use crate::views::ModalOverlay;
use crate::Icon;

/// Full view of the entry open in the reader.
#[component]
pub fn EntryReaderModal() -> Element {
    let ctx = use_journal();
    let mut journal = ctx.journal;
    let config = ctx.config.read().clone();
    let text = strings(config.locale);

    let Some(entry) = journal.read().reader().cloned() else {
        return rsx! {};
    };
    let admin = journal.read().is_admin();
    let date = format_long(&entry.display_date, config.locale);
    let image = entry.image_or(&config.default_image_url).to_string();
    let edit_id = entry.id.clone();
    let delete_id = entry.id.clone();

    rsx! {
        ModalOverlay {
            class: "reader-card",
            on_close: move |_| journal.write().close_reader(),
            EntryImage {
                key: "{image}",
                src: image.clone(),
                fallback: config.default_image_url.clone(),
                alt: entry.title.clone(),
            }
            article {
                class: "reader-body",
                time { class: "entry-date", datetime: "{entry.display_date}", "{date}" }
                h2 { class: "reader-title", "{entry.title}" }
                div { class: "reader-content", "{entry.content}" }
            }
            div {
                class: "reader-actions",
                if admin {
                    button {
                        class: "button button--outline",
                        onclick: move |_| {
                            let mut session = journal.write();
                            if let Err(e) = session.start_edit(&edit_id) {
                                tracing::warn!("cannot edit entry: {e}");
                            }
                        },
                        Icon { icon: FaPen, width: 12, height: 12 }
                        " {text.edit}"
                    }
                    button {
                        class: "button button--danger",
                        onclick: move |_| {
                            if let Err(e) = journal.write().ask_delete(&delete_id) {
                                tracing::warn!("cannot delete entry: {e}");
                            }
                        },
                        Icon { icon: FaTrash, width: 12, height: 12 }
                        " {text.delete}"
                    }
                }
                button {
                    class: "button button--ghost",
                    title: text.close,
                    onclick: move |_| journal.write().close_reader(),
                    Icon { icon: FaXmark, width: 14, height: 14 }
                }
            }
        }
    }
}
