use dioxus::prelude::*;
use journal::{format_long, Locale};
use store::Entry;

use crate::icons::{FaPen, FaTrash};
use crate::strings::strings;
use crate::Icon;

/// Cover image that swaps to `fallback` the first time it fails to load.
#[component]
pub fn EntryImage(src: String, fallback: String, alt: String) -> Element {
    let mut broken = use_signal(|| false);
    let shown = if broken() { fallback } else { src };

    rsx! {
        img {
            class: "entry-image",
            src: "{shown}",
            alt: "{alt}",
            loading: "lazy",
            onerror: move |_| {
                if !broken() {
                    tracing::debug!("entry image failed to load, using default");
                    broken.set(true);
                }
            },
        }
    }
}

/// One tile in the gallery.
#[component]
pub fn EntryCard(
    entry: Entry,
    locale: Locale,
    default_image: String,
    admin: bool,
    on_open: EventHandler<String>,
    on_edit: EventHandler<String>,
    on_delete: EventHandler<String>,
) -> Element {
    let text = strings(locale);
    let date = format_long(&entry.display_date, locale);
    let image = entry.image_or(&default_image).to_string();
    let open_id = entry.id.clone();
    let edit_id = entry.id.clone();
    let delete_id = entry.id.clone();

    rsx! {
        article {
            class: "entry-card",
            onclick: move |_| on_open.call(open_id.clone()),
            EntryImage {
                key: "{image}",
                src: image.clone(),
                fallback: default_image.clone(),
                alt: entry.title.clone(),
            }
            div {
                class: "entry-card-body",
                time { class: "entry-date", datetime: "{entry.display_date}", "{date}" }
                h2 { class: "entry-title", "{entry.title}" }
                p { class: "entry-excerpt", "{entry.content}" }
            }
            if admin {
                div {
                    class: "entry-card-actions",
                    onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                    button {
                        class: "icon-button",
                        title: text.edit,
                        onclick: move |_| on_edit.call(edit_id.clone()),
                        Icon { icon: FaPen, width: 14, height: 14 }
                    }
                    button {
                        class: "icon-button icon-button--danger",
                        title: text.delete,
                        onclick: move |_| on_delete.call(delete_id.clone()),
                        Icon { icon: FaTrash, width: 14, height: 14 }
                    }
                }
            }
        }
    }
}

/// The grid of entry cards, in the order given.
#[component]
pub fn Gallery(
    entries: Vec<Entry>,
    locale: Locale,
    default_image: String,
    admin: bool,
    on_open: EventHandler<String>,
    on_edit: EventHandler<String>,
    on_delete: EventHandler<String>,
) -> Element {
    rsx! {
        section {
            class: "gallery",
            for entry in entries {
                EntryCard {
                    key: "{entry.id}",
                    entry: entry.clone(),
                    locale,
                    default_image: default_image.clone(),
                    admin,
                    on_open,
                    on_edit,
                    on_delete,
                }
            }
        }
    }
}
