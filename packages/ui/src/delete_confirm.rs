use dioxus::prelude::*;

use crate::context::use_journal;
use crate::strings::strings;
use crate::views::ModalOverlay;

/// Second step of a delete. Shown while the session holds a pending delete.
#[component]
pub fn DeleteConfirm() -> Element {
    let ctx = use_journal();
    let mut journal = ctx.journal;
    let text = strings(ctx.config.read().locale);
    let busy = journal.read().is_deleting();

    rsx! {
        ModalOverlay {
            class: "confirm-card",
            on_close: move |_| journal.write().cancel_delete(),
            p { class: "confirm-message", "{text.confirm_delete}" }
            div {
                class: "editor-actions",
                button {
                    class: "button button--outline",
                    onclick: move |_| journal.write().cancel_delete(),
                    "{text.cancel}"
                }
                button {
                    class: "button button--danger",
                    disabled: busy,
                    onclick: move |_| ctx.confirm_delete(),
                    "{text.delete}"
                }
            }
        }
    }
}
