use dioxus::prelude::*;

use crate::context::use_journal;
use crate::strings::{editor_error, strings};
use crate::views::ModalOverlay;

/// Modal form for creating or editing an entry.
///
/// Every keystroke goes straight into the session's draft, so closing and reopening
/// the modal on the same entry starts from what is stored, not from stale input.
#[component]
pub fn EntryEditorModal() -> Element {
    let ctx = use_journal();
    let mut journal = ctx.journal;
    let locale = ctx.config.read().locale;
    let text = strings(locale);

    let (draft, editing, saving, error) = {
        let session = journal.read();
        let editor = session.editor();
        (
            editor.draft().clone(),
            editor.editing_id().is_some(),
            editor.is_saving(),
            editor.error().map(|e| editor_error(e, locale)),
        )
    };
    let heading = if editing { text.edit_entry } else { text.new_entry };

    rsx! {
        ModalOverlay {
            class: "editor-card",
            on_close: move |_| {
                if !journal.peek().editor().is_saving() {
                    journal.write().close_editor();
                }
            },
            form {
                class: "editor-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    ctx.submit();
                },
                h2 { class: "editor-heading", "{heading}" }

                label { class: "field",
                    span { "{text.title}" }
                    input {
                        r#type: "text",
                        value: "{draft.title}",
                        autofocus: true,
                        oninput: move |evt: FormEvent| {
                            journal.write().editor_mut().draft_mut().title = evt.value();
                        },
                    }
                }

                label { class: "field",
                    span { "{text.date}" }
                    input {
                        r#type: "date",
                        value: "{draft.display_date}",
                        oninput: move |evt: FormEvent| {
                            journal.write().editor_mut().draft_mut().display_date = evt.value();
                        },
                    }
                }

                label { class: "field",
                    span { "{text.image_url}" }
                    input {
                        r#type: "url",
                        value: "{draft.image_url}",
                        placeholder: "https://",
                        oninput: move |evt: FormEvent| {
                            journal.write().editor_mut().draft_mut().image_url = evt.value();
                        },
                    }
                }

                label { class: "field field--grow",
                    span { "{text.content}" }
                    textarea {
                        rows: "12",
                        value: "{draft.content}",
                        oninput: move |evt: FormEvent| {
                            journal.write().editor_mut().draft_mut().content = evt.value();
                        },
                    }
                }

                if let Some(message) = error {
                    p { class: "editor-error", role: "alert", "{message}" }
                }

                div {
                    class: "editor-actions",
                    button {
                        r#type: "button",
                        class: "button button--outline",
                        disabled: saving,
                        onclick: move |_| journal.write().close_editor(),
                        "{text.cancel}"
                    }
                    button {
                        r#type: "submit",
                        class: "button button--primary",
                        disabled: saving,
                        if saving { "{text.saving}" } else { "{text.save}" }
                    }
                }
            }
        }
    }
}
