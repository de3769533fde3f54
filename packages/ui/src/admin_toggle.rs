//! Admin mode toggle and its password prompt.

use dioxus::prelude::*;
use journal::GateOutcome;

use crate::context::use_journal;
use crate::icons::{FaLock, FaLockOpen};
use crate::strings::strings;
use crate::views::ModalOverlay;
use crate::Icon;

/// Lock button in the page header. Asks for the password when turning admin on.
#[component]
pub fn AdminToggle() -> Element {
    let ctx = use_journal();
    let mut journal = ctx.journal;
    let text = strings(ctx.config.read().locale);
    let mut prompting = use_signal(|| false);
    let active = journal.read().is_admin();

    let label = if active { text.admin_on } else { text.admin_off };

    rsx! {
        button {
            class: if active { "icon-button admin-toggle admin-toggle--on" } else { "icon-button admin-toggle" },
            title: label,
            aria_label: label,
            onclick: move |_| {
                if journal.peek().needs_prompt() {
                    prompting.set(true);
                } else {
                    journal.write().toggle_admin(None);
                }
            },
            if active {
                Icon { icon: FaLockOpen, width: 16, height: 16 }
            } else {
                Icon { icon: FaLock, width: 16, height: 16 }
            }
        }
        if prompting() {
            PasswordDialog {
                on_submit: move |password: String| {
                    let outcome = journal.write().toggle_admin(Some(&password));
                    if outcome != GateOutcome::Rejected {
                        prompting.set(false);
                    }
                },
                on_cancel: move |_| {
                    journal.write().toggle_admin(None);
                    prompting.set(false);
                },
            }
        }
    }
}

#[component]
fn PasswordDialog(on_submit: EventHandler<String>, on_cancel: EventHandler<()>) -> Element {
    let ctx = use_journal();
    let text = strings(ctx.config.read().locale);
    let mut password = use_signal(String::new);

    rsx! {
        ModalOverlay {
            class: "password-card",
            on_close: move |_| on_cancel.call(()),
            form {
                class: "password-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    on_submit.call(password());
                    password.set(String::new());
                },
                label { class: "field",
                    span { "{text.password}" }
                    input {
                        r#type: "password",
                        autofocus: true,
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                }
                div {
                    class: "editor-actions",
                    button {
                        r#type: "button",
                        class: "button button--outline",
                        onclick: move |_| on_cancel.call(()),
                        "{text.cancel}"
                    }
                    button {
                        r#type: "submit",
                        class: "button button--primary",
                        "{text.unlock}"
                    }
                }
            }
        }
    }
}
