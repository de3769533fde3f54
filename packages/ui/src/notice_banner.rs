use std::time::Duration;

use dioxus::prelude::*;

use crate::context::use_journal;
use crate::icons::FaXmark;
use crate::Icon;

const NOTICE_TIMEOUT: Duration = Duration::from_secs(6);

/// Dismissible message strip. Clears itself after a few seconds unless replaced.
#[component]
pub fn NoticeBanner() -> Element {
    let ctx = use_journal();
    let mut journal = ctx.journal;
    let locale = ctx.config.read().locale;
    let notice = use_memo(move || journal.read().notice().cloned());

    use_effect(move || {
        let Some(shown) = notice() else {
            return;
        };
        spawn(async move {
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::sleep(NOTICE_TIMEOUT).await;
            #[cfg(not(target_arch = "wasm32"))]
            tokio::time::sleep(NOTICE_TIMEOUT).await;

            if journal.peek().notice() == Some(&shown) {
                journal.write().dismiss_notice();
            }
        });
    });

    let Some(notice) = notice() else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "notice",
            role: "status",
            span { "{notice.text(locale)}" }
            button {
                class: "icon-button",
                onclick: move |_| journal.write().dismiss_notice(),
                Icon { icon: FaXmark, width: 12, height: 12 }
            }
        }
    }
}
