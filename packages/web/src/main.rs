#[cfg(not(target_arch = "wasm32"))]
mod cli;

use std::process::ExitCode;

use dioxus::prelude::*;

use journal::JournalConfig;
use ui::views::JournalPage;
use ui::JournalProvider;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use clap::Parser;

        if let Some(code) = cli::Cli::parse().run() {
            return code;
        }
    }

    dioxus::launch(App);
    ExitCode::SUCCESS
}

/// Resolve configuration for this platform, falling back to a read-only journal.
fn load_config() -> JournalConfig {
    #[cfg(target_arch = "wasm32")]
    let loaded = JournalConfig::from_build_env();
    #[cfg(not(target_arch = "wasm32"))]
    let loaded = JournalConfig::from_env();

    loaded.unwrap_or_else(|e| {
        tracing::error!("invalid configuration, starting read-only with defaults: {e}");
        JournalConfig::default()
    })
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: ui::JOURNAL_CSS }
        document::Title { "{config.title}" }

        JournalProvider {
            config: config.clone(),
            Router::<Route> {}
        }
    }
}

#[component]
fn Home() -> Element {
    rsx! {
        JournalPage {}
    }
}
