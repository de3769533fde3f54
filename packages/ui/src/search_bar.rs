use dioxus::prelude::*;

use crate::icons::FaMagnifyingGlass;
use crate::Icon;

#[component]
pub fn SearchBar(query: Signal<String>, placeholder: String) -> Element {
    let mut query = query;

    rsx! {
        label {
            class: "search-bar",
            Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
            input {
                r#type: "search",
                placeholder: "{placeholder}",
                value: "{query}",
                oninput: move |evt: FormEvent| query.set(evt.value()),
            }
        }
    }
}
