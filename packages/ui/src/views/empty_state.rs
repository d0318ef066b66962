use dioxus::prelude::*;

/// Placeholder for a list or panel with nothing to show.
#[component]
pub fn EmptyState(title: String, #[props(default = "".to_string())] hint: String) -> Element {
    rsx! {
        div {
            class: "empty-state",
            h2 { "{title}" }
            if !hint.is_empty() {
                p { "{hint}" }
            }
        }
    }
}
