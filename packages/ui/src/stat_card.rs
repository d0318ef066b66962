use dioxus::prelude::*;

/// A headline number with a caption, e.g. "92% Attendance".
#[component]
pub fn StatCard(
    label: String,
    value: String,
    #[props(default = "".to_string())] detail: String,
    #[props(default = "stat-card".to_string())] class: String,
) -> Element {
    rsx! {
        div {
            class: "{class}",
            span { class: "stat-card-value", "{value}" }
            span { class: "stat-card-label", "{label}" }
            if !detail.is_empty() {
                span { class: "stat-card-detail", "{detail}" }
            }
        }
    }
}
