//! Parent dashboard.
//!
//! The children list loads on mount. The parent's own profile is only fetched
//! when they open it.

use api::endpoint::ALL_CHILDREN;
use api::parent_profile_from;
use dioxus::prelude::*;
use serde_json::Value;
use store::{QueryState, Role};
use ui::sample;
use ui::views::{EmptyState, ModalOverlay};
use ui::{use_lazy_query, use_query, use_session, ChartPanel, StatCard};

use super::messages::MessagesPage;

#[component]
pub fn ParentDashboard() -> Element {
    let session = use_session();
    let children = use_query(&ALL_CHILDREN, |client| async move { client.all_children().await });
    let profile = use_lazy_query(|client| client.lazy_parent_profile());
    let mut show_profile = use_signal(|| false);
    let mut selected = use_signal(|| 0usize);

    let open_profile = move |_| {
        show_profile.set(true);
        profile.trigger(Value::Null);
    };

    let children_view = match &*children.read() {
        None => rsx! { p { "Loading children..." } },
        Some(Err(e)) => rsx! {
            div { class: "form-error", "Could not load your children: {e.user_message()}" }
        },
        Some(Ok(list)) if list.is_empty() => rsx! {
            EmptyState { title: "No children linked yet", hint: "Ask the school office to link your account." }
        },
        Some(Ok(list)) => {
            let list = list.clone();
            let current = selected().min(list.len() - 1);
            let child = list[current].clone();
            rsx! {
                div {
                    class: "card-grid",
                    for (i, c) in list.into_iter().enumerate() {
                        button {
                            key: "{i}",
                            class: if i == current { "card selected" } else { "card" },
                            onclick: move |_| selected.set(i),
                            strong { "{c.display_name()}" }
                            if let Some(grade) = c.grade_level.clone() {
                                span { class: "thread-preview", "{grade}" }
                            }
                        }
                    }
                }
                h2 { "{child.display_name()}" }
                div {
                    class: "stat-grid",
                    StatCard { label: "Attendance", value: format!("{:.0}%", sample::attendance_rate()) }
                    StatCard { label: "Achievements", value: sample::achievements().len().to_string() }
                }
                ChartPanel { title: "Scores by subject", points: sample::grade_points(), ceiling: Some(100.0), unit: "%" }
            }
        }
    };

    rsx! {
        h1 { class: "page-title", "Welcome, {session.display_name()}" }
        p {
            class: "page-subtitle",
            "Your family at a glance. "
            button { class: "btn secondary", onclick: open_profile, "My profile" }
        }

        {children_view}

        if show_profile() {
            ModalOverlay {
                title: "My profile",
                on_close: move |_| show_profile.set(false),
                match profile.state() {
                    QueryState::Uninitialized | QueryState::Loading => rsx! { p { "Loading profile..." } },
                    QueryState::Failed(e) => rsx! { div { class: "form-error", "{e.user_message()}" } },
                    QueryState::Ready(value) => match parent_profile_from(&value) {
                        Ok(p) => rsx! {
                            p { "Name: {p.name.clone().unwrap_or_default()}" }
                            p { "Email: {p.email.clone().unwrap_or_default()}" }
                            p { "Address: {p.address()}" }
                        },
                        Err(e) => rsx! { div { class: "form-error", "{e}" } },
                    },
                }
            }
        }
    }
}

#[component]
pub fn ParentMessages() -> Element {
    rsx! {
        MessagesPage { role: Role::Parent }
    }
}
