use dioxus::prelude::*;
use store::Role;
use ui::sample;
use ui::{use_session, ChartPanel, StatCard};

use super::messages::MessagesPage;

#[component]
pub fn TeacherDashboard() -> Element {
    let session = use_session();
    let classes = sample::classes();
    let students: u32 = classes.iter().map(|c| c.students).sum();
    let averages: Vec<(String, f64)> = classes
        .iter()
        .map(|c| (c.name.to_string(), c.average))
        .collect();
    let unread = sample::inbox(Role::Teacher).unread_total();

    rsx! {
        h1 { class: "page-title", "Good morning, {session.display_name()}" }
        p { class: "page-subtitle", "Your classes this term." }

        div {
            class: "stat-grid",
            StatCard { label: "Classes", value: classes.len().to_string() }
            StatCard { label: "Students", value: students.to_string() }
            StatCard { label: "Unread messages", value: unread.to_string() }
        }

        ChartPanel { title: "Class averages", points: averages, ceiling: Some(100.0), unit: "%" }

        div {
            class: "card-grid",
            style: "margin-top: 1rem",
            for summary in classes {
                div {
                    key: "{summary.name}",
                    class: "card",
                    strong { "{summary.name}" }
                    p { "{summary.students} students · average {summary.average:.1}%" }
                }
            }
        }
    }
}

#[component]
pub fn TeacherMessages() -> Element {
    rsx! {
        MessagesPage { role: Role::Teacher }
    }
}
