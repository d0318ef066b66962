use api::endpoint::STUDENT_PROFILE;
use dioxus::prelude::*;
use store::Role;
use ui::sample::{self, attendance_rate};
use ui::{use_query, use_session, AchievementBadge, ChartPanel, StatCard};

use super::messages::MessagesPage;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Grades,
    Attendance,
    Behaviour,
    Achievements,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Grades, Tab::Attendance, Tab::Behaviour, Tab::Achievements];

    fn label(&self) -> &'static str {
        match self {
            Tab::Grades => "Grades",
            Tab::Attendance => "Attendance",
            Tab::Behaviour => "Behaviour",
            Tab::Achievements => "Achievements",
        }
    }
}

#[component]
pub fn StudentDashboard() -> Element {
    let session = use_session();
    let mut tab = use_signal(|| Tab::Grades);
    let profile = use_query(&STUDENT_PROFILE, |client| async move { client.student_profile().await });

    let grades = sample::grades();
    let average = grades.iter().map(|g| g.score).sum::<f64>() / grades.len().max(1) as f64;
    let achievements = sample::achievements();

    let class_line = match &*profile.read() {
        Some(Ok(p)) => {
            let grade = p.grade_level.clone().unwrap_or_else(|| "Grade not set".to_string());
            match &p.class_name {
                Some(class) => format!("{grade} · {class}"),
                None => grade,
            }
        }
        Some(Err(e)) => {
            tracing::warn!("Student profile unavailable: {}", e);
            "Profile unavailable".to_string()
        }
        None => "Loading profile...".to_string(),
    };

    rsx! {
        h1 { class: "page-title", "Hello, {session.display_name()}" }
        p { class: "page-subtitle", "{class_line}" }

        div {
            class: "stat-grid",
            StatCard { label: "Average score", value: format!("{average:.0}%") }
            StatCard { label: "Attendance", value: format!("{:.0}%", attendance_rate()) }
            StatCard { label: "Achievements", value: achievements.len().to_string() }
            StatCard { label: "Subjects", value: grades.len().to_string() }
        }

        div {
            class: "tabs",
            for t in Tab::ALL {
                button {
                    key: "{t.label()}",
                    class: if tab() == t { "tab active" } else { "tab" },
                    onclick: move |_| tab.set(t),
                    "{t.label()}"
                }
            }
        }

        match tab() {
            Tab::Grades => rsx! {
                ChartPanel { title: "Scores by subject", points: sample::grade_points(), ceiling: Some(100.0), unit: "%" }
                table {
                    class: "grade-table",
                    thead { tr { th { "Subject" } th { "Score" } th { "Grade" } } }
                    tbody {
                        for g in grades {
                            tr {
                                key: "{g.subject}",
                                td { "{g.subject}" }
                                td { "{g.score:.0}" }
                                td { "{g.letter}" }
                            }
                        }
                    }
                }
            },
            Tab::Attendance => rsx! {
                ChartPanel { title: "Monthly attendance", points: sample::attendance(), ceiling: Some(100.0), unit: "%" }
            },
            Tab::Behaviour => rsx! {
                div {
                    class: "card-grid",
                    for note in sample::behaviour_notes() {
                        div {
                            key: "{note.date}",
                            class: if note.positive { "card note positive" } else { "card note negative" },
                            strong { "{note.teacher}" }
                            span { class: "thread-preview", "{note.date}" }
                            p { "{note.note}" }
                        }
                    }
                }
            },
            Tab::Achievements => rsx! {
                div {
                    class: "card-grid",
                    for a in achievements {
                        AchievementBadge {
                            key: "{a.title}",
                            title: a.title.to_string(),
                            category: a.category.to_string(),
                            date: a.date.to_string(),
                        }
                    }
                }
            },
        }
    }
}

#[component]
pub fn StudentMessages() -> Element {
    rsx! {
        MessagesPage { role: Role::Student }
    }
}
