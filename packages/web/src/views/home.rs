use dioxus::prelude::*;
use store::Role;
use ui::use_session;

use crate::Route;

fn blurb(role: Role) -> &'static str {
    match role {
        Role::Student => "Grades, attendance, achievements and messages from your teachers.",
        Role::Parent => "Follow each of your children and keep in touch with their teachers.",
        Role::Teacher => "Class averages at a glance and conversations with families.",
    }
}

#[component]
pub fn Home() -> Element {
    let session = use_session();

    rsx! {
        h1 { class: "page-title", "Welcome to the Campus Portal" }
        p { class: "page-subtitle", "One place for students, parents and teachers." }

        if let Some(role) = session.role() {
            div {
                class: "card",
                p { "Signed in as {session.display_name()}." }
                Link { class: "btn", to: Route::dashboard_for(role), "Go to your dashboard" }
            }
        } else {
            div {
                class: "card-grid",
                for role in Role::ALL {
                    div {
                        key: "{role}",
                        class: "card",
                        h3 { "{role.label()}" }
                        p { "{blurb(role)}" }
                    }
                }
            }
            div {
                class: "form-actions",
                style: "margin-top: 1.5rem",
                Link { class: "btn", to: Route::Login {}, "Log in" }
                Link { class: "btn secondary", to: Route::Register {}, "Create an account" }
            }
        }
    }
}
