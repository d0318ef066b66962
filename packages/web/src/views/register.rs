//! Registration page: a four-step form driven by `store::RegistrationForm`.

use dioxus::prelude::*;
use store::{register::detail_label, NoticeLevel, RegistrationForm, Role, Step};
use ui::{use_notices, use_query_client};

use crate::Route;

const STEPS: [Step; 4] = [Step::Role, Step::Account, Step::Profile, Step::Review];

#[component]
pub fn Register() -> Element {
    let mut form = use_signal(RegistrationForm::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let mut notices = use_notices();
    let query = use_query_client();
    let nav = use_navigator();

    let handle_next = move |_| {
        let result = form.write().advance();
        error.set(result.err().map(|e| e.to_string()));
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = match form.read().to_request() {
            Ok(request) => request,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let client = query.client();
        let mut query = query.clone();
        spawn(async move {
            loading.set(true);
            let pending = notices.write().start("Creating your account...");
            let result = client.register(&request).await;
            query.sync();
            match result {
                Ok(_) => {
                    notices
                        .write()
                        .resolve(pending, NoticeLevel::Success, "Account created. You can log in now.");
                    nav.push(Route::Login {});
                }
                Err(e) => {
                    tracing::warn!("Registration failed: {}", e);
                    let message = e.user_message();
                    notices.write().resolve(pending, NoticeLevel::Error, &message);
                    error.set(Some(message));
                }
            }
            loading.set(false);
        });
    };

    let snapshot = form.read().clone();
    let current = snapshot.step;
    let can_advance = snapshot.can_advance();
    let role = snapshot.role;
    let role_label = role.map(|r| r.label()).unwrap_or("-");

    rsx! {
        h1 { class: "page-title", "Create an account" }

        div {
            class: "steps",
            for (i, step) in STEPS.iter().enumerate() {
                span {
                    key: "{i}",
                    class: if *step == current { "current" } else { "" },
                    "{i + 1}. {step.title()}"
                }
            }
        }

        form {
            class: "form",
            onsubmit: handle_submit,

            if let Some(err) = error() {
                div { class: "form-error", "{err}" }
            }

            match current {
                Step::Role => rsx! {
                    div {
                        class: "role-picker",
                        for option in Role::ALL {
                            button {
                                key: "{option}",
                                r#type: "button",
                                class: if role == Some(option) { "btn secondary role-option active" } else { "btn secondary role-option" },
                                onclick: move |_| form.write().role = Some(option),
                                "{option.label()}"
                            }
                        }
                    }
                },
                Step::Account => rsx! {
                    label {
                        "Full name"
                        input {
                            value: snapshot.name.clone(),
                            oninput: move |evt: FormEvent| form.write().name = evt.value(),
                        }
                    }
                    label {
                        "Email"
                        input {
                            r#type: "email",
                            value: snapshot.email.clone(),
                            oninput: move |evt: FormEvent| form.write().email = evt.value(),
                        }
                    }
                    label {
                        "Password (min 8 characters)"
                        input {
                            r#type: "password",
                            value: snapshot.password.clone(),
                            oninput: move |evt: FormEvent| form.write().password = evt.value(),
                        }
                    }
                    label {
                        "Confirm password"
                        input {
                            r#type: "password",
                            value: snapshot.confirm_password.clone(),
                            oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                        }
                    }
                },
                Step::Profile => rsx! {
                    label {
                        "Phone (optional)"
                        input {
                            r#type: "tel",
                            value: snapshot.phone.clone(),
                            oninput: move |evt: FormEvent| form.write().phone = evt.value(),
                        }
                    }
                    if let Some(role) = role {
                        label {
                            "{detail_label(role)}"
                            input {
                                value: snapshot.detail.clone(),
                                oninput: move |evt: FormEvent| form.write().detail = evt.value(),
                            }
                        }
                    }
                },
                Step::Review => rsx! {
                    div {
                        class: "card",
                        p { "Role: {role_label}" }
                        p { "Name: {snapshot.name}" }
                        p { "Email: {snapshot.email}" }
                        if let Some(role) = role {
                            p { "{detail_label(role)}: {snapshot.detail}" }
                        }
                    }
                },
            }

            div {
                class: "form-actions",
                if current != Step::Role {
                    button {
                        class: "btn secondary",
                        r#type: "button",
                        onclick: move |_| {
                            form.write().back();
                            error.set(None);
                        },
                        "Back"
                    }
                }
                if current == Step::Review {
                    button {
                        class: "btn",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Create account" }
                    }
                } else {
                    button {
                        class: "btn",
                        r#type: "button",
                        disabled: !can_advance,
                        onclick: handle_next,
                        "Next"
                    }
                }
            }
        }

        p {
            "Already registered? "
            Link { to: Route::Login {}, "Log in" }
        }
    }
}
