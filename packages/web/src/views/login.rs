//! Login page: pick a role, then enter credentials for that role's flow.

use api::auth::{settle_login, sign_in, LOGGING_IN};
use dioxus::prelude::*;
use store::{Credentials, Role};
use ui::{use_notices, use_query_client, use_session};

use crate::Route;

#[component]
pub fn Login() -> Element {
    let mut session = use_session();
    let mut notices = use_notices();
    let query = use_query_client();
    let nav = use_navigator();

    let mut role = use_signal(|| Option::<Role>::None);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in: go straight to the dashboard.
    if let Some(current) = session.role() {
        nav.replace(Route::dashboard_for(current));
        return rsx! {};
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(flow) = role() else {
            return;
        };
        let credentials = Credentials {
            email: email().trim().to_string(),
            password: password(),
        };
        let client = query.client();
        let mut query = query.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);
            let pending = notices.write().start(LOGGING_IN);

            let result = sign_in(&client, flow, &credentials).await;
            let settled = session.with_mut(|s| {
                settle_login(result, flow, s, &mut notices.write(), pending)
            });
            query.sync();
            loading.set(false);

            match settled {
                Ok(_) => {
                    nav.replace(Route::dashboard_for(flow));
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    rsx! {
        h1 { class: "page-title", "Log in" }

        match role() {
            None => rsx! {
                p { class: "page-subtitle", "Who is signing in?" }
                div {
                    class: "role-picker",
                    for option in Role::ALL {
                        button {
                            key: "{option}",
                            class: "btn secondary role-option",
                            onclick: move |_| role.set(Some(option)),
                            "{option.label()}"
                        }
                    }
                }
            },
            Some(flow) => rsx! {
                p { class: "page-subtitle", "Signing in as a {flow.as_str()}." }
                form {
                    class: "form",
                    onsubmit: handle_login,

                    if let Some(err) = error() {
                        div { class: "form-error", "{err}" }
                    }

                    label {
                        "Email"
                        input {
                            r#type: "email",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    label {
                        "Password"
                        input {
                            r#type: "password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-actions",
                        button {
                            class: "btn secondary",
                            r#type: "button",
                            onclick: move |_| {
                                role.set(None);
                                error.set(None);
                            },
                            "Back"
                        }
                        button {
                            class: "btn",
                            r#type: "submit",
                            disabled: loading() || email().trim().is_empty() || password().is_empty(),
                            if loading() { "Logging in..." } else { "Log in" }
                        }
                    }
                }
            },
        }

        p {
            "No account yet? "
            Link { to: Route::Register {}, "Register" }
        }
    }
}
