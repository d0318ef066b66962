//! Layout shared by every page except not-found: navbar, notices, footer.
//!
//! The shell is also the role gate. Role pages need a session of that role;
//! anyone else is sent to the login page or to their own dashboard.

use dioxus::prelude::*;
use store::{check_access, Access};
use ui::{use_session, LogoutButton, Navbar, NoticePanel};

use crate::Route;

#[component]
pub fn PortalShell() -> Element {
    let route = use_route::<Route>();
    let session = use_session();
    let nav = use_navigator();

    match check_access(&session.get(), route.required_role()) {
        Access::Granted => {}
        Access::SignInRequired => {
            tracing::info!("Sign-in required for {}", route);
            nav.replace(Route::Login {});
            return rsx! {};
        }
        Access::Forbidden { home } => {
            tracing::info!("{} is not open to a {}, redirecting", route, home);
            nav.replace(Route::dashboard_for(home));
            return rsx! {};
        }
    }

    let role = session.role();

    rsx! {
        div {
            class: "portal-shell",
            Navbar {
                Link { to: Route::Home {}, active_class: "active", "Home" }
                if let Some(role) = role {
                    Link { to: Route::dashboard_for(role), active_class: "active", "Dashboard" }
                    Link { to: Route::messages_for(role), active_class: "active", "Messages" }
                    LogoutButton {
                        class: "btn secondary",
                        on_signed_out: move |_| {
                            nav.replace(Route::Login {});
                        },
                    }
                } else {
                    Link { to: Route::Login {}, active_class: "active", "Log in" }
                    Link { to: Route::Register {}, active_class: "active", "Register" }
                }
            }
            main {
                class: "portal-main",
                Outlet::<Route> {}
            }
            NoticePanel {}
            footer {
                class: "portal-footer",
                "Campus Portal"
            }
        }
    }
}
