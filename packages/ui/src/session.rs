//! Session context and hooks for the UI.
//!
//! The session lives in one `Signal<Session>` provided by [`SessionProvider`].
//! Components never write the signal directly; they go through
//! [`SessionHandle`], which only exposes the store's set/clear/merge operations.

use dioxus::prelude::*;
use store::{Identity, NoticeLevel, Role, Session};

use crate::notices::{notify, use_notices};
use crate::query::use_query_client;

/// Single-writer view of the current session.
#[derive(Clone, Copy, PartialEq)]
pub struct SessionHandle {
    session: Signal<Session>,
}

impl SessionHandle {
    /// Subscribe to and clone the current session.
    pub fn get(&self) -> Session {
        self.session.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.read().role()
    }

    pub fn display_name(&self) -> String {
        self.session.read().display_name().to_string()
    }

    pub fn set_user(&mut self, identity: Identity) {
        self.session.write().set_user(identity);
    }

    pub fn clear(&mut self) {
        self.session.write().clear_user();
    }

    pub fn update(&mut self, partial: Identity) -> bool {
        self.session.write().update_user(partial)
    }

    /// Apply a store operation that needs the session mutably, such as a login.
    pub fn with_mut<R>(&mut self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut *self.session.write())
    }
}

/// Get the current session handle.
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// Provider component that owns the session for the lifetime of the tab.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let session = use_signal(Session::new);
    use_context_provider(|| SessionHandle { session });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
///
/// The local session is cleared whatever the backend answers.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_signed_out: EventHandler<()>,
) -> Element {
    let mut session = use_session();
    let query = use_query_client();
    let mut notices = use_notices();

    let onclick = move |_| {
        let mut query = query.clone();
        async move {
            let Some(role) = session.role() else {
                session.clear();
                on_signed_out.call(());
                return;
            };
            let client = query.client();
            if let Err(e) = api::auth::sign_out(&client, role).await {
                tracing::warn!("Logout request failed: {}", e);
            }
            session.clear();
            query.sync();
            notify(&mut notices, NoticeLevel::Info, "You have been signed out");
            on_signed_out.call(());
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
