//! Who is signed in, shown in the navbar.

use dioxus::prelude::*;
use store::Role;

use crate::icons::{FaChalkboardUser, FaPeopleRoof, FaUserGraduate, FaUserSlash};
use crate::session::use_session;
use crate::Icon;

/// A small icon and name for the current identity.
///
/// - **Student**: graduate icon
/// - **Parent**: family icon
/// - **Teacher**: board icon
/// - **Signed out**: slashed-user icon ("Guest")
#[component]
pub fn SessionBadge() -> Element {
    let session = use_session();
    let name = session.display_name();

    match session.role() {
        Some(Role::Student) => rsx! {
            span {
                class: "session-badge session-badge--student",
                title: "Signed in as a student",
                Icon { icon: FaUserGraduate, width: 14, height: 14 }
                span { "{name}" }
            }
        },
        Some(Role::Parent) => rsx! {
            span {
                class: "session-badge session-badge--parent",
                title: "Signed in as a parent",
                Icon { icon: FaPeopleRoof, width: 14, height: 14 }
                span { "{name}" }
            }
        },
        Some(Role::Teacher) => rsx! {
            span {
                class: "session-badge session-badge--teacher",
                title: "Signed in as a teacher",
                Icon { icon: FaChalkboardUser, width: 14, height: 14 }
                span { "{name}" }
            }
        },
        None => rsx! {
            span {
                class: "session-badge session-badge--guest",
                title: "Not signed in",
                Icon { icon: FaUserSlash, width: 14, height: 14 }
                span { "Guest" }
            }
        },
    }
}
