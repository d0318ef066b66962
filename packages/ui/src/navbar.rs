use dioxus::prelude::*;

use crate::SessionBadge;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

/// Top bar of the portal shell: brand on the left, links in the middle, the
/// session badge on the right.
#[component]
pub fn Navbar(#[props(default = "Campus Portal".to_string())] brand: String, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        header {
            class: "navbar",
            span { class: "navbar-brand", "{brand}" }
            nav {
                class: "navbar-links",
                {children}
            }
            SessionBadge {}
        }
    }
}
