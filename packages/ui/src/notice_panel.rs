use dioxus::prelude::*;
use store::{Notice, NoticeId, NoticeLevel};

use crate::icons::{FaCircleCheck, FaCircleExclamation, FaCircleInfo, FaSpinner, FaTriangleExclamation, FaXmark};
use crate::notices::use_notices;
use crate::Icon;

const NOTICES_CSS: Asset = asset!("/assets/styling/notices.css");

#[cfg(target_arch = "wasm32")]
const AUTO_DISMISS_SECS: u64 = 4;

fn level_class(notice: &Notice) -> &'static str {
    if notice.pending {
        return "notice pending";
    }
    match notice.level {
        NoticeLevel::Error => "notice error",
        NoticeLevel::Warning => "notice warning",
        NoticeLevel::Success => "notice success",
        NoticeLevel::Info => "notice info",
    }
}

/// Stack of notices in the corner of the shell. Pending notices show a spinner
/// until they are resolved.
#[component]
pub fn NoticePanel() -> Element {
    let board = use_notices();
    let notices = board.read().entries().to_vec();

    if notices.is_empty() {
        return rsx! {};
    }

    rsx! {
        document::Stylesheet { href: NOTICES_CSS }

        div {
            class: "notice-stack",
            role: "status",
            for notice in notices {
                NoticeItem { key: "{notice.id:?}", notice }
            }
        }
    }
}

#[component]
fn NoticeItem(notice: Notice) -> Element {
    let mut board = use_notices();
    let id: NoticeId = notice.id;

    // Settled successes fade out on their own.
    #[cfg(target_arch = "wasm32")]
    {
        let mut scheduled = use_signal(|| false);
        use_effect(move || {
            let settled = board
                .read()
                .get(id)
                .is_some_and(|n| !n.pending && n.level == NoticeLevel::Success);
            if settled && !*scheduled.peek() {
                scheduled.set(true);
                spawn(async move {
                    gloo_timers::future::sleep(std::time::Duration::from_secs(AUTO_DISMISS_SECS)).await;
                    board.write().dismiss(id);
                });
            }
        });
    }

    rsx! {
        div {
            class: level_class(&notice),
            span {
                class: "notice-icon",
                if notice.pending {
                    Icon { icon: FaSpinner, width: 14, height: 14 }
                } else {
                    match notice.level {
                        NoticeLevel::Error => rsx! { Icon { icon: FaCircleExclamation, width: 14, height: 14 } },
                        NoticeLevel::Warning => rsx! { Icon { icon: FaTriangleExclamation, width: 14, height: 14 } },
                        NoticeLevel::Success => rsx! { Icon { icon: FaCircleCheck, width: 14, height: 14 } },
                        NoticeLevel::Info => rsx! { Icon { icon: FaCircleInfo, width: 14, height: 14 } },
                    }
                }
            }
            span { class: "notice-message", "{notice.message}" }
            if !notice.pending {
                button {
                    class: "notice-close",
                    title: "Dismiss",
                    onclick: move |_| board.write().dismiss(id),
                    Icon { icon: FaXmark, width: 12, height: 12 }
                }
            }
        }
    }
}
