use dioxus::prelude::*;
use store::{NoticeBoard, NoticeId, NoticeLevel};

pub fn use_notices() -> Signal<NoticeBoard> {
    use_context::<Signal<NoticeBoard>>()
}

pub fn notify(board: &mut Signal<NoticeBoard>, level: NoticeLevel, message: &str) -> NoticeId {
    match level {
        NoticeLevel::Error => tracing::error!("{}", message),
        NoticeLevel::Warning => tracing::warn!("{}", message),
        NoticeLevel::Info | NoticeLevel::Success => tracing::info!("{}", message),
    }
    board.write().push(level, message)
}

/// Provider for the shell's notice board.
#[component]
pub fn NoticeProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(NoticeBoard::new()));
    rsx! {
        {children}
    }
}

/// Wall-clock time as `HH:MM`, used to stamp local messages.
#[cfg(target_arch = "wasm32")]
pub fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    format!("{h:02}:{m:02}")
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_time() -> String {
    "00:00".to_string()
}
