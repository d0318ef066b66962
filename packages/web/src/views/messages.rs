//! Messages page shared by all three roles.
//!
//! Conversations are held in page state only; sending appends to the open
//! thread locally.

use dioxus::prelude::*;
use store::{Role, ThreadFilter};
use ui::views::EmptyState;
use ui::{current_time, sample};

#[component]
pub fn MessagesPage(role: Role) -> Element {
    let mut inbox = use_signal(move || sample::inbox(role));
    let mut search = use_signal(String::new);
    let mut filter = use_signal(ThreadFilter::default);
    let mut open = use_signal(|| Option::<u32>::None);
    let mut draft = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    let threads: Vec<_> = inbox
        .read()
        .filter(&search(), filter())
        .into_iter()
        .cloned()
        .collect();
    let unread = inbox.read().unread_total();
    let current = open().and_then(|id| inbox.read().get(id).cloned());

    let mut send = move || {
        let Some(id) = open() else {
            return;
        };
        let body = draft();
        let result = inbox.write().send(id, &body, &current_time()).map(|_| ());
        match result {
            Ok(()) => {
                draft.set(String::new());
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        h1 { class: "page-title", "Messages" }
        p { class: "page-subtitle", "{unread} unread" }

        div {
            class: "messages",
            div {
                class: "thread-list",
                input {
                    r#type: "search",
                    placeholder: "Search conversations",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
                div {
                    class: "tabs",
                    button {
                        class: if filter() == ThreadFilter::All { "tab active" } else { "tab" },
                        onclick: move |_| filter.set(ThreadFilter::All),
                        "All"
                    }
                    button {
                        class: if filter() == ThreadFilter::Unread { "tab active" } else { "tab" },
                        onclick: move |_| filter.set(ThreadFilter::Unread),
                        "Unread"
                    }
                }
                if threads.is_empty() {
                    EmptyState { title: "No conversations", hint: "Try a different search." }
                }
                for thread in threads {
                    button {
                        key: "{thread.id}",
                        class: if open() == Some(thread.id) { "thread-item active" } else { "thread-item" },
                        onclick: move |_| {
                            inbox.write().open(thread.id);
                            open.set(Some(thread.id));
                            error.set(None);
                        },
                        if thread.unread > 0 {
                            span { class: "unread", "{thread.unread}" }
                        }
                        strong { "{thread.contact}" }
                        span { class: "thread-preview", "{thread.subject}" }
                        span { class: "thread-preview", "{thread.preview()}" }
                    }
                }
            }

            if let Some(thread) = current {
                div {
                    class: "conversation",
                    h3 { "{thread.subject}" }
                    p { class: "thread-preview", "{thread.contact} · {thread.contact_role.label()}" }
                    div {
                        class: "conversation-log",
                        for (i, message) in thread.messages.iter().enumerate() {
                            div {
                                key: "{i}",
                                class: if message.from_me { "bubble mine" } else { "bubble" },
                                "{message.body}"
                                span { class: "bubble-time", "{message.sent_at}" }
                            }
                        }
                    }
                    if let Some(err) = error() {
                        div { class: "form-error", "{err}" }
                    }
                    form {
                        class: "composer",
                        onsubmit: move |evt: FormEvent| {
                            evt.prevent_default();
                            send();
                        },
                        input {
                            placeholder: "Write a message",
                            value: draft(),
                            oninput: move |evt: FormEvent| draft.set(evt.value()),
                        }
                        button { class: "btn", r#type: "submit", "Send" }
                    }
                }
            } else {
                div {
                    class: "conversation",
                    EmptyState { title: "Select a conversation", hint: "Choose a thread on the left to read it." }
                }
            }
        }
    }
}

