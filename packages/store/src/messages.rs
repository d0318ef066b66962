//! In-memory message threads for the messages pages.
//!
//! Threads live only as long as the page state that owns them. Sending appends to
//! the local thread; there is no delivery, ordering or persistence.

use thiserror::Error;

use crate::models::Role;

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub from_me: bool,
    pub body: String,
    pub sent_at: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Thread {
    pub id: u32,
    pub contact: String,
    pub contact_role: Role,
    pub subject: String,
    pub unread: u32,
    pub messages: Vec<Message>,
}

impl Thread {
    /// Body of the most recent message, or an empty string.
    pub fn preview(&self) -> &str {
        self.messages.last().map(|m| m.body.as_str()).unwrap_or("")
    }

    fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.contact.to_lowercase().contains(needle)
            || self.subject.to_lowercase().contains(needle)
            || self
                .messages
                .iter()
                .any(|m| m.body.to_lowercase().contains(needle))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThreadFilter {
    #[default]
    All,
    Unread,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("Message is empty")]
    Empty,
    #[error("Conversation {0} not found")]
    UnknownThread(u32),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inbox {
    threads: Vec<Thread>,
}

impl Inbox {
    pub fn new(threads: Vec<Thread>) -> Self {
        Self { threads }
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn get(&self, id: u32) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == id)
    }

    /// Threads matching a case-insensitive search over contact, subject and bodies.
    pub fn filter(&self, search: &str, filter: ThreadFilter) -> Vec<&Thread> {
        let needle = search.trim().to_lowercase();
        self.threads
            .iter()
            .filter(|t| filter == ThreadFilter::All || t.unread > 0)
            .filter(|t| t.matches(&needle))
            .collect()
    }

    /// Open a thread, marking it read.
    pub fn open(&mut self, id: u32) -> Option<&Thread> {
        let thread = self.threads.iter_mut().find(|t| t.id == id)?;
        thread.unread = 0;
        Some(thread)
    }

    pub fn send(&mut self, id: u32, body: &str, sent_at: &str) -> Result<&Message, MessageError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(MessageError::Empty);
        }
        let thread = self
            .threads
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(MessageError::UnknownThread(id))?;
        thread.messages.push(Message {
            from_me: true,
            body: body.to_string(),
            sent_at: sent_at.to_string(),
        });
        thread.messages.last().ok_or(MessageError::UnknownThread(id))
    }

    pub fn unread_total(&self) -> u32 {
        self.threads.iter().map(|t| t.unread).sum()
    }
}
