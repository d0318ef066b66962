//! Transient notifications shown in the portal shell.
//!
//! A notice is either final (pushed with a level) or pending (started with
//! [`NoticeBoard::start`]) until the operation it describes finishes and
//! [`NoticeBoard::resolve`] turns it into a success or error.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoticeId(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: NoticeId,
    pub level: NoticeLevel,
    pub message: String,
    pub pending: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeBoard {
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, level: NoticeLevel, message: &str, pending: bool) -> NoticeId {
        self.next_id += 1;
        let id = NoticeId(self.next_id);
        self.notices.push(Notice {
            id,
            level,
            message: message.to_string(),
            pending,
        });
        id
    }

    pub fn push(&mut self, level: NoticeLevel, message: &str) -> NoticeId {
        self.insert(level, message, false)
    }

    /// Show a "work in progress" notice that must later be resolved.
    pub fn start(&mut self, message: &str) -> NoticeId {
        self.insert(NoticeLevel::Info, message, true)
    }

    /// Settle a pending notice. Returns `false` if it was dismissed meanwhile.
    pub fn resolve(&mut self, id: NoticeId, level: NoticeLevel, message: &str) -> bool {
        match self.notices.iter_mut().find(|n| n.id == id) {
            Some(notice) => {
                notice.level = level;
                notice.message = message.to_string();
                notice.pending = false;
                true
            }
            None => false,
        }
    }

    pub fn dismiss(&mut self, id: NoticeId) {
        self.notices.retain(|n| n.id != id);
    }

    pub fn get(&self, id: NoticeId) -> Option<&Notice> {
        self.notices.iter().find(|n| n.id == id)
    }

    pub fn entries(&self) -> &[Notice] {
        &self.notices
    }

    pub fn pending(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(|n| n.pending)
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}
