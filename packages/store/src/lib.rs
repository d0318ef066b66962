//! # store: client-side state for the campus portal
//!
//! Pure, synchronous state shared by the `api`, `ui` and `web` crates. Nothing in
//! here touches the network or the DOM, so every rule is unit-tested natively.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | The signed-in identity and its three writers |
//! | [`cache`] | Query results keyed by endpoint + argument, invalidated by tags |
//! | [`access`] | Role gate for dashboard routes |
//! | [`notice`] | Pending/resolved notifications |
//! | [`messages`] | In-memory message threads with search |
//! | [`register`] | Multi-step registration form |
//! | [`models`] | Roles and backend DTOs |

pub mod access;
pub mod cache;
pub mod messages;
pub mod models;
pub mod notice;
pub mod register;
pub mod session;

pub use access::{check_access, Access};
pub use cache::{CacheEntry, CacheKey, FetchTicket, QueryCache, QueryState, QueryStatus, Tag};
pub use messages::{Inbox, Message, MessageError, Thread, ThreadFilter};
pub use models::{
    AchievementCategory, ChildSummary, ContactInfo, Credentials, ParentProfile, Role,
    StudentProfile,
};
pub use notice::{Notice, NoticeBoard, NoticeId, NoticeLevel};
pub use register::{RegistrationError, RegistrationForm, RegistrationRequest, Step};
pub use session::{Identity, Session};
