//! This crate contains all shared UI for the portal: context providers, the
//! hooks that read through the API client, and the widgets the dashboards are
//! built from.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const THEME_CSS: Asset = asset!("/assets/styling/theme.css");

mod session;
pub use session::{use_session, LogoutButton, SessionHandle, SessionProvider};

mod query;
pub use query::{make_client, use_lazy_query, use_query, use_query_client, LazyHandle, QueryClient, QueryProvider};

pub mod notices;
pub use notices::{current_time, notify, use_notices, NoticeProvider};

mod notice_panel;
pub use notice_panel::NoticePanel;

mod navbar;
pub use navbar::Navbar;

mod session_badge;
pub use session_badge::SessionBadge;

pub mod chart;
pub use chart::{scale_bars, Bar, BarChart, ChartError, ChartPanel};

mod achievements;
pub use achievements::{achievement_style, AchievementBadge, AchievementStyle};

mod stat_card;
pub use stat_card::StatCard;

pub mod sample;
