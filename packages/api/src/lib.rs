//! # API crate: the portal's window onto the backend
//!
//! Everything the views need to read from or write to the REST backend goes
//! through [`ApiClient`]. The crate is split so the caching logic can be tested
//! without a network:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Base URL from `.env`, `portal.toml` and `PORTAL_API_*` variables |
//! | [`endpoint`] | Static endpoint table: paths, methods, cache tags, transforms |
//! | [`transport`] | The [`Transport`] seam and its `reqwest` implementation |
//! | [`client`] | Query cache, in-flight de-duplication, tag invalidation, lazy queries |
//! | [`requests`] | Typed wrappers returning store models |
//! | [`auth`] | Login/logout flows that update the session and notices |
//! | [`error`] | [`ApiError`] |

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod requests;
pub mod transport;

#[cfg(test)]
mod mock;

pub use client::{ApiClient, LazyQuery};
pub use config::ApiConfig;
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use requests::{parent_profile_from, LoginResponse};
pub use transport::{HttpTransport, Transport};

/// The client used by the running app.
pub type PortalClient = ApiClient<HttpTransport>;
