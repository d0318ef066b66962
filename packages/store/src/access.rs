//! Role gate applied by the layout shell before rendering a page.

use crate::models::Role;
use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Nobody is signed in.
    SignInRequired,
    /// Signed in, but as someone else; send them to their own dashboard.
    Forbidden { home: Role },
}

/// Decide whether `session` may view a page that requires `required`.
///
/// Public pages (`None`) are always granted. A signed-in identity without a
/// recognisable role may only see public pages.
pub fn check_access(session: &Session, required: Option<Role>) -> Access {
    let Some(required) = required else {
        return Access::Granted;
    };
    if !session.is_authenticated() {
        return Access::SignInRequired;
    }
    match session.role() {
        Some(role) if role == required => Access::Granted,
        Some(role) => Access::Forbidden { home: role },
        None => Access::SignInRequired,
    }
}
