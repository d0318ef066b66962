//! Login and logout flows.
//!
//! A login runs in two halves so the UI can own its signals between them:
//! [`sign_in`] talks to the backend, and [`settle_login`] applies the outcome
//! to the session and the pending "Logging in..." notice. The notice is always
//! resolved, whichever way the request went.

use store::{Credentials, Identity, NoticeBoard, NoticeId, NoticeLevel, Role, Session};
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::requests::LoginResponse;
use crate::transport::Transport;
use crate::ApiError;

pub const LOGGING_IN: &str = "Logging in...";

/// Send `credentials` to the login endpoint of `role`'s flow.
pub async fn sign_in<T: Transport + 'static>(
    client: &ApiClient<T>,
    role: Role,
    credentials: &Credentials,
) -> Result<LoginResponse, ApiError> {
    if !credentials.is_complete() {
        return Err(ApiError::Request("Email and password are required".into()));
    }
    client.login(role, credentials).await
}

/// Apply a login result.
///
/// On success the session holds the returned identity and the notice reads as a
/// success. On failure the session is left exactly as it was and the notice
/// carries the error.
pub fn settle_login(
    result: Result<LoginResponse, ApiError>,
    role: Role,
    session: &mut Session,
    notices: &mut NoticeBoard,
    pending: NoticeId,
) -> Result<Identity, ApiError> {
    match result {
        Ok(response) => {
            let identity = response.identity(role);
            session.set_user(identity.clone());
            info!(role = role.as_str(), "signed in");
            notices.resolve(pending, NoticeLevel::Success, &format!("Welcome back, {}", session.display_name()));
            Ok(identity)
        }
        Err(e) => {
            warn!(role = role.as_str(), error = %e, "sign in failed");
            notices.resolve(pending, NoticeLevel::Error, &e.user_message());
            Err(e)
        }
    }
}

/// End the backend session and drop everything cached for the old user.
///
/// The cache is cleared even when the logout request fails.
pub async fn sign_out<T: Transport + 'static>(
    client: &ApiClient<T>,
    role: Role,
) -> Result<(), ApiError> {
    let result = client.logout(role).await;
    client.reset();
    if let Err(e) = &result {
        warn!(error = %e, "logout request failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::endpoint::STUDENT_PROFILE;
    use crate::mock::MockTransport;
    use serde_json::{json, Value};
    use store::QueryState;

    fn client(mock: &MockTransport) -> ApiClient<MockTransport> {
        ApiClient::new(ApiConfig::new("http://portal.test/api"), mock.clone())
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "ada@school.test".into(),
            password: "secret".into(),
        }
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_untouched() {
        let mock = MockTransport::new();
        mock.respond("student/login", 500, json!({"message": "Server exploded"}));
        let client = client(&mock);

        let mut session = Session::new();
        let mut notices = NoticeBoard::new();
        let pending = notices.start(LOGGING_IN);

        let result = sign_in(&client, Role::Student, &credentials()).await;
        let settled = settle_login(result, Role::Student, &mut session, &mut notices, pending);

        assert_eq!(settled.unwrap_err().status(), Some(500));
        assert_eq!(session, Session::new());
        let notice = notices.get(pending).unwrap();
        assert!(!notice.pending);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Server exploded");
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_identity() {
        let mock = MockTransport::new();
        mock.respond("parent/login", 401, Value::Null);
        let client = client(&mock);

        let mut session = Session::new();
        let Some(previous) = json!({"name": "Grace", "role": "parent"}).as_object().cloned() else {
            unreachable!()
        };
        session.set_user(previous.clone());
        let mut notices = NoticeBoard::new();
        let pending = notices.start(LOGGING_IN);

        let result = sign_in(&client, Role::Parent, &credentials()).await;
        assert!(settle_login(result, Role::Parent, &mut session, &mut notices, pending).is_err());
        assert_eq!(session.user(), Some(&previous));
        assert_eq!(notices.pending().count(), 0);
    }

    #[tokio::test]
    async fn test_successful_login_sets_session() {
        let mock = MockTransport::new();
        mock.respond("student/login", 200, json!({"data": {"token": "abc", "name": "Ada"}}));
        let client = client(&mock);

        let mut session = Session::new();
        let mut notices = NoticeBoard::new();
        let pending = notices.start(LOGGING_IN);

        let result = sign_in(&client, Role::Student, &credentials()).await;
        let identity = settle_login(result, Role::Student, &mut session, &mut notices, pending).unwrap();

        assert_eq!(identity.get("token"), Some(&json!("abc")));
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::Student));
        let notice = notices.get(pending).unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Welcome back, Ada");
    }

    #[tokio::test]
    async fn test_incomplete_credentials_never_hit_the_network() {
        let mock = MockTransport::new();
        let client = client(&mock);
        let result = sign_in(&client, Role::Teacher, &Credentials::default()).await;
        assert!(matches!(result, Err(ApiError::Request(_))));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_clears_cache() {
        let mock = MockTransport::new();
        mock.respond("student/profile", 200, json!({"name": "Ada"}));
        mock.respond("student/logout", 200, Value::Null);
        let client = client(&mock);

        client.student_profile().await.unwrap();
        sign_out(&client, Role::Student).await.unwrap();
        assert_eq!(client.state(&STUDENT_PROFILE, &Value::Null), QueryState::Uninitialized);
    }
}
