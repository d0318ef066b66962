//! Typed calls for each portal endpoint.
//!
//! These wrap [`ApiClient::query`] and [`ApiClient::mutate`] so views deal in
//! store models rather than raw JSON. Profile payloads may arrive bare or inside
//! a `{ "data": ... }` envelope; both are accepted.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use store::{ChildSummary, Credentials, Identity, ParentProfile, RegistrationRequest, Role, StudentProfile};

use crate::client::{ApiClient, LazyQuery};
use crate::endpoint::{ALL_CHILDREN, LOGIN, LOGOUT, PARENT_PROFILE, REGISTER, STUDENT_PROFILE};
use crate::transport::Transport;
use crate::ApiError;

/// Login result after the `{ data }` transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub data: Value,
}

impl LoginResponse {
    /// The identity to store in the session.
    ///
    /// Taken from `data.user` when the backend nests it, otherwise from `data`
    /// itself. The role of the login flow is filled in when the backend omits it.
    pub fn identity(&self, role: Role) -> Identity {
        let mut identity = match self.data.get("user") {
            Some(Value::Object(user)) => user.clone(),
            _ => self.data.as_object().cloned().unwrap_or_default(),
        };
        identity
            .entry("role")
            .or_insert_with(|| Value::String(role.as_str().to_string()));
        identity
    }
}

fn flow(role: Role) -> Value {
    json!({ "flow_type": role.as_str() })
}

fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn decode<M: DeserializeOwned>(value: Value) -> Result<M, ApiError> {
    serde_json::from_value(unwrap_data(value)).map_err(|e| ApiError::Decode(e.to_string()))
}

fn encode<S: Serialize>(body: &S) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Request(e.to_string()))
}

impl<T: Transport + 'static> ApiClient<T> {
    pub async fn login(&self, role: Role, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let value = self.mutate(&LOGIN, flow(role), encode(credentials)?).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn logout(&self, role: Role) -> Result<(), ApiError> {
        self.mutate(&LOGOUT, flow(role), json!({})).await.map(|_| ())
    }

    pub async fn register(&self, request: &RegistrationRequest) -> Result<Value, ApiError> {
        self.mutate(&REGISTER, flow(request.role), encode(request)?)
            .await
    }

    pub async fn parent_profile(&self) -> Result<ParentProfile, ApiError> {
        decode(self.query(&PARENT_PROFILE, Value::Null).await?)
    }

    /// Parent profile, fetched only once the returned handle is triggered.
    pub fn lazy_parent_profile(&self) -> LazyQuery<T> {
        self.lazy(&PARENT_PROFILE)
    }

    pub async fn all_children(&self) -> Result<Vec<ChildSummary>, ApiError> {
        decode(self.query(&ALL_CHILDREN, Value::Null).await?)
    }

    pub async fn student_profile(&self) -> Result<StudentProfile, ApiError> {
        decode(self.query(&STUDENT_PROFILE, Value::Null).await?)
    }
}

/// Decode the value held by a triggered [`LazyQuery`] for the parent profile.
pub fn parent_profile_from(value: &Value) -> Result<ParentProfile, ApiError> {
    decode(value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::mock::MockTransport;

    fn client(mock: &MockTransport) -> ApiClient<MockTransport> {
        ApiClient::new(ApiConfig::new("http://portal.test/api"), mock.clone())
    }

    #[tokio::test]
    async fn test_login_keeps_payload_exact() {
        let mock = MockTransport::new();
        mock.respond("student/login", 200, json!({"data": {"token": "abc"}}));
        let client = client(&mock);

        let credentials = Credentials {
            email: "ada@school.test".into(),
            password: "secret".into(),
        };
        let response = client.login(Role::Student, &credentials).await.unwrap();
        assert_eq!(response.data, json!({"token": "abc"}));
        assert_eq!(
            mock.calls()[0].body,
            Some(json!({"email": "ada@school.test", "password": "secret"}))
        );
    }

    #[test]
    fn test_identity_prefers_nested_user() {
        let response = LoginResponse {
            data: json!({"token": "abc", "user": {"name": "Ada", "role": "student"}}),
        };
        let identity = response.identity(Role::Student);
        assert_eq!(identity.get("name"), Some(&json!("Ada")));
        assert!(identity.get("token").is_none());
    }

    #[test]
    fn test_identity_fills_missing_role() {
        let response = LoginResponse {
            data: json!({"token": "abc"}),
        };
        let identity = response.identity(Role::Parent);
        assert_eq!(identity.get("token"), Some(&json!("abc")));
        assert_eq!(identity.get("role"), Some(&json!("parent")));

        // A role sent by the backend wins.
        let response = LoginResponse {
            data: json!({"role": "teacher"}),
        };
        assert_eq!(response.identity(Role::Student).get("role"), Some(&json!("teacher")));
    }

    #[tokio::test]
    async fn test_children_accept_bare_and_wrapped_lists() {
        let mock = MockTransport::new();
        mock.respond(
            "parent/children",
            200,
            json!([{"name": "Tobi"}, {"studentProfile": {"name": "Kemi"}}]),
        );
        let client = client(&mock);
        let children = client.all_children().await.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].display_name(), "Tobi");
        assert_eq!(children[1].display_name(), "Kemi");

        assert_eq!(
            decode::<Vec<ChildSummary>>(json!({"data": [{"name": "Tobi"}]})).unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_decode_error_is_reported() {
        let mock = MockTransport::new();
        mock.respond("parent/children", 200, json!({"data": "nope"}));
        let client = client(&mock);
        assert!(matches!(
            client.all_children().await,
            Err(ApiError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_logout_targets_the_role_flow() {
        let mock = MockTransport::new();
        mock.respond("teacher/logout", 204, Value::Null);
        let client = client(&mock);
        client.logout(Role::Teacher).await.unwrap();
        assert_eq!(mock.calls()[0].url, "http://portal.test/api/teacher/logout");
    }

    #[tokio::test]
    async fn test_register_moves_revision_and_stales_student_profile() {
        let mock = MockTransport::new();
        mock.respond("student/profile", 200, json!({"name": "Ada"}));
        mock.respond("student/register", 201, json!({"data": {"id": 9}}));
        let client = client(&mock);
        client.student_profile().await.unwrap();
        let before = client.cache().revision();

        let form = store::RegistrationForm {
            role: Some(Role::Student),
            name: "Ada Obi".into(),
            email: "ada@school.test".into(),
            password: "correct horse".into(),
            confirm_password: "correct horse".into(),
            detail: "Grade 6".into(),
            ..Default::default()
        };
        client.register(&form.to_request().unwrap()).await.unwrap();

        assert!(client.cache().revision() > before);
        assert!(client
            .cache()
            .is_stale(&store::CacheKey::new(STUDENT_PROFILE.name, &Value::Null)));
        assert_eq!(
            mock.calls()[1].url,
            "http://portal.test/api/student/register"
        );
    }
}
