//! # Endpoint declarations
//!
//! Every backend operation the portal uses is described once, as a static
//! [`Endpoint`]: method, URL template, credentials, the cache [`Tag`]s a query
//! provides or a mutation invalidates, and an optional response transform.
//!
//! | Endpoint | Method | Path | Cache |
//! |----------|--------|------|-------|
//! | [`LOGIN`] | POST | `{flow_type}/login` | invalidates `getStudent`; keeps only `{ data }` |
//! | [`LOGOUT`] | POST | `{flow_type}/logout` | invalidates every profile tag |
//! | [`REGISTER`] | POST | `{flow_type}/register` | invalidates `getStudent` |
//! | [`PARENT_PROFILE`] | GET | `parent/profile` | provides `getParent` |
//! | [`ALL_CHILDREN`] | GET | `parent/children` | provides `getChildren` |
//! | [`STUDENT_PROFILE`] | GET | `student/profile` | provides `getStudent` |
//!
//! `{name}` placeholders are filled from the fields of the argument object.

use serde_json::{json, Value};
use store::Tag;

use crate::transport::{ApiResponse, Method};
use crate::ApiError;

pub const STUDENT_TAG: Tag = Tag("getStudent");
pub const PARENT_TAG: Tag = Tag("getParent");
pub const CHILDREN_TAG: Tag = Tag("getChildren");

#[derive(Debug)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub credentials: bool,
    pub provides: &'static [Tag],
    pub invalidates: &'static [Tag],
    pub transform: Option<fn(Value) -> Value>,
}

pub static LOGIN: Endpoint = Endpoint {
    name: "login",
    method: Method::Post,
    path: "{flow_type}/login",
    credentials: true,
    provides: &[],
    invalidates: &[STUDENT_TAG],
    transform: Some(keep_data),
};

pub static LOGOUT: Endpoint = Endpoint {
    name: "logout",
    method: Method::Post,
    path: "{flow_type}/logout",
    credentials: true,
    provides: &[],
    invalidates: &[STUDENT_TAG, PARENT_TAG, CHILDREN_TAG],
    transform: None,
};

pub static REGISTER: Endpoint = Endpoint {
    name: "register",
    method: Method::Post,
    path: "{flow_type}/register",
    credentials: true,
    provides: &[],
    invalidates: &[STUDENT_TAG],
    transform: None,
};

pub static PARENT_PROFILE: Endpoint = Endpoint {
    name: "getParentProfile",
    method: Method::Get,
    path: "parent/profile",
    credentials: true,
    provides: &[PARENT_TAG],
    invalidates: &[],
    transform: None,
};

pub static ALL_CHILDREN: Endpoint = Endpoint {
    name: "getAllChildren",
    method: Method::Get,
    path: "parent/children",
    credentials: true,
    provides: &[CHILDREN_TAG],
    invalidates: &[],
    transform: None,
};

pub static STUDENT_PROFILE: Endpoint = Endpoint {
    name: "getStudentProfile",
    method: Method::Get,
    path: "student/profile",
    credentials: true,
    provides: &[STUDENT_TAG],
    invalidates: &[],
    transform: None,
};

/// Keep exactly one level of the response: `{ data: response.data }`.
pub fn keep_data(raw: Value) -> Value {
    let data = match raw {
        Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
        _ => Value::Null,
    };
    json!({ "data": data })
}

fn segment(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Endpoint {
    /// Fill the path template from `params`.
    pub fn render_path(&self, params: &Value) -> Result<String, ApiError> {
        let mut out = String::with_capacity(self.path.len());
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let end = rest[start..]
                .find('}')
                .map(|i| start + i)
                .ok_or_else(|| ApiError::Request(format!("unclosed placeholder in `{}`", self.path)))?;
            let name = &rest[start + 1..end];
            let value = params
                .get(name)
                .and_then(segment)
                .ok_or_else(|| ApiError::Request(format!("missing path parameter `{name}`")))?;
            out.push_str(&value);
            rest = &rest[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    /// Turn a raw response into the value handed to callers.
    pub fn decode(&self, response: ApiResponse) -> Result<Value, ApiError> {
        if !response.is_success() {
            return Err(ApiError::Http {
                status: response.status,
                body: response.body,
            });
        }
        Ok(match self.transform {
            Some(transform) => transform(response.body),
            None => response.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_flow_type() {
        let path = LOGIN.render_path(&json!({"flow_type": "student"})).unwrap();
        assert_eq!(path, "student/login");
        assert_eq!(PARENT_PROFILE.render_path(&Value::Null).unwrap(), "parent/profile");
    }

    #[test]
    fn test_render_missing_parameter() {
        let err = LOGIN.render_path(&json!({})).unwrap_err();
        assert_eq!(err, ApiError::Request("missing path parameter `flow_type`".into()));
    }

    #[test]
    fn test_login_transform_keeps_single_level() {
        let response = ApiResponse {
            status: 200,
            body: json!({"data": {"token": "abc"}}),
        };
        assert_eq!(LOGIN.decode(response).unwrap(), json!({"data": {"token": "abc"}}));

        // Anything next to `data` is dropped; nested fields are untouched.
        let response = ApiResponse {
            status: 200,
            body: json!({"data": {"token": "abc", "user": {"name": "Ada"}}, "message": "ok"}),
        };
        assert_eq!(
            LOGIN.decode(response).unwrap(),
            json!({"data": {"token": "abc", "user": {"name": "Ada"}}})
        );
    }

    #[test]
    fn test_untransformed_endpoints_pass_body_through() {
        let response = ApiResponse {
            status: 200,
            body: json!({"data": [1, 2]}),
        };
        assert_eq!(ALL_CHILDREN.decode(response).unwrap(), json!({"data": [1, 2]}));
    }

    #[test]
    fn test_error_status_is_not_transformed() {
        let response = ApiResponse {
            status: 500,
            body: json!({"message": "boom"}),
        };
        let err = LOGIN.decode(response).unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_login_invalidates_student_tag() {
        assert!(LOGIN.invalidates.contains(&STUDENT_TAG));
        assert!(STUDENT_PROFILE.provides.contains(&STUDENT_TAG));
        assert!(LOGIN.credentials && PARENT_PROFILE.credentials && ALL_CHILDREN.credentials);
    }
}
