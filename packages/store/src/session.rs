//! # Session: the identity of whoever is signed in to this tab
//!
//! [`Session`] holds at most one [`Identity`] for the lifetime of the browser tab.
//! An identity is an arbitrary JSON object: the backend decides its shape and the
//! client never validates it, it only reads a few well-known fields (`role`, `name`,
//! `email`) for display and routing.
//!
//! The only writers are the three operations below. There is a single "no user"
//! sentinel, `None`, used both before the first login and after logout.
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`set_user`](Session::set_user) | Replace the identity wholesale. |
//! | [`clear_user`](Session::clear_user) | Drop the identity (logout). |
//! | [`update_user`](Session::update_user) | Shallow-merge fields into the current identity; no-op when signed out. |

use serde_json::{Map, Value};

use crate::models::Role;

/// A signed-in user as returned by the backend.
pub type Identity = Map<String, Value>;

/// The current tab's session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    user: Option<Identity>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored identity.
    pub fn set_user(&mut self, identity: Identity) {
        self.user = Some(identity);
    }

    /// Forget the stored identity.
    pub fn clear_user(&mut self) {
        self.user = None;
    }

    /// Merge `partial` into the stored identity, top-level keys only.
    ///
    /// Returns `false` (and changes nothing) when nobody is signed in.
    pub fn update_user(&mut self, partial: Identity) -> bool {
        match self.user.as_mut() {
            Some(user) => {
                user.extend(partial);
                true
            }
            None => false,
        }
    }

    pub fn user(&self) -> Option<&Identity> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Role carried by the identity's `role` field, if it names a known role.
    pub fn role(&self) -> Option<Role> {
        self.field("role").and_then(|r| r.parse().ok())
    }

    /// Name to greet the user with: `name`, then `email`, then "Guest".
    pub fn display_name(&self) -> &str {
        self.field("name")
            .or_else(|| self.field("email"))
            .unwrap_or("Guest")
    }

    /// A string field of the identity.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.user.as_ref()?.get(key)?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::Config;
    use serde_json::json;

    fn identity(value: Value) -> Identity {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[derive(Clone, Debug)]
    enum Op {
        Set(Identity),
        Clear,
        Update(Identity),
    }

    /// Plain model: set replaces, clear nulls, update merges only when non-null.
    fn replay_model(ops: &[Op]) -> Option<Identity> {
        let mut model: Option<Identity> = None;
        for op in ops {
            match op {
                Op::Set(id) => model = Some(id.clone()),
                Op::Clear => model = None,
                Op::Update(partial) => {
                    if let Some(m) = model.as_mut() {
                        for (k, v) in partial {
                            m.insert(k.clone(), v.clone());
                        }
                    }
                }
            }
        }
        model
    }

    fn replay_session(ops: &[Op]) -> Session {
        let mut session = Session::new();
        for op in ops {
            match op {
                Op::Set(id) => session.set_user(id.clone()),
                Op::Clear => session.clear_user(),
                Op::Update(partial) => {
                    session.update_user(partial.clone());
                }
            }
        }
        session
    }

    #[test]
    fn test_starts_signed_out() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert_eq!(session.display_name(), "Guest");
        assert!(session.role().is_none());
    }

    #[test]
    fn test_set_replaces_wholesale() {
        let mut session = Session::new();
        session.set_user(identity(json!({"name": "Ada", "grade": 7})));
        session.set_user(identity(json!({"email": "bo@school.test"})));

        let user = session.user().unwrap();
        assert!(user.get("name").is_none());
        assert!(user.get("grade").is_none());
        assert_eq!(session.display_name(), "bo@school.test");
    }

    #[test]
    fn test_update_merges_shallowly() {
        let mut session = Session::new();
        session.set_user(identity(json!({
            "name": "Ada",
            "contactInfo": {"phone": "123", "address": "Main St"}
        })));

        assert!(session.update_user(identity(json!({"contactInfo": {"phone": "456"}}))));

        let user = session.user().unwrap();
        assert_eq!(user["name"], "Ada");
        // Nested objects are replaced, not merged.
        assert_eq!(user["contactInfo"], json!({"phone": "456"}));
    }

    #[test]
    fn test_update_when_signed_out_is_noop() {
        let mut session = Session::new();
        assert!(!session.update_user(identity(json!({"name": "Ada"}))));
        assert!(!session.is_authenticated());

        session.set_user(identity(json!({"name": "Ada"})));
        session.clear_user();
        assert!(!session.update_user(identity(json!({"name": "Bo"}))));
        assert_eq!(session, Session::new());
    }

    #[test]
    fn test_role_parsing() {
        let mut session = Session::new();
        session.set_user(identity(json!({"role": "parent"})));
        assert_eq!(session.role(), Some(Role::Parent));

        session.update_user(identity(json!({"role": "janitor"})));
        assert_eq!(session.role(), None);
    }

    fn arb_identity() -> impl Strategy<Value = Identity> {
        let key = prop::sample::select(vec!["name", "role", "email", "room"]);
        let value = prop_oneof![
            "[a-z]{0,4}".prop_map(Value::from),
            any::<u8>().prop_map(Value::from),
            Just(Value::Null),
            Just(json!({"phone": "123"})),
        ];
        prop::collection::btree_map(key, value, 0..4).prop_map(|fields| {
            fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect()
        })
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            arb_identity().prop_map(Op::Set),
            Just(Op::Clear),
            arb_identity().prop_map(Op::Update),
        ]
    }

    proptest! {
        #![proptest_config(Config::with_cases(256))]
        #[test]
        fn replay_matches_plain_model(ops in prop::collection::vec(arb_op(), 0..12)) {
            let session = replay_session(&ops);
            let model = replay_model(&ops);
            prop_assert_eq!(session.is_authenticated(), model.is_some());
            prop_assert_eq!(session.user().cloned(), model);
        }
    }
}
