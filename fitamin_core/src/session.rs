//! Local session store.
//!
//! Mirrors the browser's local storage: a JSON document holding the fixed
//! keys `token` and `user`. The cached user doubles as the last-known-good
//! profile when the backend cannot be reached.

use crate::{store, Result, UserProfile};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Authentication token and cached user
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Bearer token, if logged in
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Store a fresh login
    pub fn sign_in(&mut self, token: String, user: Option<UserProfile>) {
        self.token = Some(token);
        if user.is_some() {
            self.user = user;
        }
    }

    /// Forget token and cached user
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    /// Load the session; missing or corrupt files yield a logged-out session
    pub fn load(path: &Path) -> Result<Self> {
        store::load_or_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        store::save_atomic(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserProfile {
        UserProfile {
            id: "64f0".into(),
            name: "Budi".into(),
            email: "budi@example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_session_is_logged_out() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let session = Session {
            token: Some(String::new()),
            user: None,
        };
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_sign_in_keeps_cached_user_when_none_given() {
        let mut session = Session::default();
        session.sign_in("t1".into(), Some(user()));
        session.sign_in("t2".into(), None);
        assert_eq!(session.token(), Some("t2"));
        assert_eq!(session.user.as_ref().unwrap().name, "Budi");
    }

    #[test]
    fn test_persisted_with_fixed_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("session.json");

        let mut session = Session::default();
        session.sign_in("abc".into(), Some(user()));
        session.save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["token"], "abc");
        assert_eq!(raw["user"]["email"], "budi@example.com");

        let loaded = Session::load(&path).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_clear_logs_out() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("session.json");

        let mut session = Session::default();
        session.sign_in("abc".into(), Some(user()));
        session.clear();
        session.save(&path).unwrap();

        let loaded = Session::load(&path).unwrap();
        assert!(!loaded.is_authenticated());
        assert!(loaded.user.is_none());
    }
}
