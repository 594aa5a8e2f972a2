//! Username/password check backed by a single configured account.

use crate::domain::Authenticator;

/// Accepts exactly one username/password pair.
#[derive(Debug, Clone)]
pub struct StaticAuthenticator {
    username: String,
    password: String,
}

impl StaticAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> bool {
        !self.username.is_empty() && username == self.username && password == self.password
    }
}
