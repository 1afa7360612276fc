use std::fmt;

use serde::{Deserialize, Serialize};

/// Who is logged in. Replaced wholesale, never patched.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn authenticated(
        user_id: i64,
        token: impl Into<String>,
        display_name: Option<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            logged_in: true,
            user_id: Some(user_id),
            display_name,
            email,
            token: Some(token.into()),
        }
    }

    /// A logged-in session must hold a non-empty token and a user id, a
    /// logged-out one must hold no credential at all.
    pub fn is_well_formed(&self) -> bool {
        if self.logged_in {
            self.user_id.is_some() && self.token.as_deref().is_some_and(|t| !t.is_empty())
        } else {
            self.token.is_none() && self.user_id.is_none()
        }
    }

    pub fn credentials(&self) -> Option<(i64, &str)> {
        if !self.logged_in {
            return None;
        }
        match (self.user_id, self.token.as_deref()) {
            (Some(user_id), Some(token)) if !token.is_empty() => Some((user_id, token)),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("anonymous")
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.logged_in)
            .field("user_id", &self.user_id)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
