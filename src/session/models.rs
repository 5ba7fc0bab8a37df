//! Session data models.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Fields to overwrite on the current user. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: Option<String>,

    /// New contact email.
    pub email: Option<String>,

    /// New avatar image URL.
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.avatar.is_none()
    }

    pub(crate) fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }

        if let Some(email) = self.email {
            user.email = email;
        }

        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }
    }
}

/// Sign-in credentials.
#[derive(Clone)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    password: String,
}

impl Credentials {
    /// Bundle an email and password.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// The plaintext password, for handing to an identity provider.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Sign-up details.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Display name for the new account.
    pub name: String,

    /// Email and password for the new account.
    pub credentials: Credentials,
}

impl Registration {
    /// Bundle sign-up details.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            credentials: Credentials::new(email, password),
        }
    }
}
