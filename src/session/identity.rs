//! Identity providers.

use mockall::automock;
use url::Url;
use uuid::Uuid;

use crate::session::{Credentials, Registration, SessionError, User};

/// Display name given to users signed in through [`DemoIdentityProvider`].
pub const DEMO_USER_NAME: &str = "Demo User";

const AVATAR_BASE_URL: &str = "https://ui-avatars.com/api/";

/// Resolves credentials into users. Verification is entirely the provider's concern.
#[automock]
pub trait IdentityProvider: Send + Sync {
    /// Resolve an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Identity`] if the provider rejects the credentials.
    fn sign_in(&self, credentials: &Credentials) -> Result<User, SessionError>;

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Identity`] if the provider rejects the registration.
    fn sign_up(&self, registration: &Registration) -> Result<User, SessionError>;
}

/// Stand-in provider that accepts any credentials without checking them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoIdentityProvider;

impl IdentityProvider for DemoIdentityProvider {
    fn sign_in(&self, credentials: &Credentials) -> Result<User, SessionError> {
        Ok(User {
            id: user_id_for_email(&credentials.email),
            name: DEMO_USER_NAME.to_string(),
            email: credentials.email.clone(),
            avatar: Some(avatar_url(DEMO_USER_NAME)?),
        })
    }

    fn sign_up(&self, registration: &Registration) -> Result<User, SessionError> {
        Ok(User {
            id: user_id_for_email(&registration.credentials.email),
            name: registration.name.clone(),
            email: registration.credentials.email.clone(),
            avatar: Some(avatar_url(&registration.name)?),
        })
    }
}

/// Generated avatar image for a display name.
///
/// # Errors
///
/// Returns a [`url::ParseError`] if the URL cannot be assembled.
pub fn avatar_url(name: &str) -> Result<String, url::ParseError> {
    let url = Url::parse_with_params(AVATAR_BASE_URL, &[("name", name), ("background", "random")])?;

    Ok(url.into())
}

/// Stable user id for an email address (UUID v5, case-insensitive).
pub fn user_id_for_email(email: &str) -> String {
    let normalized = format!("mailto:{}", email.trim().to_lowercase());

    Uuid::new_v5(&Uuid::NAMESPACE_URL, normalized.as_bytes()).to_string()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn avatar_url_encodes_name() -> TestResult {
        assert_eq!(
            avatar_url("Demo User")?,
            "https://ui-avatars.com/api/?name=Demo+User&background=random"
        );
        assert_eq!(
            avatar_url("Zoë & Co")?,
            "https://ui-avatars.com/api/?name=Zo%C3%AB+%26+Co&background=random"
        );

        Ok(())
    }

    #[test]
    fn user_id_is_stable_per_email() {
        assert_eq!(
            user_id_for_email("Ada@Example.com"),
            user_id_for_email(" ada@example.com ")
        );
        assert_ne!(
            user_id_for_email("ada@example.com"),
            user_id_for_email("grace@example.com")
        );
    }

    #[test]
    fn demo_sign_in_synthesizes_user() -> TestResult {
        let user = DemoIdentityProvider.sign_in(&Credentials::new("demo@example.com", "anything"))?;

        assert_eq!(user.name, DEMO_USER_NAME);
        assert_eq!(user.email, "demo@example.com");
        assert_eq!(user.id, user_id_for_email("demo@example.com"));
        assert!(user.avatar.is_some());

        Ok(())
    }

    #[test]
    fn demo_sign_up_uses_given_name() -> TestResult {
        let user = DemoIdentityProvider.sign_up(&Registration::new(
            "Grace Hopper",
            "grace@example.com",
            "pw",
        ))?;

        assert_eq!(user.name, "Grace Hopper");
        assert_eq!(
            user.avatar.as_deref(),
            Some("https://ui-avatars.com/api/?name=Grace+Hopper&background=random")
        );

        Ok(())
    }
}
