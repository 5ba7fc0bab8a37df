//! Session lifecycle.

use std::{fmt, sync::Arc};

use tracing::{debug, error, info, warn};

use crate::{
    session::{
        Credentials, IdentityProvider, ProfileUpdate, Registration, SessionError, SessionToken,
        User,
    },
    store::{Decoded, JsonStore, StoreError, StoreKey},
};

/// Current user and token, mirrored to the `user` and `authToken` store keys.
///
/// The session is authenticated only while both are present. Persisting the session is
/// best-effort: storage failures are logged and the in-memory session stays current.
pub struct SessionManager {
    store: JsonStore,
    identity: Arc<dyn IdentityProvider>,
    user: Option<User>,
    token: Option<SessionToken>,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("user", &self.user)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// A signed-out session. Call [`SessionManager::hydrate`] to restore a stored one.
    pub fn new(store: JsonStore, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            store,
            identity,
            user: None,
            token: None,
        }
    }

    /// A session restored from the store.
    pub fn restore(store: JsonStore, identity: Arc<dyn IdentityProvider>) -> Self {
        let mut session = Self::new(store, identity);

        session.hydrate();

        session
    }

    /// Reload the user and token from the store, replacing the in-memory session.
    ///
    /// A corrupt user record is ignored. A half-stored session (user without token or
    /// the reverse) is kept as-is and reports unauthenticated.
    pub fn hydrate(&mut self) {
        self.user = match self.store.decode::<User>(StoreKey::User) {
            Decoded::Value(user) => Some(user),
            Decoded::Missing | Decoded::Corrupt(_) | Decoded::Unavailable(_) => None,
        };

        self.token = self.read_token();

        match (&self.user, &self.token) {
            (Some(user), Some(_)) => debug!(user_id = %user.id, "session restored"),
            (Some(_), None) | (None, Some(_)) => {
                warn!("stored session is incomplete; treating as signed out");
            }
            (None, None) => debug!("no stored session"),
        }
    }

    fn read_token(&self) -> Option<SessionToken> {
        let raw = match self.store.read_raw(StoreKey::AuthToken) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "session token unavailable");
                return None;
            }
        };

        // Tokens are written JSON-encoded; plain text is accepted too.
        let text = serde_json::from_str::<String>(&raw).unwrap_or(raw);

        if text.is_empty() {
            return None;
        }

        let token = SessionToken::from_raw(text);

        if !token.is_well_formed() {
            debug!("stored session token has an unrecognised format");
        }

        Some(token)
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The session token, if any.
    pub fn auth_token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Whether both a user and a token are present.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// Id of the signed-in user.
    pub fn user_id(&self) -> Option<&str> {
        self.user().map(|user| user.id.as_str())
    }

    /// Sign in through the identity provider and start a new session.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`SessionError`] if it rejects the credentials. The
    /// current session is left untouched in that case.
    pub fn sign_in(&mut self, credentials: &Credentials) -> Result<&User, SessionError> {
        let user = self.identity.sign_in(credentials)?;

        info!(user_id = %user.id, "signed in");

        Ok(self.start(user))
    }

    /// Register through the identity provider and start a new session.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`SessionError`] if it rejects the registration.
    pub fn sign_up(&mut self, registration: &Registration) -> Result<&User, SessionError> {
        let user = self.identity.sign_up(registration)?;

        info!(user_id = %user.id, "signed up");

        Ok(self.start(user))
    }

    /// End the session. Signing out while signed out is allowed.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "signed out");
        }

        self.token = None;
        self.persist();
    }

    /// Overwrite fields of the current user.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] unless both a user and a token are
    /// present.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<&User, SessionError> {
        if self.token.is_none() {
            return Err(SessionError::NotAuthenticated);
        }

        let Some(user) = self.user.as_mut() else {
            return Err(SessionError::NotAuthenticated);
        };

        update.apply_to(user);

        info!(user_id = %user.id, "profile updated");

        persist_user(&self.store, Some(&*user));

        Ok(&*user)
    }

    fn start(&mut self, user: User) -> &User {
        let token = SessionToken::generate();

        persist_user(&self.store, Some(&user));
        persist_token(&self.store, Some(&token));

        self.token = Some(token);
        self.user.insert(user)
    }

    fn persist(&self) {
        persist_user(&self.store, self.user.as_ref());
        persist_token(&self.store, self.token.as_ref());
    }
}

fn persist_user(store: &JsonStore, user: Option<&User>) {
    let result = match user {
        Some(user) => store.write(StoreKey::User, user),
        None => store.clear(StoreKey::User),
    };

    log_persist_failure(StoreKey::User, result);
}

fn persist_token(store: &JsonStore, token: Option<&SessionToken>) {
    let result = match token {
        Some(token) => store.write(StoreKey::AuthToken, token.as_str()),
        None => store.clear(StoreKey::AuthToken),
    };

    log_persist_failure(StoreKey::AuthToken, result);
}

fn log_persist_failure(key: StoreKey, result: Result<(), StoreError>) {
    if let Err(error) = result {
        error!(%key, %error, "failed to persist session");
    }
}
