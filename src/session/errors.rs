//! Session errors.

use thiserror::Error;

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The operation needs a signed-in user.
    #[error("user not authenticated")]
    NotAuthenticated,

    /// The identity provider refused the request.
    #[error("{0}")]
    Identity(String),

    /// The avatar URL could not be built.
    #[error("invalid avatar url")]
    AvatarUrl(#[from] url::ParseError),
}
