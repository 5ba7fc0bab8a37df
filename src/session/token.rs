//! Session token formatting and parsing.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use uuid::Uuid;
use zeroize::Zeroize;

/// Session token identifier prefix.
pub const SESSION_TOKEN_PREFIX: &str = "ev";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 32;

const SESSION_TOKEN_SECRET_HEX_CHARS: usize = SESSION_TOKEN_SECRET_BYTES * 2;

/// Token format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    /// `ev_v1_{uuid}.{hex secret}`
    V1,
}

impl SessionTokenVersion {
    /// Version segment embedded in the token.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

/// Opaque bearer token for a session.
///
/// Tokens minted here look like `ev_v1_{uuid}.{hex secret}`, but any non-empty string
/// read back from storage is accepted as-is.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Mint a new token from OS randomness.
    #[must_use]
    pub fn generate() -> Self {
        let mut secret = [0_u8; SESSION_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut secret);

        let token = format!(
            "{SESSION_TOKEN_PREFIX}_{}_{}.{}",
            SessionTokenVersion::V1.segment(),
            Uuid::now_v7().simple(),
            encode_secret_hex(&secret)
        );

        secret.zeroize();

        Self(token)
    }

    /// Wrap a token read from storage.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token has the format minted by [`SessionToken::generate`].
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let Some((prefix_and_id, secret_hex)) = self.0.split_once('.') else {
            return false;
        };

        let mut id_parts = prefix_and_id.splitn(3, '_');

        let (Some(prefix), Some(version), Some(token_uuid)) =
            (id_parts.next(), id_parts.next(), id_parts.next())
        else {
            return false;
        };

        prefix == SESSION_TOKEN_PREFIX
            && version == SessionTokenVersion::V1.segment()
            && Uuid::try_parse(token_uuid).is_ok()
            && secret_hex.len() == SESSION_TOKEN_SECRET_HEX_CHARS
            && secret_hex
                .bytes()
                .all(|byte| matches!(byte, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(**redacted**)")?;
        Ok(())
    }
}

impl Drop for SessionToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

fn encode_secret_hex(secret: &[u8; SESSION_TOKEN_SECRET_BYTES]) -> String {
    secret.iter().map(|byte| format!("{byte:02x}")).collect()
}
