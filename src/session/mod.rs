//! Sessions
//!
//! Mock authentication: the session lifecycle (sign in, persist token, check presence,
//! sign out) without real credential verification, which belongs to an
//! [`IdentityProvider`].

mod errors;
mod identity;
mod models;
mod service;
mod token;

pub use errors::*;
pub use identity::*;
pub use models::*;
pub use service::*;
pub use token::*;
