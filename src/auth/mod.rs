//! Authentication is an adapter-only concern: this module turns a bearer
//! token into a resolved [`Identity`], and the engine accepts nothing else.
//! A raw token never crosses the engine boundary.

pub mod extractor;
pub mod verifier;

pub use extractor::AuthUser;
pub use verifier::{AuthError, Identity, TokenVerifier};
