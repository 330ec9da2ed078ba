//! Authentication module
//!
//! Supports: TOPdesk operator login, Zenya API tokens
//!
//! The `Authenticator` owns the backend credential. Callers only ever see
//! the rendered headers; refresh happens lazily inside `headers()` when the
//! cached token has expired.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, Credential};
