//! Cross-cutting HTTP middleware.
//!
//! - [`security_headers::security_headers`] -- hardening headers on every response.

pub mod security_headers;
