//! Shared response body types for API handlers.
//!
//! Reads return the entity (or array) directly. Writes answer with a short
//! confirmation in a [`MessageResponse`].

use serde::Serialize;

/// `{ "message": "..." }` confirmation body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}
