//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching the
//! database row, plus any `Deserialize` request payloads for that entity.

pub mod category;
pub mod record;
pub mod record_type;
