//! Domain logic shared by the persistence and HTTP layers.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod record;
pub mod record_filter;
pub mod types;
