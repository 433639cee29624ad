//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod record_repo;
pub mod record_type_repo;

pub use category_repo::CategoryRepo;
pub use record_repo::RecordRepo;
pub use record_type_repo::TypeRepo;
