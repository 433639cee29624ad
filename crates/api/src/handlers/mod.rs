pub mod records;
pub mod taxonomy;
