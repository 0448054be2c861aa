pub mod exam;
pub mod file_type;
pub mod schema;
