pub mod mapping;
pub mod query;
pub mod source;
