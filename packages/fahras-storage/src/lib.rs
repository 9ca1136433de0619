pub mod db;
pub mod models;
pub mod queries;
pub mod schema;
pub mod sources;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
