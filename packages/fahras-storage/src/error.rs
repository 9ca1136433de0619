#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Stored JSON is malformed: {0}")]
	Decode(#[from] serde_json::Error),
	#[error("Not found: {0}")]
	NotFound(String),
}
