pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
}
impl From<fahras_storage::Error> for Error {
	fn from(err: fahras_storage::Error) -> Self {
		match err {
			fahras_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			fahras_storage::Error::Decode(inner) => Self::Storage { message: inner.to_string() },
			fahras_storage::Error::NotFound(message) => Self::NotFound { message },
		}
	}
}

impl From<fahras_providers::FetchError> for Error {
	fn from(err: fahras_providers::FetchError) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
