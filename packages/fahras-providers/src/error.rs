use std::error::Error as _;

pub type Result<T, E = FetchError> = std::result::Result<T, E>;

/// Why one provider call produced no rows. The display text is the reason reported to callers.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
	#[error("timeout")]
	Timeout,
	#[error("HTTP {0}")]
	Status(u16),
	#[error("Empty response")]
	EmptyBody,
	#[error("Invalid JSON: {0}")]
	InvalidJson(String),
	#[error("{0}")]
	InvalidHeader(String),
	#[error("{0}")]
	Transport(String),
}
impl From<reqwest::Error> for FetchError {
	fn from(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			return Self::Timeout;
		}

		let mut message = err.to_string();
		let mut source = err.source();

		while let Some(cause) = source {
			message.push_str(": ");
			message.push_str(&cause.to_string());

			source = cause.source();
		}

		Self::Transport(message)
	}
}
impl From<reqwest::header::InvalidHeaderName> for FetchError {
	fn from(err: reqwest::header::InvalidHeaderName) -> Self {
		Self::InvalidHeader(err.to_string())
	}
}
impl From<reqwest::header::InvalidHeaderValue> for FetchError {
	fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
		Self::InvalidHeader(err.to_string())
	}
}
