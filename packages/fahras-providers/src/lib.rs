pub mod remote;

mod error;

pub use error::{FetchError, Result};
pub use remote::{RemoteClient, RemoteFailure, RemoteOutcome, RemoteSuccess};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::{Map, Value};

/// Default `User-Agent` followed by the provider's own headers, which win on collision.
pub fn request_headers(user_agent: &str, source_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);

	for (key, value) in source_headers {
		let Some(raw) = value.as_str() else {
			return Err(FetchError::InvalidHeader(format!("Header {key} must be a string.")));
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, HeaderValue::from_str(raw)?);
	}

	Ok(headers)
}
