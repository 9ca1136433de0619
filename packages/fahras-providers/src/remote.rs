use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time;

use fahras_domain::source::RemoteSource;

use crate::{FetchError, Result};

const INVALID_JSON_SNIPPET_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteSuccess {
	pub label: String,
	#[serde(rename = "data")]
	pub records: Vec<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteFailure {
	pub label: String,
	#[serde(rename = "error")]
	pub reason: String,
}

/// Result of one provider call for one request.
#[derive(Clone, Debug, PartialEq)]
pub enum RemoteOutcome {
	Success(RemoteSuccess),
	Failure(RemoteFailure),
}
impl RemoteOutcome {
	pub fn success(label: impl Into<String>, records: Vec<Value>) -> Self {
		Self::Success(RemoteSuccess { label: label.into(), records })
	}

	pub fn failure(label: impl Into<String>, err: &FetchError) -> Self {
		Self::Failure(RemoteFailure { label: label.into(), reason: err.to_string() })
	}

	pub fn label(&self) -> &str {
		match self {
			Self::Success(success) => &success.label,
			Self::Failure(failure) => &failure.label,
		}
	}
}

/// Shared HTTP client for provider calls. Every call gets its own deadline.
#[derive(Clone, Debug)]
pub struct RemoteClient {
	client: Client,
	user_agent: String,
	timeout: Duration,
}
impl RemoteClient {
	pub fn new(cfg: &fahras_config::Remote) -> Result<Self> {
		let client = Client::builder().build()?;

		Ok(Self {
			client,
			user_agent: cfg.user_agent.clone(),
			timeout: Duration::from_millis(cfg.timeout_ms),
		})
	}

	/// Calls one provider. Returns `None` for a source without a URL template.
	pub async fn fetch(&self, source: &RemoteSource, remote_query: &str) -> Option<RemoteOutcome> {
		if source.url_template.is_empty() {
			return None;
		}

		let url = source.render_url(&urlencoding::encode(remote_query));
		let outcome = match time::timeout(self.timeout, self.fetch_rows(source, &url)).await {
			Ok(Ok(rows)) => RemoteOutcome::success(source.name.as_str(), rows),
			Ok(Err(err)) => RemoteOutcome::failure(source.name.as_str(), &err),
			Err(_) => RemoteOutcome::failure(source.name.as_str(), &FetchError::Timeout),
		};

		Some(outcome)
	}

	async fn fetch_rows(&self, source: &RemoteSource, url: &str) -> Result<Vec<Value>> {
		let headers = crate::request_headers(&self.user_agent, &source.headers)?;
		let res = self.client.get(url).headers(headers).send().await?;
		let status = res.status();
		let body = res.text().await?;

		if !status.is_success() {
			return Err(FetchError::Status(status.as_u16()));
		}

		parse_rows(&body)
	}
}

/// Decodes a provider body into raw rows.
pub fn parse_rows(body: &str) -> Result<Vec<Value>> {
	if body.trim().is_empty() {
		return Err(FetchError::EmptyBody);
	}

	let decoded: Value = serde_json::from_str(body).map_err(|_| {
		FetchError::InvalidJson(body.chars().take(INVALID_JSON_SNIPPET_CHARS).collect())
	})?;

	Ok(rows_from_json(decoded))
}

/// `{"data": [..]}` yields the inner array, an array is used as is, any other object yields its
/// values in document order, and scalars yield nothing.
pub fn rows_from_json(decoded: Value) -> Vec<Value> {
	match decoded {
		Value::Array(rows) => rows,
		Value::Object(mut object) => {
			if matches!(object.get("data"), Some(Value::Array(_)))
				&& let Some(Value::Array(rows)) = object.remove("data")
			{
				return rows;
			}

			object.into_iter().map(|(_, value)| value).collect()
		},
		_ => Vec::new(),
	}
}
