use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const QUERY_PLACEHOLDER: &str = "{{query}}";

/// A remote provider as seen by the search engine: configuration data only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSource {
	pub name: String,
	pub url_template: String,
	pub enabled: bool,
	/// Header name to string value, in configuration order.
	#[serde(default)]
	pub headers: Map<String, Value>,
	/// Canonical field name to provider field name. Empty means pass-through.
	#[serde(default)]
	pub mapping: Map<String, Value>,
}
impl RemoteSource {
	/// Source without headers or mapping, as used for the built-in fallback providers.
	pub fn bare(name: impl Into<String>, url_template: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			url_template: url_template.into(),
			enabled: true,
			headers: Map::new(),
			mapping: Map::new(),
		}
	}

	/// Substitutes the first `{{query}}` with an already encoded query. Templates without the
	/// placeholder are returned unchanged.
	pub fn render_url(&self, encoded_query: &str) -> String {
		self.url_template.replacen(QUERY_PLACEHOLDER, encoded_query, 1)
	}
}

/// Administrative payload for creating or replacing a source.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSourceDraft {
	pub name: String,
	pub url_template: String,
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	#[serde(default)]
	pub headers: Map<String, Value>,
	#[serde(default)]
	pub mapping: Map<String, Value>,
}
impl RemoteSourceDraft {
	pub fn validate(self) -> Result<RemoteSource, SourceRejectReason> {
		if self.name.trim().is_empty() {
			return Err(SourceRejectReason::EmptyName);
		}
		if self.url_template.trim().is_empty() {
			return Err(SourceRejectReason::EmptyUrlTemplate);
		}
		if let Some(key) = first_non_string(&self.headers) {
			return Err(SourceRejectReason::NonStringHeader(key));
		}
		if let Some(key) = first_non_string(&self.mapping) {
			return Err(SourceRejectReason::NonStringMapping(key));
		}

		Ok(RemoteSource {
			name: self.name,
			url_template: self.url_template,
			enabled: self.enabled,
			headers: self.headers,
			mapping: self.mapping,
		})
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceRejectReason {
	EmptyName,
	EmptyUrlTemplate,
	NonStringHeader(String),
	NonStringMapping(String),
}
impl SourceRejectReason {
	pub fn describe(&self) -> String {
		match self {
			Self::EmptyName => "name must be non-empty.".to_string(),
			Self::EmptyUrlTemplate => "urlTemplate must be non-empty.".to_string(),
			Self::NonStringHeader(key) => format!("headers.{key} must be a string."),
			Self::NonStringMapping(key) => format!("mapping.{key} must be a string."),
		}
	}
}

fn default_enabled() -> bool {
	true
}

fn first_non_string(map: &Map<String, Value>) -> Option<String> {
	map.iter().find(|(_, value)| !value.is_string()).map(|(key, _)| key.clone())
}
