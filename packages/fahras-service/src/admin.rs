use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use fahras_domain::source::{RemoteSource, RemoteSourceDraft};
use fahras_storage::models::RemoteSourceRow;

use crate::{Error, FahrasService, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSourceItem {
	pub id: i64,
	#[serde(flatten)]
	pub source: RemoteSource,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
}
impl From<RemoteSourceRow> for RemoteSourceItem {
	fn from(row: RemoteSourceRow) -> Self {
		Self {
			id: row.id,
			source: row.source,
			created_at: row.created_at,
			updated_at: row.updated_at,
		}
	}
}

impl FahrasService {
	pub async fn list_sources(&self) -> Result<Vec<RemoteSourceItem>> {
		let rows = self.collaborators.sources.list(false).await?;

		Ok(rows.into_iter().map(RemoteSourceItem::from).collect())
	}

	pub async fn create_source(&self, payload: Value) -> Result<RemoteSourceItem> {
		let source = parse_source(payload)?;
		let row = self.collaborators.sources.insert(&source).await?;

		tracing::info!(id = row.id, name = %row.source.name, "Remote source created.");

		Ok(row.into())
	}

	pub async fn update_source(&self, id: i64, payload: Value) -> Result<RemoteSourceItem> {
		let source = parse_source(payload)?;
		let row = self.collaborators.sources.update(id, &source).await?;

		tracing::info!(id, name = %row.source.name, "Remote source updated.");

		Ok(row.into())
	}

	pub async fn delete_source(&self, id: i64) -> Result<()> {
		self.collaborators.sources.delete(id).await?;

		tracing::info!(id, "Remote source deleted.");

		Ok(())
	}
}

/// Parses and validates an administrative source payload.
pub fn parse_source(payload: Value) -> Result<RemoteSource> {
	let draft: RemoteSourceDraft = serde_json::from_value(payload)
		.map_err(|err| Error::InvalidRequest { message: format!("Invalid payload: {err}") })?;

	draft.validate().map_err(|reason| Error::InvalidRequest { message: reason.describe() })
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn rejects_payloads_missing_required_fields() {
		let err = parse_source(json!({ "name": "Zajal" })).expect_err("Expected invalid payload.");

		assert!(matches!(err, Error::InvalidRequest { .. }));
		assert!(err.to_string().contains("urlTemplate"), "Unexpected error: {err}");
	}

	#[test]
	fn rejects_non_string_mapping_values() {
		let err = parse_source(json!({
			"name": "Zajal",
			"urlTemplate": "https://zajal.example/{{query}}",
			"mapping": { "name": 1 },
		}))
		.expect_err("Expected invalid payload.");

		assert_eq!(err.to_string(), "Invalid request: mapping.name must be a string.");
	}

	#[test]
	fn serializes_items_flat_in_camel_case() {
		let item = RemoteSourceItem {
			id: 3,
			source: RemoteSource::bare("Zajal", "https://zajal.example/{{query}}"),
			created_at: OffsetDateTime::UNIX_EPOCH,
			updated_at: OffsetDateTime::UNIX_EPOCH,
		};
		let value = serde_json::to_value(&item).expect("Failed to serialize item.");

		assert_eq!(value["id"], json!(3));
		assert_eq!(value["urlTemplate"], json!("https://zajal.example/{{query}}"));
		assert_eq!(value["enabled"], json!(true));
		assert_eq!(value["createdAt"], json!("1970-01-01T00:00:00Z"));
	}
}
