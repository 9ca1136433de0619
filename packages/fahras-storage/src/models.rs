use time::OffsetDateTime;

use fahras_domain::source::RemoteSource;

#[derive(Debug, sqlx::FromRow)]
pub struct ClientRow {
	pub id: i64,
	pub account_id: i64,
	pub account_name: String,
	pub name: String,
	pub contracts: Option<String>,
	pub national_id: Option<String>,
	pub sell_date: Option<String>,
	pub work: Option<String>,
	pub home_address: Option<String>,
	pub work_address: Option<String>,
	pub phone: Option<String>,
	pub status: Option<String>,
	pub court_status: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
	pub attachment_count: i64,
}

/// `remote_sources` row as selected, with the JSON columns still as text.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct RawRemoteSourceRow {
	pub(crate) id: i64,
	pub(crate) name: String,
	pub(crate) url_template: String,
	pub(crate) enabled: bool,
	pub(crate) headers: String,
	pub(crate) mapping: String,
	pub(crate) created_at: OffsetDateTime,
	pub(crate) updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct RemoteSourceRow {
	pub id: i64,
	pub source: RemoteSource,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
impl TryFrom<RawRemoteSourceRow> for RemoteSourceRow {
	type Error = crate::Error;

	fn try_from(raw: RawRemoteSourceRow) -> Result<Self, Self::Error> {
		Ok(Self {
			id: raw.id,
			source: RemoteSource {
				name: raw.name,
				url_template: raw.url_template,
				enabled: raw.enabled,
				headers: serde_json::from_str(&raw.headers)?,
				mapping: serde_json::from_str(&raw.mapping)?,
			},
			created_at: raw.created_at,
			updated_at: raw.updated_at,
		})
	}
}
