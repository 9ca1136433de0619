use fahras_domain::source::RemoteSource;

use crate::{
	Error, Result,
	db::Db,
	models::{RawRemoteSourceRow, RemoteSourceRow},
};

const SELECT_COLUMNS: &str = "\
SELECT
	id,
	name,
	url_template,
	enabled,
	headers::text AS headers,
	mapping::text AS mapping,
	created_at,
	updated_at
FROM remote_sources";

/// Sources in configuration order (ascending id).
pub async fn list_remote_sources(db: &Db, enabled_only: bool) -> Result<Vec<RemoteSourceRow>> {
	let sql = format!("{SELECT_COLUMNS}\nWHERE ($1::boolean = false OR enabled)\nORDER BY id ASC");
	let rows = sqlx::query_as::<_, RawRemoteSourceRow>(&sql)
		.bind(enabled_only)
		.fetch_all(&db.pool)
		.await?;

	rows.into_iter().map(RemoteSourceRow::try_from).collect()
}

pub async fn insert_remote_source(db: &Db, source: &RemoteSource) -> Result<RemoteSourceRow> {
	let row = sqlx::query_as::<_, RawRemoteSourceRow>(
		"\
INSERT INTO remote_sources (name, url_template, enabled, headers, mapping)
VALUES ($1, $2, $3, $4::json, $5::json)
RETURNING
	id,
	name,
	url_template,
	enabled,
	headers::text AS headers,
	mapping::text AS mapping,
	created_at,
	updated_at",
	)
	.bind(source.name.as_str())
	.bind(source.url_template.as_str())
	.bind(source.enabled)
	.bind(serde_json::to_string(&source.headers)?)
	.bind(serde_json::to_string(&source.mapping)?)
	.fetch_one(&db.pool)
	.await?;

	row.try_into()
}

pub async fn update_remote_source(
	db: &Db,
	id: i64,
	source: &RemoteSource,
) -> Result<RemoteSourceRow> {
	let row = sqlx::query_as::<_, RawRemoteSourceRow>(
		"\
UPDATE remote_sources
SET
	name = $2,
	url_template = $3,
	enabled = $4,
	headers = $5::json,
	mapping = $6::json,
	updated_at = now()
WHERE id = $1
RETURNING
	id,
	name,
	url_template,
	enabled,
	headers::text AS headers,
	mapping::text AS mapping,
	created_at,
	updated_at",
	)
	.bind(id)
	.bind(source.name.as_str())
	.bind(source.url_template.as_str())
	.bind(source.enabled)
	.bind(serde_json::to_string(&source.headers)?)
	.bind(serde_json::to_string(&source.mapping)?)
	.fetch_optional(&db.pool)
	.await?;

	match row {
		Some(row) => row.try_into(),
		None => Err(Error::NotFound(format!("remote source {id}"))),
	}
}

pub async fn delete_remote_source(db: &Db, id: i64) -> Result<()> {
	let result =
		sqlx::query("DELETE FROM remote_sources WHERE id = $1").bind(id).execute(&db.pool).await?;

	if result.rows_affected() == 0 {
		return Err(Error::NotFound(format!("remote source {id}")));
	}

	Ok(())
}
