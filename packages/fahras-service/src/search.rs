use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use fahras_domain::{mapping, query, source::RemoteSource};
use fahras_providers::{RemoteFailure, RemoteOutcome, RemoteSuccess};
use fahras_storage::{models::ClientRow, queries::ClientSearch};

use crate::{FahrasService, RemoteFetcher, Result};

/// Which local records a caller may see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallerScope {
	Unrestricted,
	Tenant(i64),
}
impl CallerScope {
	fn account_filter(self) -> Option<i64> {
		match self {
			Self::Unrestricted => None,
			Self::Tenant(account_id) => Some(account_id),
		}
	}
}

#[derive(Clone, Debug)]
pub struct SearchRequest {
	pub query: String,
	pub include_remote: bool,
	/// Requested local result cap. `None` uses the configured default.
	pub limit: Option<u32>,
	pub scope: CallerScope,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountRef {
	pub id: i64,
	pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientItem {
	pub id: i64,
	pub account_id: i64,
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
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
	pub account: AccountRef,
	pub attachment_count: i64,
}
impl From<ClientRow> for ClientItem {
	fn from(row: ClientRow) -> Self {
		Self {
			id: row.id,
			account_id: row.account_id,
			name: row.name,
			contracts: row.contracts,
			national_id: row.national_id,
			sell_date: row.sell_date,
			work: row.work,
			home_address: row.home_address,
			work_address: row.work_address,
			phone: row.phone,
			status: row.status,
			court_status: row.court_status,
			created_at: row.created_at,
			updated_at: row.updated_at,
			account: AccountRef { id: row.account_id, name: row.account_name },
			attachment_count: row.attachment_count,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
	#[serde(rename = "data")]
	pub local: Vec<ClientItem>,
	pub remote: Vec<RemoteSuccess>,
	pub errors: Vec<RemoteFailure>,
}

impl FahrasService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let Some(query) = query::normalize(&req.query) else {
			return Ok(SearchResponse::default());
		};
		let limit = effective_limit(req.limit, &self.cfg.search);
		let search = ClientSearch {
			query: &query.local,
			numeric: query.numeric,
			account_id: req.scope.account_filter(),
			limit,
		};
		let rows = self.collaborators.clients.search_clients(search).await.map_err(|err| {
			tracing::error!(error = %err, "Local client search failed.");

			err
		})?;
		let local = rows.into_iter().map(ClientItem::from).collect::<Vec<_>>();

		if !req.include_remote {
			return Ok(SearchResponse { local, remote: Vec::new(), errors: Vec::new() });
		}

		let sources = self
			.registry
			.resolve()
			.await?
			.into_iter()
			.filter(|source| !source.url_template.is_empty())
			.collect::<Vec<_>>();
		let outcomes = fan_out(self.collaborators.fetcher.as_ref(), &sources, &query.remote).await;
		let (remote, errors) = merge_outcomes(&sources, outcomes);

		tracing::debug!(
			local = local.len(),
			sources = sources.len(),
			remote = remote.len(),
			errors = errors.len(),
			"Federated search completed."
		);

		Ok(SearchResponse { local, remote, errors })
	}
}

/// Requested limit, or the configured default, capped at the configured ceiling.
pub fn effective_limit(requested: Option<u32>, cfg: &fahras_config::Search) -> u32 {
	requested.unwrap_or(cfg.default_limit).min(cfg.max_limit)
}

/// Calls every source concurrently and waits for all of them. The output is aligned with
/// `sources` regardless of completion order.
pub async fn fan_out(
	fetcher: &dyn RemoteFetcher,
	sources: &[RemoteSource],
	remote_query: &str,
) -> Vec<Option<RemoteOutcome>> {
	futures::future::join_all(sources.iter().map(|source| fetcher.fetch(source, remote_query)))
		.await
}

/// Splits outcomes into mapped successes and failures, both in source order.
pub fn merge_outcomes(
	sources: &[RemoteSource],
	outcomes: Vec<Option<RemoteOutcome>>,
) -> (Vec<RemoteSuccess>, Vec<RemoteFailure>) {
	let mut remote = Vec::new();
	let mut errors = Vec::new();

	for (source, outcome) in sources.iter().zip(outcomes) {
		match outcome {
			Some(RemoteOutcome::Success(success)) => {
				let records = mapping::map_rows(success.records, &source.mapping, &success.label);

				remote.push(RemoteSuccess { label: success.label, records });
			},
			Some(RemoteOutcome::Failure(failure)) => {
				tracing::warn!(
					source = %failure.label,
					reason = %failure.reason,
					"Remote source failed."
				);

				errors.push(failure);
			},
			None => {},
		}
	}

	(remote, errors)
}
