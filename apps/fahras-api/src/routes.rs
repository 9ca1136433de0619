use axum::{
	Json, Router,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::{HeaderMap, StatusCode, header},
	response::{IntoResponse, Response},
	routing::{get, put},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use fahras_service::{
	CallerScope, Error as ServiceError, RemoteSourceItem, SearchRequest, SearchResponse,
};

use crate::state::AppState;

pub const HEADER_ADMIN: &str = "x-fahras-admin";
pub const HEADER_ACCOUNT_ID: &str = "x-fahras-account-id";
pub const HEADER_PERMISSIONS: &str = "x-fahras-permissions";
pub const PERMISSION_CLIENTS_READ: &str = "clients:read";

/// Tenant used when a restricted caller carries no usable account id. Matches no client.
const UNKNOWN_TENANT: i64 = -1;

pub fn router(state: AppState) -> Router {
	Router::new().route("/health", get(health)).route("/search", get(search)).with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/remote_sources", get(list_sources).post(create_source))
		.route("/v1/admin/remote_sources/{id}", put(update_source).delete(delete_source))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
	#[serde(default)]
	q: Option<String>,
	#[serde(default, rename = "includeRemote")]
	include_remote: Option<String>,
	#[serde(default)]
	limit: Option<String>,
}

#[derive(Debug, Serialize)]
struct DataEnvelope<T> {
	data: T,
}

async fn search(
	State(state): State<AppState>,
	headers: HeaderMap,
	params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
	require_bearer(&headers, state.service.cfg.security.api_auth_token.as_deref())?;

	let scope = caller_scope(&headers)?;
	let Query(params) = params.map_err(|err| {
		json_error(StatusCode::BAD_REQUEST, "invalid_request", err.body_text(), None)
	})?;
	let limit = parse_limit(params.limit.as_deref())?;
	let include_remote = params.include_remote.as_deref().is_none_or(|value| value == "true");
	let request =
		SearchRequest { query: params.q.unwrap_or_default(), include_remote, limit, scope };
	let response = state.service.search(request).await?;

	Ok(Json(response))
}

async fn list_sources(
	State(state): State<AppState>,
	headers: HeaderMap,
) -> Result<Json<DataEnvelope<Vec<RemoteSourceItem>>>, ApiError> {
	require_bearer(&headers, state.service.cfg.security.admin_auth_token.as_deref())?;

	let data = state.service.list_sources().await?;

	Ok(Json(DataEnvelope { data }))
}

async fn create_source(
	State(state): State<AppState>,
	headers: HeaderMap,
	payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<DataEnvelope<RemoteSourceItem>>), ApiError> {
	require_bearer(&headers, state.service.cfg.security.admin_auth_token.as_deref())?;

	let Json(payload) = payload.map_err(invalid_payload)?;
	let data = state.service.create_source(payload).await?;

	Ok((StatusCode::CREATED, Json(DataEnvelope { data })))
}

async fn update_source(
	State(state): State<AppState>,
	headers: HeaderMap,
	id: Result<Path<i64>, PathRejection>,
	payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DataEnvelope<RemoteSourceItem>>, ApiError> {
	require_bearer(&headers, state.service.cfg.security.admin_auth_token.as_deref())?;

	let Path(id) = id.map_err(invalid_id)?;
	let Json(payload) = payload.map_err(invalid_payload)?;
	let data = state.service.update_source(id, payload).await?;

	Ok(Json(DataEnvelope { data }))
}

async fn delete_source(
	State(state): State<AppState>,
	headers: HeaderMap,
	id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
	require_bearer(&headers, state.service.cfg.security.admin_auth_token.as_deref())?;

	let Path(id) = id.map_err(invalid_id)?;

	state.service.delete_source(id).await?;

	Ok(StatusCode::NO_CONTENT)
}

/// Checks `Authorization: Bearer <token>` when a token is configured.
fn require_bearer(headers: &HeaderMap, expected: Option<&str>) -> Result<(), ApiError> {
	let Some(expected) = expected else {
		return Ok(());
	};
	let provided = headers
		.get(header::AUTHORIZATION)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.strip_prefix("Bearer "))
		.map(str::trim);

	if provided == Some(expected) {
		return Ok(());
	}

	Err(json_error(
		StatusCode::UNAUTHORIZED,
		"unauthorized",
		"Missing or invalid bearer token.",
		None,
	))
}

/// Derives the caller scope from the headers set by the authentication layer.
///
/// Administrators are unrestricted and hold every permission. Everyone else needs
/// `clients:read` and is confined to the account named by `X-Fahras-Account-Id`.
fn caller_scope(headers: &HeaderMap) -> Result<CallerScope, ApiError> {
	if header_str(headers, HEADER_ADMIN).is_some_and(|value| value.eq_ignore_ascii_case("true")) {
		return Ok(CallerScope::Unrestricted);
	}

	let permitted = header_str(headers, HEADER_PERMISSIONS).is_some_and(|value| {
		value.split(',').any(|permission| permission.trim() == PERMISSION_CLIENTS_READ)
	});

	if !permitted {
		return Err(json_error(
			StatusCode::FORBIDDEN,
			"forbidden",
			format!("Permission {PERMISSION_CLIENTS_READ} is required."),
			None,
		));
	}

	let account_id = header_str(headers, HEADER_ACCOUNT_ID)
		.and_then(|value| value.trim().parse::<i64>().ok())
		.unwrap_or(UNKNOWN_TENANT);

	Ok(CallerScope::Tenant(account_id))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
	headers.get(name).and_then(|value| value.to_str().ok())
}

/// Blank means "use the default". Values past `u32::MAX` saturate and are clamped later.
fn parse_limit(raw: Option<&str>) -> Result<Option<u32>, ApiError> {
	let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
		return Ok(None);
	};
	let parsed = raw.parse::<u64>().map_err(|_| {
		json_error(
			StatusCode::BAD_REQUEST,
			"invalid_request",
			"limit must be a non-negative integer.",
			Some(vec!["limit".to_string()]),
		)
	})?;

	Ok(Some(u32::try_from(parsed).unwrap_or(u32::MAX)))
}

fn invalid_payload(err: JsonRejection) -> ApiError {
	json_error(
		StatusCode::BAD_REQUEST,
		"invalid_request",
		format!("Invalid payload: {}", err.body_text()),
		None,
	)
}

fn invalid_id(err: PathRejection) -> ApiError {
	json_error(
		StatusCode::BAD_REQUEST,
		"invalid_request",
		err.body_text(),
		Some(vec!["id".to_string()]),
	)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}

	pub fn status(&self) -> StatusCode {
		self.status
	}
}

pub fn json_error(
	status: StatusCode,
	code: &str,
	message: impl Into<String>,
	fields: Option<Vec<String>>,
) -> ApiError {
	ApiError::new(status, code, message, fields)
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message, None),
			ServiceError::NotFound { message } =>
				json_error(StatusCode::NOT_FOUND, "not_found", message, None),
			ServiceError::Storage { .. } => json_error(
				StatusCode::INTERNAL_SERVER_ERROR,
				"storage_error",
				"Local store is unavailable.",
				None,
			),
			ServiceError::Provider { message } =>
				json_error(StatusCode::INTERNAL_SERVER_ERROR, "provider_error", message, None),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use axum::http::HeaderValue;

	use super::*;

	fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
		let mut headers = HeaderMap::new();

		for (name, value) in pairs {
			headers.insert(*name, HeaderValue::from_static(value));
		}

		headers
	}

	#[test]
	fn admin_header_is_unrestricted() {
		let scope = caller_scope(&headers(&[(HEADER_ADMIN, "true")])).expect("Expected a scope.");

		assert_eq!(scope, CallerScope::Unrestricted);
	}

	#[test]
	fn restricted_callers_need_read_permission() {
		let err = caller_scope(&headers(&[(HEADER_ACCOUNT_ID, "4")])).expect_err("Expected 403.");

		assert_eq!(err.status(), StatusCode::FORBIDDEN);

		let scope = caller_scope(&headers(&[
			(HEADER_ACCOUNT_ID, "4"),
			(HEADER_PERMISSIONS, "accounts:read, clients:read"),
		]))
		.expect("Expected a scope.");

		assert_eq!(scope, CallerScope::Tenant(4));
	}

	#[test]
	fn unusable_account_id_matches_nothing() {
		let scope = caller_scope(&headers(&[
			(HEADER_ACCOUNT_ID, "north"),
			(HEADER_PERMISSIONS, "clients:read"),
		]))
		.expect("Expected a scope.");

		assert_eq!(scope, CallerScope::Tenant(UNKNOWN_TENANT));
	}

	#[test]
	fn parses_limits() {
		assert_eq!(parse_limit(None).expect("Expected a limit."), None);
		assert_eq!(parse_limit(Some(" ")).expect("Expected a limit."), None);
		assert_eq!(parse_limit(Some("25")).expect("Expected a limit."), Some(25));
		assert_eq!(parse_limit(Some("99999999999")).expect("Expected a limit."), Some(u32::MAX));
		assert_eq!(
			parse_limit(Some("-1")).expect_err("Expected 400.").status(),
			StatusCode::BAD_REQUEST
		);
		assert_eq!(
			parse_limit(Some("ten")).expect_err("Expected 400.").status(),
			StatusCode::BAD_REQUEST
		);
	}

	#[test]
	fn bearer_is_optional_until_configured() {
		assert!(require_bearer(&HeaderMap::new(), None).is_ok());
		assert_eq!(
			require_bearer(&HeaderMap::new(), Some("s3cret")).expect_err("Expected 401.").status(),
			StatusCode::UNAUTHORIZED
		);
		assert!(
			require_bearer(&headers(&[("authorization", "Bearer s3cret")]), Some("s3cret")).is_ok()
		);
	}
}
