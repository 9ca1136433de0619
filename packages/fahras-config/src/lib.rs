mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Remote, RemoteFallback, Search, Security, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, value) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.admin_bind", &cfg.service.admin_bind),
		("storage.postgres.dsn", &cfg.storage.postgres.dsn),
		("remote.user_agent", &cfg.remote.user_agent),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_limit == 0 {
		return Err(Error::Validation {
			message: "search.max_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.search.default_limit > cfg.search.max_limit {
		return Err(Error::Validation {
			message: "search.default_limit must not exceed search.max_limit.".to_string(),
		});
	}
	if cfg.remote.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "remote.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (label, template) in [
		("remote.fallback.zajal", &cfg.remote.fallback.zajal),
		("remote.fallback.jadal", &cfg.remote.fallback.jadal),
		("remote.fallback.namaa", &cfg.remote.fallback.namaa),
		("remote.fallback.bseel", &cfg.remote.fallback.bseel),
	] {
		if let Some(template) = template
			&& !(template.starts_with("http://") || template.starts_with("https://"))
		{
			return Err(Error::Validation {
				message: format!("{label} must be an http or https URL template."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for token in [&mut cfg.security.api_auth_token, &mut cfg.security.admin_auth_token] {
		if token.as_deref().map(|value| value.trim().is_empty()).unwrap_or(false) {
			*token = None;
		}
	}

	let fallback = &mut cfg.remote.fallback;

	for template in
		[&mut fallback.zajal, &mut fallback.jadal, &mut fallback.namaa, &mut fallback.bseel]
	{
		let Some(value) = template.as_deref() else {
			continue;
		};
		let trimmed = value.trim();

		*template = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
	}
}
