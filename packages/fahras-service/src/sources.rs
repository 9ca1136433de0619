use std::sync::Arc;

use fahras_config::RemoteFallback;
use fahras_domain::source::RemoteSource;

use crate::{Result, SourceCatalog};

/// Built-in providers, fixed at startup from `[remote.fallback]`.
#[derive(Clone, Debug, Default)]
pub struct FallbackSources {
	sources: Vec<RemoteSource>,
}
impl FallbackSources {
	pub fn from_config(cfg: &RemoteFallback) -> Self {
		let sources = [
			("زجل", cfg.zajal.as_deref()),
			("جدل", cfg.jadal.as_deref()),
			("نماء", cfg.namaa.as_deref()),
			("بسيل", cfg.bseel.as_deref()),
		]
		.into_iter()
		.filter_map(|(label, template)| {
			template.filter(|template| !template.is_empty()).map(|t| RemoteSource::bare(label, t))
		})
		.collect();

		Self { sources }
	}

	pub fn sources(&self) -> &[RemoteSource] {
		&self.sources
	}
}

/// Decides which providers a search fans out to.
#[derive(Clone)]
pub struct SourceRegistry {
	catalog: Arc<dyn SourceCatalog>,
	fallback: FallbackSources,
}
impl SourceRegistry {
	pub fn new(catalog: Arc<dyn SourceCatalog>, fallback: FallbackSources) -> Self {
		Self { catalog, fallback }
	}

	/// Enabled catalog sources in configuration order, or the fallback set when the catalog has
	/// none. The returned list is an owned snapshot for one request.
	pub async fn resolve(&self) -> Result<Vec<RemoteSource>> {
		let configured = self
			.catalog
			.list(true)
			.await?
			.into_iter()
			.map(|row| row.source)
			.filter(|source| source.enabled)
			.collect::<Vec<_>>();

		if !configured.is_empty() {
			return Ok(configured);
		}

		Ok(self.fallback.sources.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fallback_skips_missing_and_empty_templates() {
		let cfg = RemoteFallback {
			zajal: Some("https://zajal.example/?q={{query}}".to_string()),
			jadal: None,
			namaa: Some(String::new()),
			bseel: Some("https://bseel.example/{{query}}".to_string()),
		};
		let fallback = FallbackSources::from_config(&cfg);
		let labels = fallback.sources().iter().map(|source| source.name.as_str()).collect::<Vec<_>>();

		assert_eq!(labels, vec!["زجل", "بسيل"]);
		assert!(fallback.sources().iter().all(|source| source.mapping.is_empty()));
	}
}
