pub mod admin;
pub mod search;
pub mod sources;
pub mod time_serde;

mod error;

pub use admin::RemoteSourceItem;
pub use error::{Error, Result};
pub use search::{AccountRef, CallerScope, ClientItem, SearchRequest, SearchResponse};
pub use sources::{FallbackSources, SourceRegistry};

use std::{future::Future, pin::Pin, sync::Arc};

use fahras_config::Config;
use fahras_domain::source::RemoteSource;
use fahras_providers::{RemoteClient, RemoteOutcome};
use fahras_storage::{
	db::Db,
	models::{ClientRow, RemoteSourceRow},
	queries::{self, ClientSearch},
	sources as catalog,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read side of the client store used by local search.
pub trait ClientStore
where
	Self: Send + Sync,
{
	fn search_clients<'a>(
		&'a self,
		search: ClientSearch<'a>,
	) -> BoxFuture<'a, fahras_storage::Result<Vec<ClientRow>>>;
}

/// Persistent remote-source configuration.
pub trait SourceCatalog
where
	Self: Send + Sync,
{
	fn list(&self, enabled_only: bool) -> BoxFuture<'_, fahras_storage::Result<Vec<RemoteSourceRow>>>;

	fn insert<'a>(
		&'a self,
		source: &'a RemoteSource,
	) -> BoxFuture<'a, fahras_storage::Result<RemoteSourceRow>>;

	fn update<'a>(
		&'a self,
		id: i64,
		source: &'a RemoteSource,
	) -> BoxFuture<'a, fahras_storage::Result<RemoteSourceRow>>;

	fn delete(&self, id: i64) -> BoxFuture<'_, fahras_storage::Result<()>>;
}

/// One provider call. Implementations never fail; problems come back as
/// [`RemoteOutcome::Failure`].
pub trait RemoteFetcher
where
	Self: Send + Sync,
{
	fn fetch<'a>(
		&'a self,
		source: &'a RemoteSource,
		remote_query: &'a str,
	) -> BoxFuture<'a, Option<RemoteOutcome>>;
}

#[derive(Clone)]
pub struct Collaborators {
	pub clients: Arc<dyn ClientStore>,
	pub sources: Arc<dyn SourceCatalog>,
	pub fetcher: Arc<dyn RemoteFetcher>,
}
impl Collaborators {
	pub fn new(
		clients: Arc<dyn ClientStore>,
		sources: Arc<dyn SourceCatalog>,
		fetcher: Arc<dyn RemoteFetcher>,
	) -> Self {
		Self { clients, sources, fetcher }
	}
}

pub struct FahrasService {
	pub cfg: Config,
	pub collaborators: Collaborators,
	pub registry: SourceRegistry,
}
impl FahrasService {
	pub fn new(cfg: Config, db: Db) -> Result<Self> {
		let db = Arc::new(db);
		let fetcher = Arc::new(RemoteClient::new(&cfg.remote)?);
		let collaborators = Collaborators::new(db.clone(), db, fetcher);

		Ok(Self::with_collaborators(cfg, collaborators))
	}

	pub fn with_collaborators(cfg: Config, collaborators: Collaborators) -> Self {
		let fallback = FallbackSources::from_config(&cfg.remote.fallback);
		let registry = SourceRegistry::new(collaborators.sources.clone(), fallback);

		Self { cfg, collaborators, registry }
	}
}

impl ClientStore for Db {
	fn search_clients<'a>(
		&'a self,
		search: ClientSearch<'a>,
	) -> BoxFuture<'a, fahras_storage::Result<Vec<ClientRow>>> {
		Box::pin(queries::search_clients(self, search))
	}
}

impl SourceCatalog for Db {
	fn list(&self, enabled_only: bool) -> BoxFuture<'_, fahras_storage::Result<Vec<RemoteSourceRow>>> {
		Box::pin(catalog::list_remote_sources(self, enabled_only))
	}

	fn insert<'a>(
		&'a self,
		source: &'a RemoteSource,
	) -> BoxFuture<'a, fahras_storage::Result<RemoteSourceRow>> {
		Box::pin(catalog::insert_remote_source(self, source))
	}

	fn update<'a>(
		&'a self,
		id: i64,
		source: &'a RemoteSource,
	) -> BoxFuture<'a, fahras_storage::Result<RemoteSourceRow>> {
		Box::pin(catalog::update_remote_source(self, id, source))
	}

	fn delete(&self, id: i64) -> BoxFuture<'_, fahras_storage::Result<()>> {
		Box::pin(catalog::delete_remote_source(self, id))
	}
}

impl RemoteFetcher for RemoteClient {
	fn fetch<'a>(
		&'a self,
		source: &'a RemoteSource,
		remote_query: &'a str,
	) -> BoxFuture<'a, Option<RemoteOutcome>> {
		Box::pin(RemoteClient::fetch(self, source, remote_query))
	}
}
