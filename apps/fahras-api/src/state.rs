use std::sync::Arc;

use fahras_service::FahrasService;
use fahras_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<FahrasService>,
}
impl AppState {
	pub async fn new(config: fahras_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = FahrasService::new(config, db)?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: FahrasService) -> Self {
		Self { service: Arc::new(service) }
	}
}
