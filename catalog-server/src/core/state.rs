//! Server state shared by every handler

use std::sync::Arc;

use crate::core::{Config, Result};
use crate::db::DbService;
use crate::services::CatalogService;

/// Cheap to clone; handlers receive it through axum's `State`
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub catalog: CatalogService,
}

impl ServerState {
    pub fn new(config: Config, catalog: CatalogService) -> Self {
        Self {
            config: Arc::new(config),
            catalog,
        }
    }

    /// Open the database from `config` and build the catalog service
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        let catalog = CatalogService::new(db.pool).with_bulk_chunk_size(config.bulk_chunk_size);
        Ok(Self::new(config.clone(), catalog))
    }
}
