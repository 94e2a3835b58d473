//! Catalog Server - attribute-combination grouping engine
//!
//! # Overview
//!
//! Products carry dynamic attribute sets (Color, Size, ...). Each bound
//! attribute controls any of three independently grouped facets:
//!
//! - **price** groups (cost / price / sale price)
//! - **weight** groups (weight and dimensions)
//! - **media** groups (images attached per combination)
//!
//! Stock is kept one level above: one row per full combination of the
//! active values of every bound attribute.
//!
//! # Module structure
//!
//! ```text
//! catalog-server/src/
//! ├── core/          # config, state, server
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── grouping/      # combination matcher, variant matrix
//! ├── services/      # grouping engine (CatalogService)
//! ├── api/           # HTTP handlers
//! ├── routes/        # router and middleware
//! └── utils/         # logger, validation, money
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod grouping;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export public types
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use services::{CatalogError, CatalogResult, CatalogService};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Initialize logging from the configuration
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    Ok(())
}
