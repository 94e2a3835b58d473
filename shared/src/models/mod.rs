//! Data models
//!
//! Shared between catalog-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix millis.

pub mod attribute;
pub mod binding;
pub mod combination;
pub mod group;
pub mod media;
pub mod product;
pub mod stock;
pub mod variant;

// Re-exports
pub use attribute::*;
pub use binding::*;
pub use combination::*;
pub use group::*;
pub use media::*;
pub use product::*;
pub use stock::*;
pub use variant::*;
