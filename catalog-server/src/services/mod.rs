//! Service layer - the grouping engine
//!
//! Every operation is a method on [`CatalogService`]; the modules below
//! add them in separate `impl` blocks.
//!
//! - [`catalog`] - service handle, attribute catalog and product records
//! - [`facet_group`] - generic find-or-create / bulk replace / prune over one facet
//! - [`price_group`], [`weight_group`], [`media_group`] - facet rules and read paths
//! - [`binding`] - attribute bindings and group pruning
//! - [`stock`] - variant matrix reconciliation
//! - [`resolver`] - variant → facet resolution and checkout quotes
//! - [`product`] - full facet overwrite
//! - [`locks`] - per-product write serialization

pub mod binding;
pub mod catalog;
pub mod error;
pub mod facet_group;
pub mod locks;
pub mod media_group;
pub mod price_group;
pub mod product;
pub mod resolver;
pub mod stock;
pub mod weight_group;

pub use catalog::{CatalogService, DEFAULT_BULK_CHUNK_SIZE};
pub use error::{CatalogError, CatalogResult, EntityKind};
pub use facet_group::{FacetGroups, FacetRules};
pub use locks::ProductLocks;
