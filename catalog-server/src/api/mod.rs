//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness and database check
//! - [`attributes`] - attribute catalog
//! - [`products`] - products, bindings, facet groups, media, stock
//! - [`stock`] - stock row updates
//! - [`variants`] - variant resolution and checkout quotes
//! - [`media`] - media registration

pub mod attributes;
pub mod health;
pub mod media;
pub mod products;
pub mod stock;
pub mod variants;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
