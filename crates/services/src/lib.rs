//! `restock-services` — the policy layer.
//!
//! [`CatalogService`] reconciles the local catalog with the external feed;
//! [`ReplenishmentEngine`] turns its shortage view into placed orders.

pub mod catalog;
pub mod error;
pub mod replenishment;

pub use catalog::{CatalogService, ExternalIdCache, merge_views};
pub use error::ServiceError;
pub use replenishment::{ReplenishmentEngine, SUPPLIER_NAME};
