//! `restock-infra` — injected capabilities behind trait seams.
//!
//! In-memory product/order stores (process-lifetime only, no durability) and
//! the HTTP gateway to the external product feed.

pub mod gateway;
pub mod store;

pub use gateway::{DEFAULT_BASE_URL, ExternalCatalog, ExternalSourceError, HttpCatalogGateway};
pub use store::{InMemoryOrderStore, InMemoryProductStore, OrderStore, ProductStore, StoreError};
