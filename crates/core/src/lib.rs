//! `restock-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod roman;

pub use error::{DomainError, DomainResult};
pub use id::{ExternalId, OrderId, ProductCode};
pub use roman::to_roman;
