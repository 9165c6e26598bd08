//! In-memory stores.
//!
//! Each store guards its entire state behind one mutex: every entry point is
//! a critical section, so operations are linearizable relative to each other.
//! No operation ever holds both store locks, so there is no lock ordering to
//! get wrong. All collection-returning reads hand out independent copies.

mod order;
mod product;

pub use order::{InMemoryOrderStore, OrderStore};
pub use product::{InMemoryProductStore, ProductStore};

use restock_core::{OrderId, ProductCode};

/// Store-level error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A product with the same code already exists. Callers pre-generate
    /// random codes, so this is a guard rather than an expected path.
    #[error("duplicate product code: {0}")]
    DuplicateCode(ProductCode),

    /// Update referenced an order that was never created.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),
}
