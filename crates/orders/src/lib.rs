//! `restock-orders` — replenishment-order domain types.

pub mod order;

pub use order::{BulkOrderResult, Order, OrderResult, OrderStatus};
