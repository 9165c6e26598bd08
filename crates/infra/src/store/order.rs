use std::collections::HashMap;
use std::sync::Mutex;

use restock_core::{OrderId, ProductCode};
use restock_orders::Order;

use super::StoreError;

/// Order persistence abstraction.
pub trait OrderStore: Send + Sync {
    /// Append a new order.
    fn create(&self, order: Order) -> Result<Order, StoreError>;

    fn get(&self, id: &OrderId) -> Option<Order>;

    /// Snapshot of every order, oldest first.
    fn all(&self) -> Vec<Order>;

    /// Replace an existing order; `OrderNotFound` when the id was never
    /// created. Unreachable from the in-scope call paths today, enforced for
    /// robustness.
    fn update(&self, order: Order) -> Result<Order, StoreError>;

    fn list_by_product(&self, code: &ProductCode) -> Vec<Order>;
}

/// In-memory order store. Process-lifetime only.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: Mutex<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut orders: Vec<Order>) -> Vec<Order> {
        orders.sort_by_key(|o| (o.created_at, o.id.clone()));
        orders
    }
}

impl OrderStore for InMemoryOrderStore {
    fn create(&self, order: Order) -> Result<Order, StoreError> {
        let mut orders = self.orders.lock().unwrap();
        orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    fn get(&self, id: &OrderId) -> Option<Order> {
        self.orders.lock().unwrap().get(id).cloned()
    }

    fn all(&self) -> Vec<Order> {
        Self::sorted(self.orders.lock().unwrap().values().cloned().collect())
    }

    fn update(&self, order: Order) -> Result<Order, StoreError> {
        let mut orders = self.orders.lock().unwrap();
        if !orders.contains_key(&order.id) {
            return Err(StoreError::OrderNotFound(order.id.clone()));
        }
        orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    fn list_by_product(&self, code: &ProductCode) -> Vec<Order> {
        Self::sorted(
            self.orders
                .lock()
                .unwrap()
                .values()
                .filter(|o| &o.product_code == code)
                .cloned()
                .collect(),
        )
    }
}
