use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use restock_core::{OrderId, ProductCode};

/// Order status lifecycle.
///
/// Nothing in this core advances `Pending`; status transitions belong to a
/// downstream fulfilment process, so orders here are append-only records of
/// intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// A replenishment order placed against a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub product_code: ProductCode,
    pub supplier_name: String,
    /// Unit price at order time.
    pub price: f64,
    pub quantity: i32,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn pending(
        id: OrderId,
        product_code: ProductCode,
        supplier_name: impl Into<String>,
        price: f64,
        quantity: i32,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_code,
            supplier_name: supplier_name.into(),
            price,
            quantity,
            status: OrderStatus::Pending,
            created_at: at,
            completed_at: None,
        }
    }
}

/// Outcome of processing one shortage item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResult {
    pub success: bool,
    pub order_id: Option<OrderId>,
    pub product_code: ProductCode,
    pub message: String,
    pub price: Option<f64>,
    pub supplier_name: Option<String>,
}

impl OrderResult {
    pub fn placed(
        order_id: OrderId,
        product_code: ProductCode,
        price: f64,
        supplier_name: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            order_id: Some(order_id),
            product_code,
            message: "order created successfully".to_string(),
            price: Some(price),
            supplier_name: Some(supplier_name.into()),
        }
    }

    pub fn failed(product_code: ProductCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            order_id: None,
            product_code,
            message: message.into(),
            price: None,
            supplier_name: None,
        }
    }
}

/// Aggregate outcome of one replenishment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkOrderResult {
    pub total_processed: u32,
    pub successful_orders: u32,
    pub failed_orders: u32,
    pub results: Vec<OrderResult>,
}

impl BulkOrderResult {
    /// Fold one per-item outcome into the aggregate, preserving input order.
    pub fn record(&mut self, result: OrderResult) {
        self.total_processed += 1;
        if result.success {
            self.successful_orders += 1;
        } else {
            self.failed_orders += 1;
        }
        self.results.push(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_orders_carry_no_completion_time() {
        let order = Order::pending(
            OrderId::new("ORD1"),
            ProductCode::new("AB12CD34"),
            "Fake Store API",
            55.99,
            18,
            Utc::now(),
        );
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.completed_at.is_none());
    }

    #[test]
    fn bulk_result_counts_successes_and_failures() {
        let mut bulk = BulkOrderResult::default();
        bulk.record(OrderResult::placed(
            OrderId::new("ORD1"),
            ProductCode::new("A"),
            1.0,
            "s",
        ));
        bulk.record(OrderResult::failed(ProductCode::new("B"), "nope"));
        bulk.record(OrderResult::placed(
            OrderId::new("ORD2"),
            ProductCode::new("C"),
            2.0,
            "s",
        ));

        assert_eq!(bulk.total_processed, 3);
        assert_eq!(bulk.successful_orders, 2);
        assert_eq!(bulk.failed_orders, 1);
        assert_eq!(bulk.results.len(), 3);
        assert!(bulk.results[1].order_id.is_none());
    }
}
