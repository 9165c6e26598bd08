//! Replenishment: shortage detection converted into placed orders.

use std::sync::Arc;

use chrono::Utc;

use restock_catalog::ProductView;
use restock_core::{ExternalId, OrderId};
use restock_infra::{ExternalCatalog, OrderStore};
use restock_orders::{BulkOrderResult, Order, OrderResult};

use crate::catalog::CatalogService;
use crate::error::ServiceError;

/// Single supplier today; the order record carries the name so the contract
/// survives adding more.
pub const SUPPLIER_NAME: &str = "Fake Store API";

/// Ordered on top of the shortage so the threshold is cleared with room to
/// spare.
const REORDER_MARGIN: i32 = 10;

/// Price-check target for products without an external link.
const FALLBACK_EXTERNAL_ID: ExternalId = ExternalId(1);

/// Drives the detect-shortage, price-check, place-order loop with per-item
/// failure isolation.
pub struct ReplenishmentEngine {
    catalog: Arc<CatalogService>,
    orders: Arc<dyn OrderStore>,
    external: Arc<dyn ExternalCatalog>,
}

impl ReplenishmentEngine {
    pub fn new(
        catalog: Arc<CatalogService>,
        orders: Arc<dyn OrderStore>,
        external: Arc<dyn ExternalCatalog>,
    ) -> Self {
        Self {
            catalog,
            orders,
            external,
        }
    }

    /// One replenishment run over the current low-stock view.
    ///
    /// A failure of the low-stock query itself aborts the run; any failure
    /// while processing a single item is recorded in the bulk result and the
    /// remaining items still run.
    pub async fn check_and_place_orders(&self) -> Result<BulkOrderResult, ServiceError> {
        let shortages = self.catalog.list_low_stock().await?;
        tracing::info!(count = shortages.len(), "found low-stock products");

        let mut outcome = BulkOrderResult::default();
        for shortage in &shortages {
            let result = match self.place_order(shortage).await {
                Ok(result) => result,
                Err(err) => {
                    tracing::error!(
                        code = %shortage.code,
                        error = %err,
                        "failed to process low-stock product"
                    );
                    OrderResult::failed(
                        shortage.code.clone(),
                        format!("error creating order: {err}"),
                    )
                }
            };
            outcome.record(result);
        }

        tracing::info!(
            total = outcome.total_processed,
            successful = outcome.successful_orders,
            failed = outcome.failed_orders,
            "replenishment run complete"
        );
        Ok(outcome)
    }

    pub fn list_orders(&self) -> Vec<Order> {
        self.orders.all()
    }

    pub fn get_order(&self, id: &OrderId) -> Option<Order> {
        self.orders.get(id)
    }

    async fn place_order(&self, shortage: &ProductView) -> Result<OrderResult, ServiceError> {
        let external_id = shortage.external_id.unwrap_or_else(|| {
            // Preserved source behavior: unlinked products price-check
            // against external item 1.
            tracing::debug!(code = %shortage.code, "no external link, using fallback id");
            FALLBACK_EXTERNAL_ID
        });

        let Some(snapshot) = self.external.fetch_by_id(external_id).await? else {
            return Ok(OrderResult::failed(
                shortage.code.clone(),
                "external product not found",
            ));
        };

        let quantity = shortage.threshold - shortage.current_stock + REORDER_MARGIN;
        let order = Order::pending(
            OrderId::generate(),
            shortage.code.clone(),
            SUPPLIER_NAME,
            snapshot.price,
            quantity,
            Utc::now(),
        );
        let order = self.orders.create(order)?;
        tracing::info!(
            order_id = %order.id,
            code = %shortage.code,
            quantity,
            price = order.price,
            "placed replenishment order"
        );
        Ok(OrderResult::placed(
            order.id,
            shortage.code.clone(),
            order.price,
            SUPPLIER_NAME,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use restock_catalog::{ExternalProduct, NewProduct, Product, Rating};
    use restock_core::ProductCode;
    use restock_infra::{ExternalSourceError, InMemoryOrderStore, InMemoryProductStore, ProductStore};
    use restock_orders::OrderStatus;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Feed stub with scripted per-id behavior; `fetch_all` serves an empty
    /// catalog so shortages come purely from locally seeded products.
    #[derive(Default)]
    struct ScriptedFeed {
        by_id: HashMap<i64, Result<Option<ExternalProduct>, ExternalSourceError>>,
        fail_fetch_all: bool,
        requested: Mutex<Vec<ExternalId>>,
    }

    impl ScriptedFeed {
        fn with_price(mut self, id: i64, price: f64) -> Self {
            self.by_id.insert(
                id,
                Ok(Some(ExternalProduct {
                    id: ExternalId(id),
                    title: format!("item {id}"),
                    price,
                    description: None,
                    category: None,
                    image: None,
                    rating: Some(Rating { rate: 4.0, count: 100 }),
                })),
            );
            self
        }

        fn with_missing(mut self, id: i64) -> Self {
            self.by_id.insert(id, Ok(None));
            self
        }

        fn with_error(mut self, id: i64) -> Self {
            self.by_id.insert(
                id,
                Err(ExternalSourceError::Unreachable("stub offline".to_string())),
            );
            self
        }
    }

    #[async_trait]
    impl ExternalCatalog for ScriptedFeed {
        async fn fetch_all(&self) -> Result<Vec<ExternalProduct>, ExternalSourceError> {
            if self.fail_fetch_all {
                return Err(ExternalSourceError::Unreachable("stub offline".to_string()));
            }
            Ok(vec![])
        }

        async fn fetch_by_id(
            &self,
            id: ExternalId,
        ) -> Result<Option<ExternalProduct>, ExternalSourceError> {
            self.requested.lock().unwrap().push(id);
            self.by_id.get(&id.0).cloned().unwrap_or(Ok(None))
        }
    }

    struct Fixture {
        products: Arc<InMemoryProductStore>,
        orders: Arc<InMemoryOrderStore>,
        engine: ReplenishmentEngine,
        feed: Arc<ScriptedFeed>,
    }

    fn fixture(feed: ScriptedFeed) -> Fixture {
        let products = Arc::new(InMemoryProductStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let feed = Arc::new(feed);
        let catalog = Arc::new(CatalogService::new(products.clone(), feed.clone()));
        let engine = ReplenishmentEngine::new(catalog, orders.clone(), feed.clone());
        Fixture {
            products,
            orders,
            engine,
            feed,
        }
    }

    fn seed_low_stock(
        products: &InMemoryProductStore,
        code: &str,
        threshold: i32,
        stock: i32,
        external_id: Option<i64>,
    ) {
        let mut product = Product::from_request(
            ProductCode::new(code),
            NewProduct {
                name: format!("product {code}"),
                threshold,
                initial_stock: threshold.max(stock),
            },
            Utc::now(),
        );
        product.current_stock = stock;
        product.external_id = external_id.map(ExternalId);
        products.create(product).unwrap();
    }

    #[tokio::test]
    async fn one_failing_item_does_not_abort_the_batch() {
        let fx = fixture(
            ScriptedFeed::default()
                .with_price(1, 5.0)
                .with_missing(2)
                .with_price(3, 7.5),
        );
        seed_low_stock(&fx.products, "A1", 10, 2, Some(1));
        seed_low_stock(&fx.products, "B2", 10, 2, Some(2));
        seed_low_stock(&fx.products, "C3", 10, 2, Some(3));

        let outcome = fx.engine.check_and_place_orders().await.unwrap();

        assert_eq!(outcome.total_processed, 3);
        assert_eq!(outcome.successful_orders, 2);
        assert_eq!(outcome.failed_orders, 1);

        let failed = &outcome.results[1];
        assert!(!failed.success);
        assert!(failed.order_id.is_none());
        assert_eq!(failed.product_code, ProductCode::new("B2"));
        assert_eq!(failed.message, "external product not found");

        assert_eq!(fx.orders.all().len(), 2);
    }

    #[tokio::test]
    async fn gateway_errors_are_downgraded_per_item() {
        let fx = fixture(ScriptedFeed::default().with_error(1).with_price(2, 3.0));
        seed_low_stock(&fx.products, "A1", 10, 2, Some(1));
        seed_low_stock(&fx.products, "B2", 10, 2, Some(2));

        let outcome = fx.engine.check_and_place_orders().await.unwrap();

        assert_eq!(outcome.total_processed, 2);
        assert_eq!(outcome.failed_orders, 1);
        assert!(outcome.results[0].message.starts_with("error creating order"));
        assert!(outcome.results[1].success);
    }

    #[tokio::test]
    async fn order_quantity_clears_threshold_with_margin() {
        let fx = fixture(ScriptedFeed::default().with_price(1, 5.0));
        seed_low_stock(&fx.products, "A1", 20, 12, Some(1));

        let outcome = fx.engine.check_and_place_orders().await.unwrap();
        assert_eq!(outcome.successful_orders, 1);

        let order = &fx.orders.all()[0];
        assert_eq!(order.quantity, 18); // 20 - 12 + 10
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.supplier_name, SUPPLIER_NAME);
        assert_eq!(order.price, 5.0);
        assert_eq!(order.product_code, ProductCode::new("A1"));
    }

    #[tokio::test]
    async fn unlinked_products_price_check_against_fallback_id() {
        let fx = fixture(ScriptedFeed::default().with_price(1, 5.0));
        seed_low_stock(&fx.products, "A1", 10, 2, None);

        let outcome = fx.engine.check_and_place_orders().await.unwrap();
        assert_eq!(outcome.successful_orders, 1);
        assert_eq!(*fx.feed.requested.lock().unwrap(), vec![ExternalId(1)]);
    }

    #[tokio::test]
    async fn low_stock_query_failure_aborts_the_run() {
        let fx = fixture(ScriptedFeed {
            fail_fetch_all: true,
            ..ScriptedFeed::default()
        });
        seed_low_stock(&fx.products, "A1", 10, 2, Some(1));

        let err = fx.engine.check_and_place_orders().await.unwrap_err();
        assert!(matches!(err, ServiceError::External(_)));
        assert!(fx.orders.all().is_empty());
    }

    #[tokio::test]
    async fn order_queries_roundtrip_through_the_store() {
        let fx = fixture(ScriptedFeed::default().with_price(1, 5.0));
        seed_low_stock(&fx.products, "A1", 10, 2, Some(1));

        let outcome = fx.engine.check_and_place_orders().await.unwrap();
        let placed_id = outcome.results[0].order_id.clone().unwrap();

        assert_eq!(fx.engine.list_orders().len(), 1);
        let found = fx.engine.get_order(&placed_id).unwrap();
        assert_eq!(found.product_code, ProductCode::new("A1"));
        assert!(fx.engine.get_order(&OrderId::new("NOPE")).is_none());
    }
}
