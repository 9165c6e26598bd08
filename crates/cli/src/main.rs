//! One replenishment run against the live external catalog.
//!
//! Syncs the feed, reports the merged catalog and its shortages, places a
//! pending order per shortage, and prints the run summary as JSON.

use std::sync::Arc;

use restock_infra::{DEFAULT_BASE_URL, HttpCatalogGateway, InMemoryOrderStore, InMemoryProductStore};
use restock_services::{CatalogService, ReplenishmentEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    restock_observability::init();

    let base_url = std::env::var("RESTOCK_CATALOG_URL")
        .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    tracing::info!(%base_url, "starting replenishment run");

    let products = Arc::new(InMemoryProductStore::new());
    let orders = Arc::new(InMemoryOrderStore::new());
    let gateway = Arc::new(HttpCatalogGateway::new(base_url));
    let catalog = Arc::new(CatalogService::new(products, gateway.clone()));
    let engine = ReplenishmentEngine::new(catalog.clone(), orders, gateway);

    let merged = catalog.list_products().await?;
    tracing::info!(products = merged.len(), "catalog synced");

    let outcome = engine.check_and_place_orders().await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
