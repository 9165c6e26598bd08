//! The merged product projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use restock_core::{ExternalId, ProductCode, to_roman};

use crate::product::Product;

/// One row of the merged local/external catalog view.
///
/// Derived on every query, never stored. A matched entry takes its identity
/// and reorder policy from the local record and its descriptive fields from
/// the mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub code: ProductCode,
    pub name: String,
    pub threshold: i32,
    pub initial_stock: i32,
    pub current_stock: i32,
    pub external_id: Option<ExternalId>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub rating_rate: Option<f64>,
    pub rating_count: Option<i32>,
    pub is_matched: bool,
    pub stock_in_roman: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductView {
    /// Project a single-origin record (local or mirror) directly.
    pub fn from_product(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            name: product.name.clone(),
            threshold: product.threshold,
            initial_stock: product.initial_stock,
            current_stock: product.current_stock,
            external_id: product.external_id,
            description: product.description.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price: product.price,
            rating_rate: product.rating_rate,
            rating_count: product.rating_count,
            is_matched: false,
            stock_in_roman: to_roman(product.current_stock),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }

    /// Combine a local record and a mirror sharing the same code: the local
    /// side owns the reorder policy and stock, the mirror side the metadata.
    pub fn matched(local: &Product, mirror: &Product) -> Self {
        Self {
            code: local.code.clone(),
            name: local.name.clone(),
            threshold: local.threshold,
            initial_stock: local.initial_stock,
            current_stock: local.current_stock,
            external_id: local.external_id.or(mirror.external_id),
            description: mirror.description.clone(),
            category: mirror.category.clone(),
            image: mirror.image.clone(),
            price: mirror.price,
            rating_rate: mirror.rating_rate,
            rating_count: mirror.rating_count,
            is_matched: true,
            stock_in_roman: to_roman(local.current_stock),
            created_at: local.created_at,
            updated_at: local.updated_at,
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.current_stock < self.threshold
    }
}
