//! External feed snapshots and their translation into mirror products.
//!
//! The `FAKE-` code prefix is a compatibility convention for mirror records.
//! Only [`mirror_code`] and [`mirror_external_id`] know about it; everything
//! else goes through these two functions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use restock_core::{ExternalId, ProductCode};

use crate::product::Product;

/// Reorder threshold assigned to mirror products (the feed has no concept of
/// a threshold of its own).
pub const DEFAULT_MIRROR_THRESHOLD: i32 = 10;

const MIRROR_PREFIX: &str = "FAKE-";

/// Read-only snapshot of one item in the third-party feed.
///
/// Never persisted directly; always translated into a mirror [`Product`]
/// before it participates in a merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalProduct {
    pub id: ExternalId,
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: i32,
}

impl ExternalProduct {
    /// Stock level a mirror starts with: the feed's rating count, 0 when the
    /// rating is absent.
    pub fn stock_seed(&self) -> i32 {
        self.rating.as_ref().map(|r| r.count).unwrap_or(0)
    }

    /// Translate this snapshot into a mirror product.
    pub fn to_mirror(&self, at: DateTime<Utc>) -> Product {
        let stock = self.stock_seed();
        Product {
            code: mirror_code(self.id),
            name: self.title.clone(),
            threshold: DEFAULT_MIRROR_THRESHOLD,
            initial_stock: stock,
            current_stock: stock,
            created_at: at,
            updated_at: None,
            external_id: Some(self.id),
            description: self.description.clone(),
            category: self.category.clone(),
            image: self.image.clone(),
            price: Some(self.price),
            rating_rate: self.rating.as_ref().map(|r| r.rate),
            rating_count: self.rating.as_ref().map(|r| r.count),
        }
    }
}

/// Product code a mirror of `id` is filed under.
pub fn mirror_code(id: ExternalId) -> ProductCode {
    ProductCode::new(format!("{MIRROR_PREFIX}{id}"))
}

/// Inverse of [`mirror_code`]: the external id encoded in a mirror code, or
/// `None` for locally-assigned codes.
pub fn mirror_external_id(code: &ProductCode) -> Option<ExternalId> {
    code.as_str()
        .strip_prefix(MIRROR_PREFIX)
        .and_then(|raw| raw.parse::<i64>().ok())
        .map(ExternalId)
}
