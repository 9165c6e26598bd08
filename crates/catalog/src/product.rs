use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use restock_core::{DomainError, DomainResult, ExternalId, ProductCode};

/// A catalog item with a reorder policy.
///
/// `external_id` is `Some` for mirrors of the external feed and for locally
/// created products that were intentionally linked to an external item.
/// Products are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub code: ProductCode,
    pub name: String,
    /// Reorder trigger point: the product is low on stock when
    /// `current_stock < threshold`.
    pub threshold: i32,
    pub initial_stock: i32,
    /// Driven to 0 at the lowest; never negative.
    pub current_stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub external_id: Option<ExternalId>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub rating_rate: Option<f64>,
    pub rating_count: Option<i32>,
}

impl Product {
    /// Build a locally-authored product from a validated creation request.
    pub fn from_request(code: ProductCode, request: NewProduct, at: DateTime<Utc>) -> Self {
        Self {
            code,
            name: request.name,
            threshold: request.threshold,
            initial_stock: request.initial_stock,
            current_stock: request.initial_stock,
            created_at: at,
            updated_at: None,
            external_id: None,
            description: None,
            category: None,
            image: None,
            price: None,
            rating_rate: None,
            rating_count: None,
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.current_stock < self.threshold
    }
}

/// Request to create a locally-authored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub threshold: i32,
    pub initial_stock: i32,
}

impl NewProduct {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.threshold < 0 {
            return Err(DomainError::validation("threshold cannot be negative"));
        }
        if self.initial_stock < self.threshold {
            return Err(DomainError::validation(
                "initial stock cannot be less than threshold",
            ));
        }
        Ok(())
    }
}
