use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;

use restock_catalog::Product;
use restock_core::ProductCode;

use super::StoreError;

/// Product persistence abstraction.
pub trait ProductStore: Send + Sync {
    /// Insert a new product; rejects an already-used code.
    fn create(&self, product: Product) -> Result<Product, StoreError>;

    /// Point lookup by code.
    fn get(&self, code: &ProductCode) -> Option<Product>;

    /// Snapshot of every product. Mutating the result has no effect on the
    /// store.
    fn all(&self) -> Vec<Product>;

    fn exists(&self, code: &ProductCode) -> bool;

    /// Subtract `amount` from current stock, clamping at zero, and stamp
    /// `updated_at`. `None` when the code is absent.
    fn decrease_stock(&self, code: &ProductCode, amount: i32) -> Option<Product>;

    /// Add `amount` to current stock (unbounded) and stamp `updated_at`.
    /// `None` when the code is absent.
    fn increase_stock(&self, code: &ProductCode, amount: i32) -> Option<Product>;

    /// Live scan for products with `current_stock < threshold`.
    fn low_stock(&self) -> Vec<Product>;
}

/// In-memory product store. Process-lifetime only.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: Mutex<HashMap<ProductCode, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for InMemoryProductStore {
    fn create(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = self.products.lock().unwrap();
        if products.contains_key(&product.code) {
            return Err(StoreError::DuplicateCode(product.code.clone()));
        }
        products.insert(product.code.clone(), product.clone());
        Ok(product)
    }

    fn get(&self, code: &ProductCode) -> Option<Product> {
        self.products.lock().unwrap().get(code).cloned()
    }

    fn all(&self) -> Vec<Product> {
        self.products.lock().unwrap().values().cloned().collect()
    }

    fn exists(&self, code: &ProductCode) -> bool {
        self.products.lock().unwrap().contains_key(code)
    }

    fn decrease_stock(&self, code: &ProductCode, amount: i32) -> Option<Product> {
        let mut products = self.products.lock().unwrap();
        let product = products.get_mut(code)?;
        product.current_stock = (product.current_stock - amount).max(0);
        product.updated_at = Some(Utc::now());
        Some(product.clone())
    }

    fn increase_stock(&self, code: &ProductCode, amount: i32) -> Option<Product> {
        let mut products = self.products.lock().unwrap();
        let product = products.get_mut(code)?;
        product.current_stock += amount;
        product.updated_at = Some(Utc::now());
        Some(product.clone())
    }

    fn low_stock(&self) -> Vec<Product> {
        self.products
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect()
    }
}
