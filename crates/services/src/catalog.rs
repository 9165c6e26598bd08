//! Catalog reconciliation: one coherent product view over the local catalog
//! and the external feed.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::Mutex as AsyncMutex;

use restock_catalog::{NewProduct, Product, ProductView, mirror_code, mirror_external_id};
use restock_core::{ExternalId, ProductCode};
use restock_infra::{ExternalCatalog, ProductStore};

use crate::error::ServiceError;

/// Cache from external id to the product code created by linking to it.
///
/// Populated on create-from-external, consulted before falling back to a full
/// store scan. No eviction; lives as long as the process.
#[derive(Debug, Default)]
pub struct ExternalIdCache {
    inner: Mutex<HashMap<ExternalId, ProductCode>>,
}

impl ExternalIdCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, id: ExternalId, code: ProductCode) {
        self.inner.lock().unwrap().insert(id, code);
    }

    pub fn get(&self, id: ExternalId) -> Option<ProductCode> {
        self.inner.lock().unwrap().get(&id).cloned()
    }
}

/// Resting states of the shadow set. "Initializing" is the lock being held
/// across the fetch; a failed sync leaves `Uninitialized` so the next caller
/// retries instead of operating on an empty shadow set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncState {
    Uninitialized,
    Ready,
}

/// Sync-time templates keyed by mirror code. Mirrors are persisted into the
/// product store at sync, and the store's copy is what views read; the
/// templates only back codes a caller somehow removed from the store.
#[derive(Debug)]
struct ShadowSet {
    state: SyncState,
    mirrors: BTreeMap<ProductCode, Product>,
}

/// Merges the local catalog with a lazily-synced mirror of the external feed
/// and answers shortage queries over the merged view.
pub struct CatalogService {
    products: Arc<dyn ProductStore>,
    external: Arc<dyn ExternalCatalog>,
    /// Guards sync state and shadow set together; distinct from the store
    /// locks. Held across the gateway call during sync only.
    shadow: AsyncMutex<ShadowSet>,
    cache: ExternalIdCache,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductStore>, external: Arc<dyn ExternalCatalog>) -> Self {
        Self::with_cache(products, external, ExternalIdCache::new())
    }

    pub fn with_cache(
        products: Arc<dyn ProductStore>,
        external: Arc<dyn ExternalCatalog>,
        cache: ExternalIdCache,
    ) -> Self {
        Self {
            products,
            external,
            shadow: AsyncMutex::new(ShadowSet {
                state: SyncState::Uninitialized,
                mirrors: BTreeMap::new(),
            }),
            cache,
        }
    }

    /// Merged view of local products and external mirrors, sorted by code.
    pub async fn list_products(&self) -> Result<Vec<ProductView>, ServiceError> {
        let mirrors = self.ensure_mirrors().await?;
        Ok(merge_views(self.local_records(), mirrors))
    }

    /// Point lookup against the product store (mirrors are persisted there at
    /// sync time, so `FAKE-` codes resolve too once a sync has run).
    pub fn get_product(&self, code: &ProductCode) -> Option<ProductView> {
        self.products.get(code).map(|p| ProductView::from_product(&p))
    }

    /// Create a locally-authored product with a fresh random code.
    pub fn create_product(&self, request: NewProduct) -> Result<ProductView, ServiceError> {
        request.validate()?;
        let product = Product::from_request(ProductCode::generate(), request, Utc::now());
        let created = self.products.create(product)?;
        tracing::info!(code = %created.code, "created product");
        Ok(ProductView::from_product(&created))
    }

    /// Merged entries with `current_stock < threshold`.
    ///
    /// An unmatched mirror whose external id is already linked by a local
    /// record is suppressed; that physical product is represented by the
    /// local entry instead.
    pub async fn list_low_stock(&self) -> Result<Vec<ProductView>, ServiceError> {
        let mirrors = self.ensure_mirrors().await?;
        let locals = self.local_records();
        let linked: HashSet<ExternalId> = locals.iter().filter_map(|p| p.external_id).collect();

        let views = merge_views(locals, mirrors)
            .into_iter()
            .filter(|v| v.is_low_stock())
            .filter(|v| {
                if v.is_matched || mirror_external_id(&v.code).is_none() {
                    return true;
                }
                v.external_id.is_none_or(|id| !linked.contains(&id))
            })
            .collect();
        Ok(views)
    }

    /// Create a local product linked to an external item, copying the
    /// mirror's descriptive fields and its stock/threshold as starting
    /// values. Rejects ids that neither the shadow set nor the feed resolve.
    pub async fn create_from_external(&self, id: ExternalId) -> Result<ProductView, ServiceError> {
        let mirror = match self.shadow_mirror(id).await {
            Some(mirror) => mirror,
            None => match self.external.fetch_by_id(id).await? {
                Some(snapshot) => snapshot.to_mirror(Utc::now()),
                None => {
                    return Err(ServiceError::validation(format!(
                        "external product {id} not found"
                    )));
                }
            },
        };

        // Re-key the mirror under a fresh local code; the link survives in
        // `external_id`.
        let code = ProductCode::generate();
        let mut product = mirror;
        product.code = code.clone();
        product.initial_stock = product.current_stock;
        product.created_at = Utc::now();
        product.updated_at = None;

        let created = self.products.create(product)?;
        self.cache.record(id, code.clone());
        tracing::info!(%code, external_id = %id, "created product from external item");
        Ok(ProductView::from_product(&created))
    }

    /// Resolve an external id to the product code linked to it: cache first,
    /// then a full store scan, preferring locally-coded records over
    /// persisted mirrors.
    pub fn code_for_external_id(&self, id: ExternalId) -> Option<ProductCode> {
        if let Some(code) = self.cache.get(id) {
            return Some(code);
        }

        let mut matches: Vec<ProductCode> = self
            .products
            .all()
            .into_iter()
            .filter(|p| p.external_id == Some(id))
            .map(|p| p.code)
            .collect();
        matches.sort();
        matches
            .iter()
            .find(|code| mirror_external_id(code).is_none())
            .or(matches.first())
            .cloned()
    }

    /// The external id a product is linked to, if any: store first, then the
    /// shadow set.
    pub async fn external_id_for_code(&self, code: &ProductCode) -> Option<ExternalId> {
        if let Some(product) = self.products.get(code) {
            return product.external_id;
        }
        let shadow = self.shadow.lock().await;
        shadow.mirrors.get(code).and_then(|m| m.external_id)
    }

    pub fn decrease_stock(
        &self,
        code: &ProductCode,
        amount: i32,
    ) -> Result<ProductView, ServiceError> {
        let product = self
            .products
            .decrease_stock(code, amount)
            .ok_or_else(|| ServiceError::not_found(format!("product {code}")))?;
        Ok(ProductView::from_product(&product))
    }

    pub fn increase_stock(
        &self,
        code: &ProductCode,
        amount: i32,
    ) -> Result<ProductView, ServiceError> {
        let product = self
            .products
            .increase_stock(code, amount)
            .ok_or_else(|| ServiceError::not_found(format!("product {code}")))?;
        Ok(ProductView::from_product(&product))
    }

    /// One-time lazy sync of the external catalog into the shadow set.
    ///
    /// The lock is held across the fetch, so callers overlapping an in-flight
    /// sync observe its completion before proceeding. Mirrors absent from the
    /// product store are inserted there too (re-acquiring the store lock per
    /// insert) so direct code lookups work without the shadow set.
    async fn ensure_mirrors(&self) -> Result<Vec<Product>, ServiceError> {
        let mut shadow = self.shadow.lock().await;
        if shadow.state == SyncState::Ready {
            return Ok(self.live_mirrors(&shadow));
        }

        let snapshots = self.external.fetch_all().await?;
        let now = Utc::now();
        shadow.mirrors.clear();
        for snapshot in snapshots {
            let mirror = snapshot.to_mirror(now);
            if !self.products.exists(&mirror.code) {
                self.products.create(mirror.clone())?;
            }
            shadow.mirrors.insert(mirror.code.clone(), mirror);
        }
        shadow.state = SyncState::Ready;
        tracing::info!(mirrors = shadow.mirrors.len(), "synced external catalog into shadow set");
        Ok(self.live_mirrors(&shadow))
    }

    /// Current mirror records: the store's copy per mirror code, so stock
    /// mutations on persisted mirrors show up in the merged views.
    fn live_mirrors(&self, shadow: &ShadowSet) -> Vec<Product> {
        shadow
            .mirrors
            .iter()
            .map(|(code, template)| {
                self.products.get(code).unwrap_or_else(|| template.clone())
            })
            .collect()
    }

    /// Mirror for `id`, when a sync has completed. Reads the store's copy so
    /// the caller sees current stock, not the sync-time snapshot.
    async fn shadow_mirror(&self, id: ExternalId) -> Option<Product> {
        let shadow = self.shadow.lock().await;
        if shadow.state != SyncState::Ready {
            return None;
        }
        let code = mirror_code(id);
        shadow
            .mirrors
            .get(&code)
            .map(|template| self.products.get(&code).unwrap_or_else(|| template.clone()))
    }

    /// Store records that originate locally. Mirror copies persisted at sync
    /// time are excluded here; the merge reads those through the mirror side
    /// instead, so one physical item never contributes two merge inputs.
    fn local_records(&self) -> Vec<Product> {
        self.products
            .all()
            .into_iter()
            .filter(|p| mirror_external_id(&p.code).is_none())
            .collect()
    }
}

/// Group locals and mirrors by code and emit one view per group: both sides
/// present makes a matched entry, one side passes through unmatched. Output
/// is sorted by code ascending.
pub fn merge_views(locals: Vec<Product>, mirrors: Vec<Product>) -> Vec<ProductView> {
    let mut by_code: BTreeMap<ProductCode, (Option<Product>, Option<Product>)> = BTreeMap::new();
    for local in locals {
        let code = local.code.clone();
        by_code.entry(code).or_default().0 = Some(local);
    }
    for mirror in mirrors {
        let code = mirror.code.clone();
        by_code.entry(code).or_default().1 = Some(mirror);
    }

    by_code
        .into_values()
        .map(|group| match group {
            (Some(local), Some(mirror)) => ProductView::matched(&local, &mirror),
            (Some(single), None) | (None, Some(single)) => ProductView::from_product(&single),
            (None, None) => unreachable!("every group has at least one side"),
        })
        .collect()
}
