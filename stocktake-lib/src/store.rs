//! The count data provider: an async trait the UI treats as opaque, plus
//! the in-memory implementation backing the application and tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::{CountSession, CountStatus, CountedItem, Product, Warehouse};

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("counted item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("product {code} has no unit {unit}")]
    UnknownUnit { code: String, unit: String },

    #[error("session {0} is not open")]
    SessionNotOpen(Uuid),
}

/// The opaque provider behind the count pages.
///
/// Implementations resolve eventually with data or an error; callers pump
/// results into [`crate::Resource`] cells and never block the UI on them.
#[async_trait]
pub trait CountStore: Send + Sync {
    async fn warehouses(&self) -> Result<Vec<Warehouse>, StoreError>;

    async fn sessions(&self) -> Result<Vec<CountSession>, StoreError>;

    async fn create_session(
        &self,
        name: &str,
        warehouse: Warehouse,
    ) -> Result<CountSession, StoreError>;

    async fn close_session(&self, id: Uuid) -> Result<CountSession, StoreError>;

    async fn delete_session(&self, id: Uuid) -> Result<(), StoreError>;

    async fn counted_items(&self, session: Uuid) -> Result<Vec<CountedItem>, StoreError>;

    /// Record a counted quantity. The product is resolved by exact code or
    /// barcode; the unit must be one the product carries.
    async fn record_count(
        &self,
        session: Uuid,
        product: &str,
        unit: &str,
        quantity: f64,
        counted_by: &str,
    ) -> Result<CountedItem, StoreError>;

    async fn update_quantity(&self, item: Uuid, quantity: f64) -> Result<CountedItem, StoreError>;

    async fn delete_item(&self, item: Uuid) -> Result<(), StoreError>;

    /// Products matching a scan/search query (code, barcode, or name part).
    async fn find_products(&self, query: &str) -> Result<Vec<Product>, StoreError>;
}

#[derive(Default)]
struct MemoryInner {
    warehouses: Vec<Warehouse>,
    products: Vec<Product>,
    sessions: HashMap<Uuid, CountSession>,
    items: HashMap<Uuid, CountedItem>,
}

/// In-memory [`CountStore`].
///
/// An optional artificial latency makes the loading states visible when
/// the application runs against it.
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
    latency: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryInner::default()),
            latency: None,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn add_warehouse(&self, warehouse: Warehouse) {
        self.inner.write().await.warehouses.push(warehouse);
    }

    pub async fn add_product(&self, product: Product) {
        self.inner.write().await.products.push(product);
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CountStore for MemoryStore {
    async fn warehouses(&self) -> Result<Vec<Warehouse>, StoreError> {
        self.simulate_latency().await;
        Ok(self.inner.read().await.warehouses.clone())
    }

    async fn sessions(&self) -> Result<Vec<CountSession>, StoreError> {
        self.simulate_latency().await;
        let mut sessions: Vec<_> = self.inner.read().await.sessions.values().cloned().collect();
        sessions.sort_by_key(|s| s.started_at);
        Ok(sessions)
    }

    async fn create_session(
        &self,
        name: &str,
        warehouse: Warehouse,
    ) -> Result<CountSession, StoreError> {
        self.simulate_latency().await;
        let session = CountSession {
            id: Uuid::new_v4(),
            name: name.to_string(),
            warehouse,
            status: CountStatus::Open,
            started_at: Utc::now(),
            ended_at: None,
        };
        log::info!("created count session {} ({})", session.name, session.id);
        self.inner
            .write()
            .await
            .sessions
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn close_session(&self, id: Uuid) -> Result<CountSession, StoreError> {
        self.simulate_latency().await;
        let mut inner = self.inner.write().await;
        let session = inner
            .sessions
            .get_mut(&id)
            .ok_or(StoreError::SessionNotFound(id))?;
        session.status = CountStatus::Closed;
        session.ended_at = Some(Utc::now());
        Ok(session.clone())
    }

    async fn delete_session(&self, id: Uuid) -> Result<(), StoreError> {
        self.simulate_latency().await;
        let mut inner = self.inner.write().await;
        inner
            .sessions
            .remove(&id)
            .ok_or(StoreError::SessionNotFound(id))?;
        inner.items.retain(|_, item| item.session_id != id);
        Ok(())
    }

    async fn counted_items(&self, session: Uuid) -> Result<Vec<CountedItem>, StoreError> {
        self.simulate_latency().await;
        let inner = self.inner.read().await;
        if !inner.sessions.contains_key(&session) {
            return Err(StoreError::SessionNotFound(session));
        }
        let mut items: Vec<_> = inner
            .items
            .values()
            .filter(|item| item.session_id == session)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.counted_at);
        Ok(items)
    }

    async fn record_count(
        &self,
        session: Uuid,
        product: &str,
        unit: &str,
        quantity: f64,
        counted_by: &str,
    ) -> Result<CountedItem, StoreError> {
        self.simulate_latency().await;
        let mut inner = self.inner.write().await;

        let open = inner
            .sessions
            .get(&session)
            .ok_or(StoreError::SessionNotFound(session))?
            .is_open();
        if !open {
            return Err(StoreError::SessionNotOpen(session));
        }

        let found = inner
            .products
            .iter()
            .find(|p| p.code.eq_ignore_ascii_case(product) || p.barcodes.iter().any(|b| b == product))
            .cloned()
            .ok_or_else(|| StoreError::ProductNotFound(product.to_string()))?;
        if !found.has_unit(unit) {
            return Err(StoreError::UnknownUnit {
                code: found.code,
                unit: unit.to_string(),
            });
        }

        let item = CountedItem {
            id: Uuid::new_v4(),
            session_id: session,
            product_code: found.code.clone(),
            product_name: found.name.clone(),
            unit: unit.to_string(),
            quantity,
            counted_by: counted_by.to_string(),
            counted_at: Utc::now(),
        };
        inner.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_quantity(&self, item: Uuid, quantity: f64) -> Result<CountedItem, StoreError> {
        self.simulate_latency().await;
        let mut inner = self.inner.write().await;
        let entry = inner
            .items
            .get_mut(&item)
            .ok_or(StoreError::ItemNotFound(item))?;
        entry.quantity = quantity;
        Ok(entry.clone())
    }

    async fn delete_item(&self, item: Uuid) -> Result<(), StoreError> {
        self.simulate_latency().await;
        self.inner
            .write()
            .await
            .items
            .remove(&item)
            .map(|_| ())
            .ok_or(StoreError::ItemNotFound(item))
    }

    async fn find_products(&self, query: &str) -> Result<Vec<Product>, StoreError> {
        self.simulate_latency().await;
        Ok(self
            .inner
            .read()
            .await
            .products
            .iter()
            .filter(|p| p.matches(query))
            .cloned()
            .collect())
    }
}
