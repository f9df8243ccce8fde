//! In-process backend kept behind a `tokio::sync::RwLock`.
//!
//! It mirrors the Postgres semantics that callers rely on: unique emails,
//! ordering by creation time, shallow JSON merges and affected-row counts.

mod repository;

use std::sync::Arc;

use jiff_diesel::Timestamp;
use tokio::sync::RwLock;

use crate::TRACING_TARGET_CLIENT;
use crate::model::{CartEntry, CatalogDocument, SupportTicket, User};
use crate::query::Store;
use crate::types::CatalogKind;

/// In-memory store handle.
///
/// Cheap to clone: every clone shares the same collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    tickets: Vec<SupportTicket>,
    categories: Vec<CatalogDocument>,
    products: Vec<CatalogDocument>,
    shop_items: Vec<CatalogDocument>,
    carts: Vec<CartEntry>,
}

impl Collections {
    fn catalog(&self, kind: CatalogKind) -> &Vec<CatalogDocument> {
        match kind {
            CatalogKind::Category => &self.categories,
            CatalogKind::Product => &self.products,
            CatalogKind::ShopItem => &self.shop_items,
        }
    }

    fn catalog_mut(&mut self, kind: CatalogKind) -> &mut Vec<CatalogDocument> {
        match kind {
            CatalogKind::Category => &mut self.categories,
            CatalogKind::Product => &mut self.products,
            CatalogKind::ShopItem => &mut self.shop_items,
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn close(&self) {
        self.inner.write().await.clear();
        tracing::info!(target: TRACING_TARGET_CLIENT, "in-memory store closed");
    }
}

/// Current time as stored in records.
fn now() -> Timestamp {
    Timestamp::from(jiff::Timestamp::now())
}
