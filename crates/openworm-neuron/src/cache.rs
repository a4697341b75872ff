//! Process-wide cache of built representations, keyed by data-source identity.
//!
//! Every neuron built from the same sources shares one connectome graph and
//! one statement store. Concurrent first accesses share a single build; a
//! failed build leaves the slot empty so the next access retries.
//! Invalidation only affects neurons that have not yet taken their snapshot.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;

use openworm_connectome::{ConnectomeGraph, ConnectomeLoader};
use openworm_semantic::{StatementStore, StatementStoreLoader};

use crate::error::Result;

#[derive(Debug)]
struct Built<T> {
    value: Arc<T>,
    built_at: DateTime<Utc>,
}

type Slot<T> = Arc<OnceCell<Built<T>>>;

/// Build-once slots for one representation type.
#[derive(Debug)]
struct Shelf<T> {
    slots: Mutex<HashMap<String, Slot<T>>>,
}

impl<T> Default for Shelf<T> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> Shelf<T> {
    fn slot(&self, key: &str) -> Slot<T> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(key.to_string()).or_default().clone()
    }

    async fn get_or_build<F, Fut>(&self, key: &str, build: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let slot = self.slot(key);
        let built = slot
            .get_or_try_init(|| async move {
                let value = build().await?;
                let built_at = Utc::now();
                tracing::debug!(source = key, %built_at, "Cached representation");
                Ok::<_, crate::error::NeuronError>(Built {
                    value: Arc::new(value),
                    built_at,
                })
            })
            .await?;
        Ok(built.value.clone())
    }

    fn built_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).and_then(|s| s.get()).map(|b| b.built_at)
    }

    fn invalidate(&self, key: &str) -> bool {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.remove(key).is_some_and(|s| s.initialized())
    }

    fn clear(&self) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Shared cache of connectome graphs and statement stores.
#[derive(Debug, Default)]
pub struct DataCache {
    connectomes: Shelf<ConnectomeGraph>,
    statements: Shelf<StatementStore>,
}

static SHARED: OnceLock<Arc<DataCache>> = OnceLock::new();

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide instance.
    pub fn shared() -> Arc<Self> {
        SHARED.get_or_init(|| Arc::new(Self::new())).clone()
    }

    /// The graph for `loader`'s sources, building it if no build has succeeded yet.
    pub async fn connectome(&self, loader: &ConnectomeLoader) -> Result<Arc<ConnectomeGraph>> {
        let key = loader.source_key();
        self.connectomes
            .get_or_build(&key, move || async move { Ok(loader.load().await?) })
            .await
    }

    /// The statement store for `loader`'s database, building it if needed.
    pub async fn statements(&self, loader: &StatementStoreLoader) -> Result<Arc<StatementStore>> {
        let key = loader.source_key();
        self.statements
            .get_or_build(&key, move || async move { Ok(loader.load().await?) })
            .await
    }

    pub fn connectome_built_at(&self, source_key: &str) -> Option<DateTime<Utc>> {
        self.connectomes.built_at(source_key)
    }

    pub fn statements_built_at(&self, source_key: &str) -> Option<DateTime<Utc>> {
        self.statements.built_at(source_key)
    }

    /// Drop the cached graph for a source. Returns whether one was built.
    pub fn invalidate_connectome(&self, source_key: &str) -> bool {
        let dropped = self.connectomes.invalidate(source_key);
        tracing::info!(source = source_key, dropped, "Invalidated connectome graph");
        dropped
    }

    /// Drop the cached statement store for a database. Returns whether one was built.
    pub fn invalidate_statements(&self, source_key: &str) -> bool {
        let dropped = self.statements.invalidate(source_key);
        tracing::info!(source = source_key, dropped, "Invalidated statement store");
        dropped
    }

    pub fn clear(&self) {
        self.connectomes.clear();
        self.statements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use openworm_semantic::SemanticError;

    use crate::error::NeuronError;

    #[tokio::test]
    async fn test_builds_once_per_key() {
        let shelf: Shelf<usize> = Shelf::default();
        let calls = AtomicUsize::new(0);
        let calls = &calls;
        let build = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        };

        assert_eq!(*shelf.get_or_build("a", build).await.unwrap(), 7);
        assert_eq!(*shelf.get_or_build("a", build).await.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        shelf.get_or_build("b", build).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(shelf.built_at("a").is_some());
        assert!(shelf.built_at("c").is_none());
    }

    #[tokio::test]
    async fn test_failed_build_is_retried() {
        let shelf: Shelf<usize> = Shelf::default();

        let err = shelf
            .get_or_build("a", || async {
                Err(NeuronError::Semantic(SemanticError::RelationNotConfigured {
                    relation: "reference_relation",
                }))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, NeuronError::Semantic(_)));
        assert!(shelf.built_at("a").is_none());

        let value = shelf.get_or_build("a", || async { Ok(3) }).await.unwrap();
        assert_eq!(*value, 3);
    }

    #[tokio::test]
    async fn test_invalidate_forces_rebuild() {
        let shelf: Shelf<usize> = Shelf::default();
        let first = shelf.get_or_build("a", || async { Ok(1) }).await.unwrap();

        assert!(shelf.invalidate("a"));
        assert!(!shelf.invalidate("a"));

        let second = shelf.get_or_build("a", || async { Ok(2) }).await.unwrap();
        assert_eq!((*first, *second), (1, 2));
    }

    #[test]
    fn test_shared_is_one_instance() {
        assert!(Arc::ptr_eq(&DataCache::shared(), &DataCache::shared()));
    }
}
