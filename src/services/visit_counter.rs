//! Approximate visit counter backed by a secondary key-value store.
//!
//! The counter is best-effort telemetry: a failed or unreachable store
//! degrades to a fixed default instead of failing the request.

use std::sync::Arc;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::CatalogError;

pub const VISIT_KEY: &str = "count";

const FALLBACK_COUNT: i64 = 1;

/// Contract for the secondary store. Implementations live behind an `Arc`
/// so tests can substitute a fake.
#[async_trait]
pub trait CounterStore: Send + Sync {
    async fn increment(&self, key: &str) -> Result<i64, CatalogError>;
    async fn get(&self, key: &str) -> Result<Option<String>, CatalogError>;
}

pub struct RedisCounterStore {
    conn: MultiplexedConnection,
}

impl RedisCounterStore {
    pub async fn connect(url: &str) -> Result<Self, CatalogError> {
        let client = redis::Client::open(url).map_err(|e| CatalogError::Store(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str) -> Result<i64, CatalogError> {
        // MultiplexedConnection is a cheap handle over one shared connection.
        let mut conn = self.conn.clone();
        conn.incr(key, 1i64)
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CatalogError> {
        let mut conn = self.conn.clone();
        conn.get(key)
            .await
            .map_err(|e| CatalogError::Store(e.to_string()))
    }
}

/// Process-wide counter handle carried in application state.
#[derive(Clone)]
pub struct VisitCounter {
    store: Option<Arc<dyn CounterStore>>,
}

impl VisitCounter {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Counter for deployments without a reachable secondary store; every
    /// read reports the fallback value.
    pub fn disconnected() -> Self {
        Self { store: None }
    }

    /// Increment the counter and return the new value. Never fails the
    /// surrounding request.
    pub async fn record_visit(&self) -> i64 {
        match &self.store {
            Some(store) => match store.increment(VISIT_KEY).await {
                Ok(count) => count,
                Err(e) => {
                    tracing::warn!("visit counter increment failed: {}", e);
                    FALLBACK_COUNT
                }
            },
            None => FALLBACK_COUNT,
        }
    }

    /// Read the counter without incrementing it.
    pub async fn current(&self) -> i64 {
        match &self.store {
            Some(store) => match store.get(VISIT_KEY).await {
                Ok(value) => value
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(FALLBACK_COUNT),
                Err(e) => {
                    tracing::warn!("visit counter read failed: {}", e);
                    FALLBACK_COUNT
                }
            },
            None => FALLBACK_COUNT,
        }
    }
}
