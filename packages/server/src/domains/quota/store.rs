use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Session-scoped counter storage for the guest quota.
///
/// Counters only ever grow; the reset is external (the session itself
/// expiring and the client losing its cookie).
#[async_trait]
pub trait QuotaStore: Send + Sync {
    /// Number of prompts this session has already consumed.
    async fn used(&self, session_id: &str) -> u32;

    /// Consume one prompt if the counter is below `limit`. Returns the
    /// counter after the increment, or None when the quota is exhausted.
    /// Must be atomic per session.
    async fn try_consume(&self, session_id: &str, limit: u32) -> Option<u32>;
}

/// In-memory store. Counters live for the process lifetime.
#[derive(Default)]
pub struct InMemoryQuotaStore {
    counters: RwLock<HashMap<String, u32>>,
}

impl InMemoryQuotaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuotaStore for InMemoryQuotaStore {
    async fn used(&self, session_id: &str) -> u32 {
        let counters = self.counters.read().await;
        counters.get(session_id).copied().unwrap_or(0)
    }

    async fn try_consume(&self, session_id: &str, limit: u32) -> Option<u32> {
        // Check and increment under one write lock so two concurrent
        // requests from the same session cannot overshoot the limit.
        let mut counters = self.counters.write().await;
        let used = counters.entry(session_id.to_string()).or_insert(0);
        if *used >= limit {
            return None;
        }
        *used += 1;
        Some(*used)
    }
}
