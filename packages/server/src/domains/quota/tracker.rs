use std::sync::Arc;

use super::store::QuotaStore;

/// Unauthenticated callers get this many prompts per session.
pub const GUEST_TRY_LIMIT: u32 = 5;

/// Outcome of attempting to consume one guest prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaDecision {
    pub allowed: bool,
    /// None means unlimited (authenticated caller).
    pub remaining: Option<u32>,
}

/// Read-only quota view for the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaStatus {
    pub is_authenticated: bool,
    pub remaining: Option<u32>,
    pub limit: Option<u32>,
    pub used: Option<u32>,
}

/// Guest quota gate in front of the assistant.
///
/// Authenticated callers bypass the gate entirely and never touch the
/// store; guests consume one prompt per accepted request.
pub struct GuestQuota {
    store: Arc<dyn QuotaStore>,
    limit: u32,
}

impl GuestQuota {
    pub fn new(store: Arc<dyn QuotaStore>) -> Self {
        Self {
            store,
            limit: GUEST_TRY_LIMIT,
        }
    }

    #[cfg(test)]
    pub fn with_limit(store: Arc<dyn QuotaStore>, limit: u32) -> Self {
        Self { store, limit }
    }

    /// Consume one prompt for a guest session.
    pub async fn check_and_consume(&self, session_id: &str, is_authenticated: bool) -> QuotaDecision {
        if is_authenticated {
            return QuotaDecision {
                allowed: true,
                remaining: None,
            };
        }

        match self.store.try_consume(session_id, self.limit).await {
            Some(used) => QuotaDecision {
                allowed: true,
                remaining: Some(self.limit.saturating_sub(used)),
            },
            None => QuotaDecision {
                allowed: false,
                remaining: Some(0),
            },
        }
    }

    /// Current quota state without consuming anything.
    pub async fn peek(&self, session_id: &str, is_authenticated: bool) -> QuotaStatus {
        if is_authenticated {
            return QuotaStatus {
                is_authenticated: true,
                remaining: None,
                limit: None,
                used: None,
            };
        }

        let used = self.store.used(session_id).await;
        QuotaStatus {
            is_authenticated: false,
            remaining: Some(self.limit.saturating_sub(used)),
            limit: Some(self.limit),
            used: Some(used),
        }
    }
}
