use crate::core::conversion::{ConversionRequest, PendingConversion};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Holds at most one pending conversion so confirmation settles at the rate
/// that was shown, not whatever the market says by then.
#[derive(Clone, Default)]
pub struct QuoteCache {
    inner: Arc<Mutex<Option<PendingConversion>>>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending conversion with `pending`.
    pub async fn store(&self, pending: PendingConversion) {
        let mut slot = self.inner.lock().await;
        if slot.is_some() {
            debug!("Cache PUT (overwriting pending conversion)");
        } else {
            debug!("Cache PUT");
        }
        *slot = Some(pending);
    }

    /// Removes and returns the pending conversion, if any.
    pub async fn take(&self) -> Option<PendingConversion> {
        let taken = self.inner.lock().await.take();
        if taken.is_some() {
            debug!("Cache TAKE");
        } else {
            debug!("Cache MISS");
        }
        taken
    }

    pub async fn peek(&self) -> Option<PendingConversion> {
        let value = *self.inner.lock().await;
        if value.is_some() {
            debug!("Cache HIT");
        } else {
            debug!("Cache MISS");
        }
        value
    }

    /// Drops the pending conversion unless it was quoted for `request`.
    /// Returns true when something was discarded.
    pub async fn discard_if_stale(&self, request: &ConversionRequest) -> bool {
        let mut slot = self.inner.lock().await;
        match slot.as_ref() {
            Some(pending) if !pending.matches(request) => {
                debug!(?pending, ?request, "Cache DISCARD stale pending conversion");
                *slot = None;
                true
            }
            _ => false,
        }
    }
}
