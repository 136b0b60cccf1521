//! Telemetry state published to the display layer
//!
//! The receive loop is the only writer; it applies every sample of a
//! datagram in framed order and then notifies watchers once. Readers get
//! best-effort freshness: a snapshot is consistent within one datagram but
//! may already be stale when it is read.

mod continuity;
mod field;
mod store;

use tokio::sync::watch;

pub use continuity::HeadingUnwrapper;
pub use field::Field;
pub use store::{HeadingFilterConfig, TelemetryState, TelemetryStore};

/// Read-only handle on the telemetry store.
///
/// Cheap to clone; each clone tracks its own "seen" version.
#[derive(Debug, Clone)]
pub struct TelemetryWatch {
    inner: watch::Receiver<TelemetryStore>,
}

impl TelemetryWatch {
    pub(crate) fn new(inner: watch::Receiver<TelemetryStore>) -> Self {
        Self { inner }
    }

    /// Latest known values.
    #[must_use]
    pub fn snapshot(&self) -> TelemetryState {
        *self.inner.borrow().state()
    }

    /// Whether the store changed since this handle last looked at it.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.inner.has_changed().unwrap_or(false)
    }

    /// Wait for the next update and return it.
    ///
    /// Returns `None` once the owning link has been dropped.
    pub async fn changed(&mut self) -> Option<TelemetryState> {
        self.inner.changed().await.ok()?;
        Some(*self.inner.borrow_and_update().state())
    }
}
