use std::sync::atomic::{AtomicU64, Ordering};

use super::MessageTag;

/// Track link metrics without external dependencies.
pub(crate) struct Metrics;

static DATAGRAMS_RECEIVED: AtomicU64 = AtomicU64::new(0);
static SAMPLES_APPLIED: AtomicU64 = AtomicU64::new(0);
static SAMPLES_DROPPED: AtomicU64 = AtomicU64::new(0);
static COMMANDS_SENT: AtomicU64 = AtomicU64::new(0);
static DIRECT_WRITES_SENT: AtomicU64 = AtomicU64::new(0);
static SUBSCRIBES_SENT: AtomicU64 = AtomicU64::new(0);
static SEND_ERRORS: AtomicU64 = AtomicU64::new(0);
static RECEIVE_ERRORS: AtomicU64 = AtomicU64::new(0);
static RESTARTS: AtomicU64 = AtomicU64::new(0);

impl Metrics {
    #[inline]
    pub(crate) fn record_sent(tag: MessageTag) {
        let counter = match tag {
            MessageTag::Command => &COMMANDS_SENT,
            MessageTag::DirectWrite => &DIRECT_WRITES_SENT,
            MessageTag::Subscribe => &SUBSCRIBES_SENT,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_send_error() {
        SEND_ERRORS.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_datagram() {
        DATAGRAMS_RECEIVED.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_samples(applied: u64, dropped: u64) {
        SAMPLES_APPLIED.fetch_add(applied, Ordering::Relaxed);
        SAMPLES_DROPPED.fetch_add(dropped, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_receive_error() {
        RECEIVE_ERRORS.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_restart() {
        RESTARTS.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn totals() -> MetricsSnapshot {
        MetricsSnapshot {
            datagrams_received: DATAGRAMS_RECEIVED.load(Ordering::Relaxed),
            samples_applied: SAMPLES_APPLIED.load(Ordering::Relaxed),
            samples_dropped: SAMPLES_DROPPED.load(Ordering::Relaxed),
            commands_sent: COMMANDS_SENT.load(Ordering::Relaxed),
            direct_writes_sent: DIRECT_WRITES_SENT.load(Ordering::Relaxed),
            subscribes_sent: SUBSCRIBES_SENT.load(Ordering::Relaxed),
            send_errors: SEND_ERRORS.load(Ordering::Relaxed),
            receive_errors: RECEIVE_ERRORS.load(Ordering::Relaxed),
            restarts: RESTARTS.load(Ordering::Relaxed),
        }
    }
}

/// Lightweight snapshot of process-wide counters.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Datagrams read by any receive loop
    pub datagrams_received: u64,
    /// Samples applied to the telemetry store
    pub samples_applied: u64,
    /// Samples whose index matched no subscription
    pub samples_dropped: u64,
    /// `CMND` packets handed to the socket
    pub commands_sent: u64,
    /// `DREF` packets handed to the socket
    pub direct_writes_sent: u64,
    /// `RREF` packets handed to the socket
    pub subscribes_sent: u64,
    /// Sends rejected by the socket
    pub send_errors: u64,
    /// Receive loops ended by a socket error
    pub receive_errors: u64,
    /// Socket restarts
    pub restarts: u64,
}

impl MetricsSnapshot {
    /// Total packets handed to the socket.
    #[must_use]
    pub fn packets_sent(&self) -> u64 {
        self.commands_sent + self.direct_writes_sent + self.subscribes_sent
    }
}
