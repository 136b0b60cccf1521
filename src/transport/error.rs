//! Transport-level error types covering socket, resolution and codec failures.

use std::io;
use std::net::SocketAddr;

use crate::protocol;

/// Unified error type for link operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Local socket could not be bound.
    #[error("failed to bind UDP socket on {addr}: {source}")]
    Bind {
        /// Local address that was requested.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Simulator host name lookup failed.
    #[error("failed to resolve simulator host '{host}': {source}")]
    Resolve {
        /// Host as configured.
        host: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Simulator host resolved to no usable address.
    #[error("simulator host '{host}' resolved to no address")]
    NoAddress {
        /// Host as configured.
        host: String,
    },
    /// Sending socket never reported readiness.
    #[error("socket not ready: {0}")]
    NotReady(#[source] io::Error),
    /// Receive failed on an open socket.
    #[error("receive error: {0}")]
    Receive(#[source] io::Error),
    /// Packet encoding failure.
    #[error("packet error: {0}")]
    Protocol(#[from] protocol::Error),
    /// Two catalogue entries share a subscription index.
    #[error("subscription index {index} registered twice")]
    DuplicateIndex {
        /// Offending index.
        index: i32,
    },
}
