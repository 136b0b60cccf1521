//! Link configuration.

use std::net::{IpAddr, Ipv4Addr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Endpoint;
use crate::registry::DEFAULT_FREQUENCY;
use crate::telemetry::HeadingFilterConfig;

/// Default receive buffer size in bytes.
///
/// A response carrying all ten standard subscriptions is 85 bytes; the
/// simulator batches at most a few hundred records per datagram.
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 2048;

/// Link configuration options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// Initial simulator endpoint.
    pub endpoint: Endpoint,
    /// Local interface sockets are bound to.
    pub bind_ip: IpAddr,
    /// Update rate requested for the standard subscriptions.
    pub frequency: i32,
    /// Size of the receive buffer in bytes.
    pub recv_buffer_size: usize,
    /// Aircraft heading glitch filter.
    pub heading_filter: HeadingFilterConfig,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            bind_ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            frequency: DEFAULT_FREQUENCY,
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
            heading_filter: HeadingFilterConfig::default(),
        }
    }
}
