//! Simulator endpoint

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Port the simulator listens on for `CMND`/`DREF`/`RREF` packets.
pub const DEFAULT_SEND_PORT: u16 = 49000;

/// Local port this client binds to; the simulator echoes `RREF` responses
/// back to it.
pub const DEFAULT_RECEIVE_PORT: u16 = 49050;

/// Host used when no address has been stored yet.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Address of the simulator plus the two fixed ports.
///
/// Changing any part of the endpoint requires a full restart of the link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Endpoint {
    /// Simulator host name or IP address.
    pub host: String,
    /// Remote port packets are sent to.
    pub send_port: u16,
    /// Local port responses are received on.
    pub receive_port: u16,
}

impl Endpoint {
    /// Endpoint on the standard ports.
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_ports(host, DEFAULT_SEND_PORT, DEFAULT_RECEIVE_PORT)
    }

    /// Endpoint on explicit ports.
    pub fn with_ports(host: impl Into<String>, send_port: u16, receive_port: u16) -> Self {
        Self {
            host: host.into(),
            send_port,
            receive_port,
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} (local {})",
            self.host, self.send_port, self.receive_port
        )
    }
}
