//! UDP link to the simulator: endpoint, sockets and connection lifecycle.

mod config;
mod endpoint;
mod error;
mod link;
mod socket;

pub use config::{DEFAULT_RECV_BUFFER_SIZE, LinkConfig};
pub use endpoint::{DEFAULT_HOST, DEFAULT_RECEIVE_PORT, DEFAULT_SEND_PORT, Endpoint};
pub use error::TransportError;
pub use link::{LinkState, XPlaneLink};
pub use socket::SocketBinding;
