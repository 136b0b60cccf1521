//! Minimal UDP socket wrapper for the simulator link.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;

use super::error::TransportError;

/// Binding for a UDP socket, shareable between the sending path and the
/// receive task.
#[derive(Debug, Clone)]
pub struct SocketBinding {
    socket: Arc<UdpSocket>,
}

impl SocketBinding {
    /// Bind to the provided address.
    pub async fn bind(addr: SocketAddr) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| TransportError::Bind { addr, source })?;
        Ok(Self {
            socket: Arc::new(socket),
        })
    }

    /// Wait until the OS reports the socket writable.
    pub async fn ready(&self) -> io::Result<()> {
        self.socket.writable().await
    }

    /// Send bytes to a remote address without waiting for socket readiness.
    ///
    /// Fails with [`io::ErrorKind::WouldBlock`] until [`ready`](Self::ready)
    /// has completed once.
    pub fn try_send_to(&self, buf: &[u8], addr: SocketAddr) -> io::Result<usize> {
        self.socket.try_send_to(buf, addr)
    }

    /// Receive bytes into the provided buffer.
    pub async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        self.socket.recv_from(buf).await
    }

    /// Access the local address for this binding.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}
