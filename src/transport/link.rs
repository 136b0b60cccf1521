//! Connection manager for the simulator link.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --configure/restart--> Connecting --socket writable, RREF sent--> Active
//!                                  ^                                       |
//!                                  +---------------restart-----------------+
//! ```
//!
//! A restart tears down both paths without draining: the receive task is
//! aborted mid-wait and its socket closed before the new pair is bound.
//!
//! The listening socket doubles as the sending socket so the simulator's
//! `RREF` echo, addressed to the sender's port, reaches the receive loop. If
//! the listening port cannot be bound, sends go out from an ephemeral port
//! and no telemetry arrives until the next restart.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, trace, warn};

use super::error::TransportError;
use super::socket::SocketBinding;
use super::{Endpoint, LinkConfig};
use crate::panel::{self, Adjustment, PanelAction};
use crate::preferences::PreferenceStore;
use crate::protocol::metrics::Metrics;
use crate::protocol::{self, MessageTag, decode_samples, encode_command, encode_direct_write};
use crate::registry::SubscriptionRegistry;
use crate::telemetry::{TelemetryState, TelemetryStore, TelemetryWatch};

/// Lifecycle state of the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// No sockets open.
    Idle,
    /// Sockets are being opened, or the simulator address could not be used.
    Connecting,
    /// Subscriptions issued; sends and telemetry flow.
    Active,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Active => "active",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug)]
struct Sender {
    socket: SocketBinding,
    remote: SocketAddr,
}

#[derive(Debug)]
struct Listener {
    local_addr: SocketAddr,
    task: JoinHandle<Result<(), TransportError>>,
}

/// Bidirectional link to one simulator.
///
/// Owns the sending path, the receive task and the telemetry store. The
/// display side observes telemetry through [`TelemetryWatch`] handles.
pub struct XPlaneLink {
    config: LinkConfig,
    endpoint: Endpoint,
    registry: Arc<SubscriptionRegistry>,
    telemetry: Arc<watch::Sender<TelemetryStore>>,
    preferences: Option<Box<dyn PreferenceStore>>,
    state: LinkState,
    sender: Option<Sender>,
    listener: Option<Listener>,
}

impl XPlaneLink {
    /// Create an idle link subscribing to the standard catalogue.
    #[must_use]
    pub fn new(config: LinkConfig) -> Self {
        let registry = SubscriptionRegistry::standard(config.frequency);
        Self::with_registry(config, registry)
    }

    /// Create an idle link with a custom subscription catalogue.
    #[must_use]
    pub fn with_registry(config: LinkConfig, registry: SubscriptionRegistry) -> Self {
        let (telemetry, _) = watch::channel(TelemetryStore::new(config.heading_filter));
        Self {
            endpoint: config.endpoint.clone(),
            config,
            registry: Arc::new(registry),
            telemetry: Arc::new(telemetry),
            preferences: None,
            state: LinkState::Idle,
            sender: None,
            listener: None,
        }
    }

    /// Create an idle link whose simulator host is taken from `preferences`
    /// when one was stored. Later address changes are saved back.
    #[must_use]
    pub fn with_preferences(
        mut config: LinkConfig,
        preferences: impl PreferenceStore + 'static,
    ) -> Self {
        if let Some(host) = preferences.load() {
            config.endpoint.host = host;
        }
        let mut link = Self::new(config);
        link.preferences = Some(Box::new(preferences));
        link
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LinkState {
        self.state
    }

    /// Configured simulator endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Subscription catalogue.
    #[must_use]
    pub fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }

    /// Whether a receive loop is currently running.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listener
            .as_ref()
            .is_some_and(|listener| !listener.task.is_finished())
    }

    /// Local address of the listening socket.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().map(|listener| listener.local_addr)
    }

    /// Resolved simulator address packets are sent to.
    #[must_use]
    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.sender.as_ref().map(|sender| sender.remote)
    }

    /// New read-only handle on the telemetry store.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryWatch {
        TelemetryWatch::new(self.telemetry.subscribe())
    }

    /// Latest known telemetry values.
    #[must_use]
    pub fn snapshot(&self) -> TelemetryState {
        *self.telemetry.borrow().state()
    }

    /// Point the link at `endpoint` and restart.
    ///
    /// Always pays the restart cost, even when the endpoint is unchanged.
    pub async fn configure(&mut self, endpoint: Endpoint) -> Result<(), TransportError> {
        self.endpoint = endpoint;
        self.restart().await
    }

    /// Persist a new simulator host and restart on it. Ports are kept.
    pub async fn set_target_address(
        &mut self,
        host: impl Into<String>,
    ) -> Result<(), TransportError> {
        let host = host.into();
        if let Some(preferences) = self.preferences.as_mut() {
            if let Err(err) = preferences.save(&host) {
                warn!(%host, error = %err, "failed to persist simulator address");
            }
        }

        let endpoint = Endpoint {
            host,
            ..self.endpoint.clone()
        };
        self.configure(endpoint).await
    }

    /// Tear down both sockets and rebuild them for the current endpoint.
    ///
    /// A listener that fails to bind is logged and skipped; sends still
    /// proceed. An error is returned only when the sending path could not
    /// be established, in which case the link stays `Connecting`.
    #[instrument(level = "info", skip(self), fields(endpoint = %self.endpoint))]
    pub async fn restart(&mut self) -> Result<(), TransportError> {
        self.teardown().await;
        Metrics::record_restart();
        self.state = LinkState::Connecting;

        let listen_addr = SocketAddr::new(self.config.bind_ip, self.endpoint.receive_port);
        let socket = match SocketBinding::bind(listen_addr).await {
            Ok(socket) => {
                self.listener = Some(self.spawn_receiver(socket.clone(), listen_addr));
                socket
            }
            Err(err) => {
                warn!(error = %err, "receive path unavailable until next restart");
                SocketBinding::bind(SocketAddr::new(self.config.bind_ip, 0)).await?
            }
        };

        let remote = resolve(&self.endpoint, self.config.bind_ip).await?;
        socket.ready().await.map_err(TransportError::NotReady)?;
        self.sender = Some(Sender { socket, remote });

        for packet in self.registry.all_subscribe_packets() {
            self.send(MessageTag::Subscribe, &packet);
        }

        self.state = LinkState::Active;
        info!(
            %remote,
            listening = self.listener.is_some(),
            subscriptions = self.registry.len(),
            "link active"
        );
        Ok(())
    }

    /// Close both sockets and return to `Idle`.
    pub async fn shutdown(&mut self) {
        self.teardown().await;
        self.state = LinkState::Idle;
        debug!("link shut down");
    }

    /// Send a simulator command. No-op while no sending socket is open.
    pub fn send_command(&self, path: &str) {
        self.send(MessageTag::Command, &encode_command(path));
    }

    /// Write a dataref value. No-op while no sending socket is open.
    ///
    /// # Errors
    ///
    /// Rejects names that cannot be framed before anything is sent.
    pub fn send_direct_write(&self, dataref: &str, value: f32) -> protocol::Result<()> {
        let packet = encode_direct_write(dataref, value)?;
        self.send(MessageTag::DirectWrite, &packet);
        Ok(())
    }

    /// Send the command bound to a panel button.
    pub fn trigger(&self, action: PanelAction) {
        debug!(%action, "panel action");
        self.send_command(action.command());
    }

    /// Move the heading bug relative to its last known position.
    pub fn nudge_heading_bug(&self, delta: f64) -> protocol::Result<()> {
        self.apply(panel::nudge_heading_bug(&self.snapshot(), delta))
    }

    /// Step the selected altitude relative to its last known value.
    pub fn step_altitude(&self, step: f64) -> protocol::Result<()> {
        self.apply(panel::step_altitude(&self.snapshot(), step))
    }

    /// Send a computed adjustment as a direct write.
    pub fn apply(&self, adjustment: Adjustment) -> protocol::Result<()> {
        self.send_direct_write(adjustment.dataref(), adjustment.value)
    }

    fn send(&self, tag: MessageTag, packet: &[u8]) {
        let Some(sender) = &self.sender else {
            trace!(%tag, "no sending socket, packet dropped");
            return;
        };

        match sender.socket.try_send_to(packet, sender.remote) {
            Ok(_) => Metrics::record_sent(tag),
            Err(err) => {
                Metrics::record_send_error();
                warn!(%tag, remote = %sender.remote, error = %err, "send failed");
            }
        }
    }

    fn spawn_receiver(&self, socket: SocketBinding, requested: SocketAddr) -> Listener {
        let local_addr = socket.local_addr().unwrap_or(requested);
        let task = tokio::spawn(receive_loop(
            socket,
            Arc::clone(&self.registry),
            Arc::clone(&self.telemetry),
            self.config.recv_buffer_size,
        ));
        Listener { local_addr, task }
    }

    async fn teardown(&mut self) {
        self.sender = None;
        if let Some(listener) = self.listener.take() {
            listener.task.abort();
            // The socket is only closed once the aborted task has been dropped
            match listener.task.await {
                Ok(Err(err)) => debug!(error = %err, "previous receive loop had stopped"),
                Err(err) if !err.is_cancelled() => warn!(error = %err, "receive loop panicked"),
                _ => {}
            }
        }
    }
}

impl Drop for XPlaneLink {
    fn drop(&mut self) {
        if let Some(listener) = &self.listener {
            listener.task.abort();
        }
    }
}

impl fmt::Debug for XPlaneLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XPlaneLink")
            .field("endpoint", &self.endpoint)
            .field("state", &self.state)
            .field("local_addr", &self.local_addr())
            .field("remote_addr", &self.remote_addr())
            .finish_non_exhaustive()
    }
}

async fn resolve(endpoint: &Endpoint, bind_ip: IpAddr) -> Result<SocketAddr, TransportError> {
    let mut addrs = tokio::net::lookup_host((endpoint.host.as_str(), endpoint.send_port))
        .await
        .map_err(|source| TransportError::Resolve {
            host: endpoint.host.clone(),
            source,
        })?;

    // The sending socket can only reach addresses of its own family
    addrs
        .find(|addr| addr.is_ipv4() == bind_ip.is_ipv4())
        .ok_or_else(|| TransportError::NoAddress {
            host: endpoint.host.clone(),
        })
}

async fn receive_loop(
    socket: SocketBinding,
    registry: Arc<SubscriptionRegistry>,
    telemetry: Arc<watch::Sender<TelemetryStore>>,
    buffer_size: usize,
) -> Result<(), TransportError> {
    let mut buffer = vec![0u8; buffer_size];
    let mut datagrams: u64 = 0;

    loop {
        let (len, from) = match socket.recv_from(&mut buffer).await {
            Ok(received) => received,
            Err(err) => {
                Metrics::record_receive_error();
                warn!(error = %err, datagrams, "receive loop stopped, restart required");
                return Err(TransportError::Receive(err));
            }
        };

        datagrams += 1;
        Metrics::record_datagram();
        if datagrams == 1 {
            info!(%from, len, "received first datagram");
        }

        apply_datagram(&registry, &telemetry, &buffer[..len]);
    }
}

/// Apply every sample of one datagram in framed order, notifying watchers
/// once if anything was stored.
fn apply_datagram(
    registry: &SubscriptionRegistry,
    telemetry: &watch::Sender<TelemetryStore>,
    datagram: &[u8],
) -> bool {
    let mut applied = 0;
    let mut dropped = 0;

    let modified = telemetry.send_if_modified(|store| {
        let mut modified = false;
        for sample in decode_samples(datagram) {
            if !registry.contains(sample.index) {
                trace!(index = sample.index, "dropping sample for unknown subscription");
                dropped += 1;
                continue;
            }
            if store.apply_sample(sample) {
                applied += 1;
                modified = true;
            }
        }
        modified
    });

    Metrics::record_samples(applied, dropped);
    modified
}
