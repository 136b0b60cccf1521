//! X-Plane autopilot link - UDP client for the X-Plane data interface
//!
//! This library subscribes to a fixed set of autopilot datarefs, keeps the
//! latest values in a telemetry store, and sends commands and direct
//! dataref writes back to the simulator.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xplane_ap::{LinkConfig, PanelAction, XPlaneLink};
//!
//! # async fn run() -> Result<(), xplane_ap::TransportError> {
//! let mut link = XPlaneLink::new(LinkConfig::default());
//! link.restart().await?;
//!
//! let mut telemetry = link.telemetry();
//! if let Some(state) = telemetry.changed().await {
//!     println!("heading {:.0}, AP engaged: {}", state.aircraft_heading, state.autopilot_engaged());
//! }
//!
//! link.trigger(PanelAction::Heading);
//! link.nudge_heading_bug(10.0)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Wire format
//!
//! All packets start with a four letter ASCII tag and a NUL byte. Numeric
//! fields are little-endian. See [`protocol`] for the exact layouts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod panel;
pub mod preferences;
pub mod protocol;
pub mod registry;
pub mod telemetry;
pub mod transport;

pub use panel::{Adjustment, PanelAction};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use protocol::{Error, MetricsSnapshot, Result, Sample};
pub use registry::{Subscription, SubscriptionRegistry};
pub use telemetry::{
    Field, HeadingFilterConfig, HeadingUnwrapper, TelemetryState, TelemetryStore, TelemetryWatch,
};
pub use transport::{Endpoint, LinkConfig, LinkState, TransportError, XPlaneLink};

/// Process-wide packet and sample counters.
#[must_use]
pub fn metrics() -> MetricsSnapshot {
    protocol::metrics::Metrics::totals()
}
