//! X-Plane UDP wire format
//!
//! This module provides the packet codec for the three outbound message
//! shapes (`CMND`, `DREF`, `RREF`) and the decoder for inbound `RREF`
//! responses.

mod codec;
mod error;
pub(crate) mod metrics;
mod types;

pub use codec::{Samples, decode_samples, encode_command, encode_direct_write, encode_subscribe};
pub use error::{Error, Result};
pub use metrics::MetricsSnapshot;
pub use types::{MessageTag, Sample};

/// Tag size in bytes (four ASCII letters plus NUL)
pub const TAG_SIZE: usize = 5;

/// Total size of a padded `DREF` packet
pub const DIRECT_WRITE_PACKET_SIZE: usize = 509;

/// Size of the zero-padded dataref name field in an `RREF` request
pub const SUBSCRIBE_NAME_FIELD_SIZE: usize = 400;

/// Total size of an `RREF` request (tag + frequency + index + name field)
pub const SUBSCRIBE_PACKET_SIZE: usize = TAG_SIZE + 4 + 4 + SUBSCRIBE_NAME_FIELD_SIZE;

/// Size of one `(index, value)` record in an `RREF` response
pub const SAMPLE_RECORD_SIZE: usize = 8;
