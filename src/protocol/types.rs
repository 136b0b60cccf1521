//! Message tags and decoded samples

use std::fmt;

/// Five-byte message tags (four ASCII letters plus NUL)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageTag {
    /// Fire-and-forget simulator command
    Command,
    /// Direct dataref write
    DirectWrite,
    /// Dataref subscription request, also used by the simulator's responses
    Subscribe,
}

impl MessageTag {
    /// Raw tag bytes as they appear on the wire
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8; super::TAG_SIZE] {
        match self {
            Self::Command => b"CMND\0",
            Self::DirectWrite => b"DREF\0",
            Self::Subscribe => b"RREF\0",
        }
    }

    /// Identify a tag from the first bytes of a datagram
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes.get(..4)? {
            b"CMND" => Some(Self::Command),
            b"DREF" => Some(Self::DirectWrite),
            b"RREF" => Some(Self::Subscribe),
            _ => None,
        }
    }
}

impl fmt::Display for MessageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Command => "CMND",
            Self::DirectWrite => "DREF",
            Self::Subscribe => "RREF",
        };
        write!(f, "{name}")
    }
}

/// One `(index, value)` record decoded from an `RREF` response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Subscription index chosen by this client
    pub index: i32,
    /// Current dataref value
    pub value: f32,
}

impl Sample {
    /// Create a sample
    #[must_use]
    pub const fn new(index: i32, value: f32) -> Self {
        Self { index, value }
    }
}
