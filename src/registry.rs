//! Subscription registry
//!
//! Holds the fixed catalogue of `(index, dataref, frequency)` entries and
//! the `RREF` packets that (re-)establish them after every restart.

use std::collections::HashSet;

use bytes::Bytes;

use crate::protocol::encode_subscribe;
use crate::telemetry::Field;
use crate::transport::TransportError;

/// Default update rate requested for every standard subscription.
pub const DEFAULT_FREQUENCY: i32 = 15;

/// Standing request for the simulator to stream one dataref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    /// Client-chosen correlation index.
    pub index: i32,
    /// Dataref path.
    pub dataref: String,
    /// Updates per second.
    pub frequency: i32,
}

impl Subscription {
    /// Create a subscription entry.
    pub fn new(index: i32, dataref: impl Into<String>, frequency: i32) -> Self {
        Self {
            index,
            dataref: dataref.into(),
            frequency,
        }
    }
}

/// Immutable catalogue of subscriptions.
#[derive(Debug, Clone)]
pub struct SubscriptionRegistry {
    entries: Vec<Subscription>,
    packets: Vec<Bytes>,
}

impl SubscriptionRegistry {
    /// Build a registry, validating and pre-encoding every entry.
    ///
    /// # Errors
    ///
    /// Fails if two entries share an index or a dataref name cannot be
    /// framed.
    pub fn new(entries: Vec<Subscription>) -> Result<Self, TransportError> {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut packets = Vec::with_capacity(entries.len());

        for entry in &entries {
            if !seen.insert(entry.index) {
                return Err(TransportError::DuplicateIndex { index: entry.index });
            }
            packets.push(encode_subscribe(
                entry.index,
                &entry.dataref,
                entry.frequency,
            )?);
        }

        Ok(Self { entries, packets })
    }

    /// The ten autopilot-panel datarefs, all at `frequency` updates/sec.
    #[must_use]
    pub fn standard(frequency: i32) -> Self {
        let entries = Field::ALL
            .into_iter()
            .map(|field| Subscription::new(field.index(), field.dataref(), frequency))
            .collect();

        Self::new(entries).expect("standard catalogue has unique indices and short names")
    }

    /// Catalogue entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[Subscription] {
        &self.entries
    }

    /// Entry registered under `index`.
    #[must_use]
    pub fn lookup(&self, index: i32) -> Option<&Subscription> {
        self.entries.iter().find(|entry| entry.index == index)
    }

    /// Whether `index` belongs to this catalogue.
    #[must_use]
    pub fn contains(&self, index: i32) -> bool {
        self.lookup(index).is_some()
    }

    /// One `RREF` packet per entry, in registration order.
    pub fn all_subscribe_packets(&self) -> impl ExactSizeIterator<Item = Bytes> + '_ {
        self.packets.iter().cloned()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::standard(DEFAULT_FREQUENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Error, SUBSCRIBE_PACKET_SIZE};

    #[test]
    fn test_standard_catalogue() {
        let registry = SubscriptionRegistry::default();
        assert_eq!(registry.len(), 10);

        let heading = registry.lookup(9).unwrap();
        assert_eq!(
            heading.dataref,
            "sim/cockpit2/gauges/indicators/heading_vacuum_deg_mag"
        );
        assert_eq!(heading.frequency, 15);
        assert!(!registry.contains(11));
    }

    #[test]
    fn test_packets_follow_catalogue() {
        let registry = SubscriptionRegistry::standard(20);
        let packets: Vec<Bytes> = registry.all_subscribe_packets().collect();
        assert_eq!(packets.len(), registry.len());

        for (packet, entry) in packets.iter().zip(registry.entries()) {
            assert_eq!(packet.len(), SUBSCRIBE_PACKET_SIZE);
            assert_eq!(&packet[..5], b"RREF\0");
            assert_eq!(i32::from_le_bytes(packet[5..9].try_into().unwrap()), 20);
            assert_eq!(
                i32::from_le_bytes(packet[9..13].try_into().unwrap()),
                entry.index
            );
            assert!(packet[13..].starts_with(entry.dataref.as_bytes()));
        }
    }

    #[test]
    fn test_packets_are_reissuable() {
        let registry = SubscriptionRegistry::default();
        let first: Vec<Bytes> = registry.all_subscribe_packets().collect();
        let second: Vec<Bytes> = registry.all_subscribe_packets().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_index_rejected() {
        let result = SubscriptionRegistry::new(vec![
            Subscription::new(1, "sim/a", 5),
            Subscription::new(1, "sim/b", 5),
        ]);
        assert!(matches!(
            result,
            Err(TransportError::DuplicateIndex { index: 1 })
        ));
    }

    #[test]
    fn test_oversized_name_rejected() {
        let result = SubscriptionRegistry::new(vec![Subscription::new(1, "n".repeat(400), 5)]);
        assert!(matches!(
            result,
            Err(TransportError::Protocol(Error::NameTooLong { .. }))
        ));
    }
}
