//! Last-known telemetry values and the heading noise filter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::Field;
use crate::protocol::Sample;

/// Thresholds of the aircraft-heading glitch filter.
///
/// A sample equal to `glitch_value` is discarded while the previous heading
/// lies strictly between `lower_bound` and `upper_bound`: the simulator
/// occasionally reports a spurious zero that would otherwise snap the
/// compass to north. A genuine pass through exactly `glitch_value` amid such
/// noise is suppressed as well, and the previous value stays on display
/// until the next non-glitch sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeadingFilterConfig {
    /// Value treated as a glitch.
    pub glitch_value: f64,
    /// Exclusive lower bound on the previous heading.
    pub lower_bound: f64,
    /// Exclusive upper bound on the previous heading.
    pub upper_bound: f64,
}

impl Default for HeadingFilterConfig {
    fn default() -> Self {
        Self {
            glitch_value: 0.0,
            lower_bound: 10.0,
            upper_bound: 350.0,
        }
    }
}

impl HeadingFilterConfig {
    /// Whether `value` should be discarded given the previous heading.
    #[must_use]
    pub fn rejects(&self, previous: f64, value: f64) -> bool {
        #[allow(clippy::float_cmp)]
        let is_glitch = value == self.glitch_value;
        is_glitch && previous > self.lower_bound && previous < self.upper_bound
    }
}

/// Snapshot of every telemetry field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetryState {
    /// Elevator trim position.
    pub elevator_trim: f64,
    /// Autopilot mode (2 = servos engaged).
    pub ap_mode: i32,
    /// Heading hold status.
    pub hdg_status: i32,
    /// NAV status.
    pub nav_status: i32,
    /// Approach status.
    pub apr_status: i32,
    /// Altitude hold status.
    pub alt_status: i32,
    /// Vertical speed status.
    pub vs_status: i32,
    /// Selected altitude in feet.
    pub altitude_dial: f64,
    /// Aircraft magnetic heading in degrees.
    pub aircraft_heading: f64,
    /// Heading bug in degrees.
    pub target_heading: f64,
}

impl TelemetryState {
    /// Current value of a field, widened to `f64`.
    #[must_use]
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::ElevatorTrim => self.elevator_trim,
            Field::AutopilotMode => f64::from(self.ap_mode),
            Field::HeadingStatus => f64::from(self.hdg_status),
            Field::NavStatus => f64::from(self.nav_status),
            Field::ApproachStatus => f64::from(self.apr_status),
            Field::AltitudeHoldStatus => f64::from(self.alt_status),
            Field::VerticalSpeedStatus => f64::from(self.vs_status),
            Field::AltitudeDial => self.altitude_dial,
            Field::AircraftHeading => self.aircraft_heading,
            Field::TargetHeading => self.target_heading,
        }
    }

    /// Autopilot servos engaged.
    #[must_use]
    pub const fn autopilot_engaged(&self) -> bool {
        self.ap_mode == 2
    }
}

/// Mutable telemetry store fed by the receive loop.
///
/// Every field is overwritten in place; no history is kept. Only the
/// aircraft heading goes through [`HeadingFilterConfig`].
#[derive(Debug, Clone, Default)]
pub struct TelemetryStore {
    state: TelemetryState,
    last_heading: f64,
    filter: HeadingFilterConfig,
}

impl TelemetryStore {
    /// Create an empty store with the given heading filter.
    #[must_use]
    pub fn new(filter: HeadingFilterConfig) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Current snapshot.
    #[must_use]
    pub const fn state(&self) -> &TelemetryState {
        &self.state
    }

    /// Heading used as the reference by the noise filter.
    #[must_use]
    pub const fn last_heading(&self) -> f64 {
        self.last_heading
    }

    /// Apply a decoded sample. Unknown indices are ignored.
    ///
    /// Returns `true` if the sample was stored.
    pub fn apply_sample(&mut self, sample: Sample) -> bool {
        match Field::from_index(sample.index) {
            Some(field) => self.apply(field, sample.value),
            None => {
                trace!(index = sample.index, "ignoring sample for unknown index");
                false
            }
        }
    }

    /// Store a value for `field`.
    ///
    /// Returns `false` only when the heading filter discards the value.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(&mut self, field: Field, value: f32) -> bool {
        let wide = f64::from(value);
        // Status flags are integral; `as` truncates toward zero and maps NaN to 0
        let flag = value as i32;

        match field {
            Field::ElevatorTrim => self.state.elevator_trim = wide,
            Field::AutopilotMode => self.state.ap_mode = flag,
            Field::HeadingStatus => self.state.hdg_status = flag,
            Field::NavStatus => self.state.nav_status = flag,
            Field::ApproachStatus => self.state.apr_status = flag,
            Field::AltitudeHoldStatus => self.state.alt_status = flag,
            Field::VerticalSpeedStatus => self.state.vs_status = flag,
            Field::AltitudeDial => self.state.altitude_dial = wide,
            Field::AircraftHeading => {
                if self.filter.rejects(self.last_heading, wide) {
                    debug!(previous = self.last_heading, "discarding heading glitch");
                    return false;
                }
                self.state.aircraft_heading = wide;
                self.last_heading = wide;
            }
            Field::TargetHeading => self.state.target_heading = wide,
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_heading(heading: f32) -> TelemetryStore {
        let mut store = TelemetryStore::default();
        assert!(store.apply(Field::AircraftHeading, heading));
        store
    }

    #[test]
    fn test_zero_glitch_discarded_mid_compass() {
        let mut store = store_with_heading(180.0);
        assert!(!store.apply(Field::AircraftHeading, 0.0));
        assert!((store.state().aircraft_heading - 180.0).abs() < f64::EPSILON);
        assert!((store.last_heading() - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_accepted_near_north() {
        let mut store = store_with_heading(5.0);
        assert!(store.apply(Field::AircraftHeading, 0.0));
        assert!(store.state().aircraft_heading.abs() < f64::EPSILON);

        let mut store = store_with_heading(355.0);
        assert!(store.apply(Field::AircraftHeading, 0.0));
        assert!(store.state().aircraft_heading.abs() < f64::EPSILON);
    }

    #[test]
    fn test_filter_bounds_are_exclusive() {
        let mut store = store_with_heading(10.0);
        assert!(store.apply(Field::AircraftHeading, 0.0));

        let mut store = store_with_heading(350.0);
        assert!(store.apply(Field::AircraftHeading, 0.0));
    }

    #[test]
    fn test_custom_filter_thresholds() {
        let mut store = TelemetryStore::new(HeadingFilterConfig {
            glitch_value: 0.0,
            lower_bound: 90.0,
            upper_bound: 270.0,
        });
        store.apply(Field::AircraftHeading, 45.0);
        assert!(store.apply(Field::AircraftHeading, 0.0));

        store.apply(Field::AircraftHeading, 180.0);
        assert!(!store.apply(Field::AircraftHeading, 0.0));
    }

    #[test]
    fn test_nonzero_heading_always_stored() {
        let mut store = store_with_heading(180.0);
        assert!(store.apply(Field::AircraftHeading, 0.5));
        assert!((store.state().aircraft_heading - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_index_leaves_state_unchanged() {
        let mut store = store_with_heading(123.0);
        store.apply(Field::AltitudeDial, 8000.0);
        let before = *store.state();

        assert!(!store.apply_sample(Sample::new(11, 42.0)));
        assert_eq!(*store.state(), before);
    }

    #[test]
    fn test_status_flags_truncate() {
        let mut store = TelemetryStore::default();
        store.apply_sample(Sample::new(2, 2.0));
        store.apply_sample(Sample::new(3, 1.9));
        store.apply_sample(Sample::new(7, -0.5));

        assert!(store.state().autopilot_engaged());
        assert_eq!(store.state().hdg_status, 1);
        assert_eq!(store.state().vs_status, 0);
    }

    #[test]
    fn test_every_index_maps_to_its_field() {
        let mut store = TelemetryStore::default();
        for field in Field::ALL {
            let value = 100.0 + field.index() as f32;
            assert!(store.apply_sample(Sample::new(field.index(), value)));
            assert!((store.state().get(field) - f64::from(value)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_other_fields_overwrite_unconditionally() {
        let mut store = TelemetryStore::default();
        store.apply(Field::TargetHeading, 180.0);
        assert!(store.apply(Field::TargetHeading, 0.0));
        assert!(store.state().target_heading.abs() < f64::EPSILON);

        assert!(store.apply(Field::ElevatorTrim, -7.5));
        assert!((store.state().elevator_trim + 7.5).abs() < f64::EPSILON);
    }
}
