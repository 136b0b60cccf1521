use proptest::prelude::*;
use xplane_ap::{HeadingFilterConfig, HeadingUnwrapper, Sample, TelemetryStore};

proptest! {
    /// Consecutive outputs never jump more than half a turn
    #[test]
    fn unwrapped_rotation_has_no_large_steps(
        first in 0.0f64..360.0,
        headings in prop::collection::vec(0.0f64..360.0, 1..64),
    ) {
        let mut unwrapper = HeadingUnwrapper::new(first);
        let mut previous = unwrapper.accumulated();

        for heading in headings {
            let current = unwrapper.update(heading);
            prop_assert!((current - previous).abs() <= 180.0 + 1e-9);
            previous = current;
        }
    }

    /// The rotation always points at the last heading, modulo full turns
    #[test]
    fn unwrapped_rotation_tracks_heading(
        first in 0.0f64..360.0,
        headings in prop::collection::vec(0.0f64..360.0, 1..64),
    ) {
        let mut unwrapper = HeadingUnwrapper::new(first);
        for heading in &headings {
            unwrapper.update(*heading);
        }

        let last = headings[headings.len() - 1];
        let residue = (unwrapper.accumulated() + last).rem_euclid(360.0);
        prop_assert!(residue < 1e-6 || residue > 360.0 - 1e-6);
    }

    /// A zero reading between the bounds is always treated as a glitch
    #[test]
    fn zero_heading_glitch_is_discarded(previous in 10.5f32..349.5) {
        let mut store = TelemetryStore::new(HeadingFilterConfig::default());
        prop_assert!(store.apply_sample(Sample::new(9, previous)));
        prop_assert!(!store.apply_sample(Sample::new(9, 0.0)));
        prop_assert!((store.state().aircraft_heading - f64::from(previous)).abs() < 1e-6);
    }
}

#[test]
fn zero_heading_near_north_is_accepted() {
    let mut store = TelemetryStore::default();
    store.apply_sample(Sample::new(9, 5.0));
    assert!(store.apply_sample(Sample::new(9, 0.0)));
    assert_eq!(store.state().aircraft_heading, 0.0);
}
