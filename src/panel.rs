//! Operator actions of the remote autopilot panel.

use std::fmt;

use crate::telemetry::{Field, TelemetryState};

/// Push-button actions, each mapped to one simulator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelAction {
    /// AP: engage/disengage the autopilot servos
    Autopilot,
    /// HDG: heading hold
    Heading,
    /// NAV: track the selected navigation source
    Nav,
    /// APR: approach mode
    Approach,
    /// ALT: altitude hold
    AltitudeHold,
    /// VS: vertical speed mode
    VerticalSpeed,
    /// UP: pitch/vertical-speed reference up
    NoseUp,
    /// DN: pitch/vertical-speed reference down
    NoseDown,
    /// Elevator trim nose up
    TrimUp,
    /// Elevator trim nose down
    TrimDown,
}

impl PanelAction {
    /// The eight buttons of the mode panel, in panel order.
    pub const BUTTONS: [Self; 8] = [
        Self::Autopilot,
        Self::Heading,
        Self::Nav,
        Self::Approach,
        Self::AltitudeHold,
        Self::VerticalSpeed,
        Self::NoseUp,
        Self::NoseDown,
    ];

    /// Command path sent when the action is triggered.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Autopilot => "sim/autopilot/servos_toggle",
            Self::Heading => "sim/autopilot/heading",
            Self::Nav => "sim/autopilot/NAV",
            Self::Approach => "sim/autopilot/approach",
            Self::AltitudeHold => "sim/autopilot/altitude_hold",
            Self::VerticalSpeed => "sim/autopilot/vertical_speed",
            Self::NoseUp => "sim/autopilot/nose_up",
            Self::NoseDown => "sim/autopilot/nose_down",
            Self::TrimUp => "sim/flight_controls/pitch_trim_up",
            Self::TrimDown => "sim/flight_controls/pitch_trim_down",
        }
    }

    /// Whether the button's annunciator is lit for `state`.
    #[must_use]
    pub const fn is_lit(self, state: &TelemetryState) -> bool {
        match self {
            Self::Autopilot => state.autopilot_engaged(),
            Self::Heading => state.hdg_status > 0,
            Self::Nav => state.nav_status > 0,
            Self::Approach => state.apr_status > 0,
            Self::AltitudeHold => state.alt_status > 0,
            Self::VerticalSpeed => state.vs_status > 0,
            Self::NoseUp | Self::NoseDown | Self::TrimUp | Self::TrimDown => false,
        }
    }
}

impl fmt::Display for PanelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Autopilot => "AP",
            Self::Heading => "HDG",
            Self::Nav => "NAV",
            Self::Approach => "APR",
            Self::AltitudeHold => "ALT",
            Self::VerticalSpeed => "VS",
            Self::NoseUp => "UP",
            Self::NoseDown => "DN",
            Self::TrimUp => "TRIM UP",
            Self::TrimDown => "TRIM DN",
        };
        write!(f, "{label}")
    }
}

/// A direct write computed from the current telemetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    /// Field whose dataref is written.
    pub field: Field,
    /// New value.
    pub value: f32,
}

impl Adjustment {
    /// Dataref the value is written to.
    #[must_use]
    pub const fn dataref(&self) -> &'static str {
        self.field.dataref()
    }
}

/// Move the heading bug by `delta` degrees, wrapping into `[0, 360)`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn nudge_heading_bug(state: &TelemetryState, delta: f64) -> Adjustment {
    let heading = (state.target_heading + delta).rem_euclid(360.0) as f32;

    Adjustment {
        field: Field::TargetHeading,
        // Rounding can land exactly on 360
        value: if heading >= 360.0 { 0.0 } else { heading },
    }
}

/// Raise (positive `step`) or lower the selected altitude, never below zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn step_altitude(state: &TelemetryState, step: f64) -> Adjustment {
    let altitude = (state.altitude_dial + step).max(0.0);

    Adjustment {
        field: Field::AltitudeDial,
        value: altitude as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> TelemetryState {
        TelemetryState::default()
    }

    #[test]
    fn test_commands() {
        assert_eq!(PanelAction::Autopilot.command(), "sim/autopilot/servos_toggle");
        assert_eq!(PanelAction::Nav.command(), "sim/autopilot/NAV");
        assert_eq!(
            PanelAction::TrimDown.command(),
            "sim/flight_controls/pitch_trim_down"
        );
    }

    #[test]
    fn test_autopilot_lit_only_in_mode_two() {
        let mut state = state();
        state.ap_mode = 1;
        assert!(!PanelAction::Autopilot.is_lit(&state));
        state.ap_mode = 2;
        assert!(PanelAction::Autopilot.is_lit(&state));
    }

    #[test]
    fn test_status_buttons_lit_when_positive() {
        let mut state = state();
        state.hdg_status = 2;
        state.nav_status = 1;
        state.vs_status = -1;

        assert!(PanelAction::Heading.is_lit(&state));
        assert!(PanelAction::Nav.is_lit(&state));
        assert!(!PanelAction::Approach.is_lit(&state));
        assert!(!PanelAction::VerticalSpeed.is_lit(&state));
        assert!(!PanelAction::NoseUp.is_lit(&state));
    }

    #[test]
    fn test_heading_bug_wraps() {
        let mut state = state();
        state.target_heading = 355.0;
        let adjustment = nudge_heading_bug(&state, 10.0);
        assert_eq!(adjustment.field, Field::TargetHeading);
        assert!((adjustment.value - 5.0).abs() < 1e-4);

        state.target_heading = 3.0;
        assert!((nudge_heading_bug(&state, -10.0).value - 353.0).abs() < 1e-4);

        state.target_heading = 0.0;
        assert!((nudge_heading_bug(&state, 1.0).value - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_heading_bug_never_reaches_360() {
        let mut state = state();
        state.target_heading = 350.0;
        assert!(nudge_heading_bug(&state, 10.0).value.abs() < 1e-4);

        state.target_heading = 0.0;
        let value = nudge_heading_bug(&state, -1e-15).value;
        assert!((0.0..360.0).contains(&value));
    }

    #[test]
    fn test_altitude_steps() {
        let mut state = state();
        state.altitude_dial = 4500.0;

        let up = step_altitude(&state, 1000.0);
        assert_eq!(up.dataref(), "sim/cockpit2/autopilot/altitude_dial_ft");
        assert!((up.value - 5500.0).abs() < f32::EPSILON);
        assert!((step_altitude(&state, -100.0).value - 4400.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_altitude_clamped_at_zero() {
        let mut state = state();
        state.altitude_dial = 300.0;
        assert!(step_altitude(&state, -1000.0).value.abs() < f32::EPSILON);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<String> = PanelAction::BUTTONS.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["AP", "HDG", "NAV", "APR", "ALT", "VS", "UP", "DN"]);
    }
}
