//! Semantic telemetry fields and their subscription indices

use std::fmt;

/// Telemetry fields shown on the autopilot panel
///
/// Each field is bound to one dataref and one subscription index. The index
/// is the correlation key between the `RREF` request and the samples the
/// simulator streams back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Field {
    /// Elevator trim, -1.0 (nose down) to 1.0 (nose up)
    ElevatorTrim = 1,
    /// Flight director / autopilot mode (2 = servos engaged)
    AutopilotMode = 2,
    /// Heading hold status
    HeadingStatus = 3,
    /// NAV tracking status
    NavStatus = 4,
    /// Approach status
    ApproachStatus = 5,
    /// Altitude hold status
    AltitudeHoldStatus = 6,
    /// Vertical speed status
    VerticalSpeedStatus = 7,
    /// Selected altitude in feet
    AltitudeDial = 8,
    /// Magnetic heading of the aircraft
    AircraftHeading = 9,
    /// Heading bug
    TargetHeading = 10,
}

impl Field {
    /// Every field in index order
    pub const ALL: [Self; 10] = [
        Self::ElevatorTrim,
        Self::AutopilotMode,
        Self::HeadingStatus,
        Self::NavStatus,
        Self::ApproachStatus,
        Self::AltitudeHoldStatus,
        Self::VerticalSpeedStatus,
        Self::AltitudeDial,
        Self::AircraftHeading,
        Self::TargetHeading,
    ];

    /// Look up the field bound to a subscription index
    #[must_use]
    pub fn from_index(index: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.index() == index)
    }

    /// Subscription index
    #[must_use]
    pub const fn index(self) -> i32 {
        self as i32
    }

    /// Dataref path the field is read from
    #[must_use]
    pub const fn dataref(self) -> &'static str {
        match self {
            Self::ElevatorTrim => "sim/cockpit2/controls/elevator_trim",
            Self::AutopilotMode => "sim/cockpit2/autopilot/flight_director_mode",
            Self::HeadingStatus => "sim/cockpit2/autopilot/heading_status",
            Self::NavStatus => "sim/cockpit2/autopilot/nav_status",
            Self::ApproachStatus => "sim/cockpit2/autopilot/approach_status",
            Self::AltitudeHoldStatus => "sim/cockpit2/autopilot/altitude_hold_status",
            Self::VerticalSpeedStatus => "sim/cockpit2/autopilot/vvi_status",
            Self::AltitudeDial => "sim/cockpit2/autopilot/altitude_dial_ft",
            Self::AircraftHeading => "sim/cockpit2/gauges/indicators/heading_vacuum_deg_mag",
            Self::TargetHeading => "sim/cockpit2/autopilot/heading_dial_deg_mag_pilot",
        }
    }

    /// Whether the field is a discrete status flag rather than a measurement
    #[must_use]
    pub const fn is_status(self) -> bool {
        matches!(
            self,
            Self::AutopilotMode
                | Self::HeadingStatus
                | Self::NavStatus
                | Self::ApproachStatus
                | Self::AltitudeHoldStatus
                | Self::VerticalSpeedStatus
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ElevatorTrim => "elevator_trim",
            Self::AutopilotMode => "ap_mode",
            Self::HeadingStatus => "hdg_status",
            Self::NavStatus => "nav_status",
            Self::ApproachStatus => "apr_status",
            Self::AltitudeHoldStatus => "alt_status",
            Self::VerticalSpeedStatus => "vs_status",
            Self::AltitudeDial => "altitude_dial",
            Self::AircraftHeading => "aircraft_heading",
            Self::TargetHeading => "target_heading",
        };
        write!(f, "{name}")
    }
}
