//! Heading continuity transform for compass display.

/// Unwraps a `[0, 360)` heading stream into a continuous rotation.
///
/// Consecutive headings are joined along the shortest arc, so a compass
/// card rotated by [`accumulated`](Self::accumulated) never spins the long
/// way around at the 0/360 seam. This assumes two consecutive samples are
/// never more than 180 degrees apart in true motion.
///
/// The rotation has the opposite sign of the heading: the card turns left
/// while the aircraft turns right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingUnwrapper {
    accumulated: f64,
    last_raw: f64,
}

impl HeadingUnwrapper {
    /// Seed the transform with the first observed heading.
    #[must_use]
    pub fn new(first_heading: f64) -> Self {
        Self {
            accumulated: -first_heading,
            last_raw: first_heading,
        }
    }

    /// Feed the next heading and return the accumulated rotation.
    pub fn update(&mut self, heading: f64) -> f64 {
        let diff = heading - self.last_raw;
        let delta = if diff > 180.0 {
            diff - 360.0
        } else if diff < -180.0 {
            diff + 360.0
        } else {
            diff
        };

        self.accumulated -= delta;
        self.last_raw = heading;
        self.accumulated
    }

    /// Current accumulated rotation in degrees.
    #[must_use]
    pub const fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Last raw heading fed to the transform.
    #[must_use]
    pub const fn last_heading(&self) -> f64 {
        self.last_raw
    }
}
