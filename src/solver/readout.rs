use std::fmt;

use crate::math::round_to;

/// Rounded angle and scale values shown to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    /// Rotation angle in degrees.
    pub angle_degrees: f64,
    /// Scale factor.
    pub scale: f64,
}

impl Readout {
    /// Rounds a raw angle (radians) and scale for display.
    #[must_use]
    pub fn new(angle_radians: f64, scale: f64, angle_precision: i32, scale_precision: i32) -> Self {
        Self {
            angle_degrees: round_to(angle_radians.to_degrees(), angle_precision),
            scale: round_to(scale, scale_precision),
        }
    }
}

impl fmt::Display for Readout {
    // `{:?}` keeps a trailing `.0` on whole numbers ("90.0", "1.0").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Angle: {:?}° - Scale: {:?}", self.angle_degrees, self.scale)
    }
}
