use crate::host::Pick;
use crate::math::{Point3, TOLERANCE};

/// One of the three pick slots. Every event produces a fresh value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PickSlot {
    pub point: Option<Point3>,
    pub valid: bool,
    pub displayable: bool,
}

impl PickSlot {
    /// An unset slot.
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Captures a resolved pick.
    #[must_use]
    pub fn from_pick(pick: Pick) -> Self {
        Self {
            point: Some(pick.point),
            valid: pick.valid,
            displayable: pick.displayable,
        }
    }

    /// Returns the point if the slot holds a valid pick.
    #[must_use]
    pub fn valid_point(&self) -> Option<Point3> {
        self.point.filter(|_| self.valid)
    }

    /// Returns `true` if both slots hold valid picks at the same position.
    #[must_use]
    pub fn coincides_with(&self, other: &Self) -> bool {
        match (self.valid_point(), other.valid_point()) {
            (Some(a), Some(b)) => (a - b).norm() < TOLERANCE,
            _ => false,
        }
    }
}
