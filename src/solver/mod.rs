//! Derives the combined rotation and scale transform from three picks.

mod readout;

pub use readout::Readout;

use tracing::{debug, error};

use crate::error::{GeometryError, Result};
use crate::math::{
    angle_between, rotation_about, scaling_about, Matrix4, Point3, Vector3, TOLERANCE,
};

/// How the final transform treats the scale component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformPolicy {
    /// Rotate, then scale about the anchor.
    #[default]
    RotateAndScale,
    /// Rotate only; the pick is cancelled when there is nothing to rotate.
    RotationOnly,
}

impl TransformPolicy {
    /// Maps the state of the rotation-only modifier key to a policy.
    #[must_use]
    pub fn from_modifier(rotation_only: bool) -> Self {
        if rotation_only {
            Self::RotationOnly
        } else {
            Self::RotateAndScale
        }
    }
}

/// Angle, scale and rotation axis measured from the three picks.
#[derive(Debug, Clone, Copy)]
pub struct Measurement {
    /// Angle between the reference and target directions, in `[0, π]`.
    pub angle: f64,
    /// Ratio of the target distance to the reference distance.
    pub scale: f64,
    /// Unit rotation axis, `None` when the directions are parallel,
    /// anti-parallel or the angle is zero.
    pub axis: Option<Vector3>,
}

/// A transform ready to be applied to the selection.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// Unit rotation axis, `None` for a pure scale.
    pub rotation_axis: Option<Vector3>,
    /// Rotation angle in radians.
    pub angle: f64,
    /// Scale factor measured from the picks.
    pub scale: f64,
    /// Final affine matrix, anchored at the first reference point.
    pub matrix: Matrix4,
}

/// Why a final pick produced no transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Rotation-only mode with no usable rotation axis.
    NoRotation,
    /// The target coincides with the anchor, which would collapse the
    /// selection to a point.
    ZeroScale,
}

/// Outcome of [`RotaScale::solve`].
#[derive(Debug, Clone)]
pub enum Solution {
    /// Apply this transform.
    Apply(TransformResult),
    /// Discard the pick without touching the selection.
    Cancel(CancelReason),
}

/// Rotates and scales about `anchor` so that `reference` lands on the ray
/// towards `target` at the target's distance.
pub struct RotaScale {
    anchor: Point3,
    reference: Point3,
    target: Point3,
    policy: TransformPolicy,
}

impl RotaScale {
    /// Creates a new `RotaScale` solver.
    #[must_use]
    pub fn new(anchor: Point3, reference: Point3, target: Point3, policy: TransformPolicy) -> Self {
        Self {
            anchor,
            reference,
            target,
            policy,
        }
    }

    /// Measures the angle, scale and rotation axis.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateInput`] if the reference point
    /// coincides with the anchor.
    pub fn measure(&self) -> Result<Measurement> {
        let v1 = self.reference - self.anchor;
        let v2 = self.target - self.anchor;

        let len1 = v1.norm();
        if len1 < TOLERANCE {
            error!(
                anchor = ?self.anchor,
                reference = ?self.reference,
                "reference point coincides with anchor"
            );
            return Err(GeometryError::DegenerateInput(
                "reference point coincides with anchor".into(),
            )
            .into());
        }
        let len2 = v2.norm();

        let angle = angle_between(&v1, &v2);
        let scale = len2 / len1;

        // |v1 x v2| = len1 * len2 * sin(angle): compare sin(angle), not the raw length.
        let cross = v1.cross(&v2);
        let cross_len = cross.norm();
        let axis =
            (cross_len >= TOLERANCE * len1 * len2 && angle > 0.0).then(|| cross / cross_len);

        Ok(Measurement { angle, scale, axis })
    }

    /// Measures and rounds the angle and scale for display.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference point coincides with the anchor.
    pub fn readout(&self, angle_precision: i32, scale_precision: i32) -> Result<Readout> {
        let m = self.measure()?;
        Ok(Readout::new(m.angle, m.scale, angle_precision, scale_precision))
    }

    /// Computes the transform to apply.
    ///
    /// | axis        | policy           | result                      |
    /// |-------------|------------------|-----------------------------|
    /// | usable      | `RotateAndScale` | rotation × scale            |
    /// | usable      | `RotationOnly`   | rotation                    |
    /// | degenerate  | `RotateAndScale` | scale                       |
    /// | degenerate  | `RotationOnly`   | [`Solution::Cancel`]        |
    ///
    /// # Errors
    ///
    /// Returns an error if the reference point coincides with the anchor.
    pub fn solve(&self) -> Result<Solution> {
        let m = self.measure()?;
        debug!(angle = m.angle, scale = m.scale, axis = ?m.axis, policy = ?self.policy, "solving");

        let Some(axis) = m.axis else {
            return match self.policy {
                TransformPolicy::RotationOnly => Ok(Solution::Cancel(CancelReason::NoRotation)),
                TransformPolicy::RotateAndScale => self.scale_only(&m),
            };
        };

        let rotation = rotation_about(&self.anchor, &axis, m.angle)?;
        let matrix = match self.policy {
            TransformPolicy::RotationOnly => rotation,
            TransformPolicy::RotateAndScale => {
                rotation * scaling_about(&self.anchor, m.scale)?
            }
        };

        Ok(Solution::Apply(TransformResult {
            rotation_axis: Some(axis),
            angle: m.angle,
            scale: m.scale,
            matrix,
        }))
    }

    fn scale_only(&self, m: &Measurement) -> Result<Solution> {
        if m.scale < TOLERANCE {
            return Ok(Solution::Cancel(CancelReason::ZeroScale));
        }
        Ok(Solution::Apply(TransformResult {
            rotation_axis: None,
            angle: m.angle,
            scale: m.scale,
            matrix: scaling_about(&self.anchor, m.scale)?,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;
    use crate::error::RotaScaleError;
    use crate::math::transform_point;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn apply(solution: Solution) -> TransformResult {
        match solution {
            Solution::Apply(result) => result,
            Solution::Cancel(reason) => panic!("unexpected cancel: {reason:?}"),
        }
    }

    #[test]
    fn quarter_turn_with_unit_scale_is_pure_rotation() {
        let anchor = p(0.0, 0.0, 0.0);
        let solver = RotaScale::new(
            anchor,
            p(10.0, 0.0, 0.0),
            p(0.0, 10.0, 0.0),
            TransformPolicy::RotateAndScale,
        );
        let result = apply(solver.solve().unwrap());

        assert_relative_eq!(result.angle, FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(result.scale, 1.0, epsilon = 1e-12);
        let axis = result.rotation_axis.unwrap();
        assert_relative_eq!(axis, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);

        let rotation = rotation_about(&anchor, &Vector3::z(), FRAC_PI_2).unwrap();
        assert_relative_eq!(result.matrix, rotation, epsilon = 1e-12);
        assert_relative_eq!(
            transform_point(&result.matrix, &p(10.0, 0.0, 0.0)),
            p(0.0, 10.0, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn reference_lands_on_target() {
        let anchor = p(1.0, 2.0, 3.0);
        let reference = p(4.0, 2.0, 3.0);
        let target = p(1.0, 2.0, 9.0);
        let result = apply(
            RotaScale::new(anchor, reference, target, TransformPolicy::RotateAndScale)
                .solve()
                .unwrap(),
        );

        assert_relative_eq!(result.scale, 2.0, epsilon = 1e-12);
        assert_relative_eq!(transform_point(&result.matrix, &reference), target, epsilon = 1e-9);
        assert_relative_eq!(transform_point(&result.matrix, &anchor), anchor, epsilon = 1e-9);
        assert_relative_eq!(result.matrix[(3, 3)], 1.0);
    }

    #[test]
    fn rotation_only_preserves_distances_from_anchor() {
        let anchor = p(1.0, 2.0, 3.0);
        let solver = RotaScale::new(
            anchor,
            p(4.0, 2.0, 3.0),
            p(1.0, 8.0, 3.0),
            TransformPolicy::RotationOnly,
        );
        let result = apply(solver.solve().unwrap());

        for q in [p(0.0, 0.0, 0.0), p(5.0, -3.0, 2.0), p(1.0, 2.0, 10.0)] {
            let moved = transform_point(&result.matrix, &q);
            assert_relative_eq!((moved - anchor).norm(), (q - anchor).norm(), epsilon = 1e-9);
        }
        assert_relative_eq!(transform_point(&result.matrix, &anchor), anchor, epsilon = 1e-9);
    }

    #[test]
    fn sub_micron_picks_still_rotate() {
        let anchor = p(0.0, 0.0, 0.0);
        let reference = p(1e-6, 0.0, 0.0);
        let target = p(0.0, 1e-6, 0.0);

        let result = apply(
            RotaScale::new(anchor, reference, target, TransformPolicy::RotateAndScale)
                .solve()
                .unwrap(),
        );
        let axis = result.rotation_axis.unwrap();
        assert_relative_eq!(axis, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_relative_eq!(result.scale, 1.0, epsilon = 1e-12);
        assert_relative_eq!(transform_point(&result.matrix, &reference), target, epsilon = 1e-15);

        let solution = RotaScale::new(anchor, reference, target, TransformPolicy::RotationOnly)
            .solve()
            .unwrap();
        assert!(matches!(solution, Solution::Apply(_)));
    }

    #[test]
    fn same_direction_falls_back_to_scale() {
        let anchor = p(1.0, 1.0, 1.0);
        let reference = p(3.0, 1.0, 1.0);
        let solver =
            RotaScale::new(anchor, reference, p(5.0, 1.0, 1.0), TransformPolicy::RotateAndScale);
        let result = apply(solver.solve().unwrap());

        assert!(result.rotation_axis.is_none());
        assert_relative_eq!(result.scale, 2.0, epsilon = 1e-12);
        assert_relative_eq!(result.matrix, scaling_about(&anchor, 2.0).unwrap(), epsilon = 1e-12);

        let moved = transform_point(&result.matrix, &reference);
        assert_relative_eq!(moved, p(5.0, 1.0, 1.0), epsilon = 1e-9);
    }

    #[test]
    fn same_direction_with_rotation_only_cancels() {
        let solution = RotaScale::new(
            p(1.0, 1.0, 1.0),
            p(3.0, 1.0, 1.0),
            p(5.0, 1.0, 1.0),
            TransformPolicy::RotationOnly,
        )
        .solve()
        .unwrap();
        assert!(matches!(solution, Solution::Cancel(CancelReason::NoRotation)));
    }

    #[test]
    fn opposite_direction_is_scale_only() {
        let anchor = p(0.0, 0.0, 0.0);
        let solver = RotaScale::new(
            anchor,
            p(2.0, 0.0, 0.0),
            p(-1.0, 0.0, 0.0),
            TransformPolicy::RotateAndScale,
        );
        let m = solver.measure().unwrap();
        assert_relative_eq!(m.angle, PI, epsilon = 1e-12);
        assert!(m.axis.is_none());

        let result = apply(solver.solve().unwrap());
        assert_relative_eq!(result.scale, 0.5, epsilon = 1e-12);
        assert!(result.rotation_axis.is_none());
    }

    #[test]
    fn target_on_anchor_cancels() {
        let anchor = p(0.0, 0.0, 0.0);
        let solution =
            RotaScale::new(anchor, p(2.0, 0.0, 0.0), anchor, TransformPolicy::RotateAndScale)
                .solve()
                .unwrap();
        assert!(matches!(solution, Solution::Cancel(CancelReason::ZeroScale)));
    }

    #[test]
    fn reference_on_anchor_is_degenerate_input() {
        let anchor = p(3.0, 3.0, 3.0);
        let solver =
            RotaScale::new(anchor, anchor, p(0.0, 1.0, 0.0), TransformPolicy::RotateAndScale);
        let result = solver.solve();
        assert!(matches!(
            result,
            Err(RotaScaleError::Geometry(GeometryError::DegenerateInput(_)))
        ));
    }

    #[test]
    fn readout_is_rounded() {
        let readout = RotaScale::new(
            p(0.0, 0.0, 0.0),
            p(3.0, 0.0, 0.0),
            p(0.0, 4.0, 0.0),
            TransformPolicy::RotateAndScale,
        )
        .readout(1, 3)
        .unwrap();
        assert_eq!(readout.to_string(), "Angle: 90.0° - Scale: 1.333");
    }

    #[test]
    fn policy_follows_modifier() {
        assert_eq!(TransformPolicy::from_modifier(true), TransformPolicy::RotationOnly);
        assert_eq!(TransformPolicy::from_modifier(false), TransformPolicy::RotateAndScale);
    }
}
