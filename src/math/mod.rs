mod round;
mod transform;

pub use round::round_to;
pub use transform::{
    normalize_homogeneous, rotation_about, scaling_about, transform_point, weighted_scaling_about,
};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns the angle between two vectors in radians, always in `[0, π]`.
///
/// A zero-length input has no direction, so the angle is reported as `0.0`
/// instead of `NaN`.
#[must_use]
pub fn angle_between(a: &Vector3, b: &Vector3) -> f64 {
    let len_a = a.norm();
    let len_b = b.norm();
    if len_a < TOLERANCE || len_b < TOLERANCE {
        return 0.0;
    }
    // Clamp: rounding can push the cosine of (anti-)parallel vectors past ±1.
    (a.dot(b) / (len_a * len_b)).clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn perpendicular_vectors() {
        let a = Vector3::new(10.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 3.0, 0.0);
        assert_relative_eq!(angle_between(&a, &b), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn angle_is_never_negative() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(1.0, -1.0, 0.0);
        let angle = angle_between(&a, &b);
        assert!(angle > 0.0);
        assert_relative_eq!(angle, PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn anti_parallel_is_pi() {
        let a = Vector3::new(2.0, 2.0, 2.0);
        let b = Vector3::new(-1.0, -1.0, -1.0);
        assert_relative_eq!(angle_between(&a, &b), PI, epsilon = 1e-7);
    }

    #[test]
    fn zero_vector_gives_zero_angle() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 1.0, 0.0);
        assert!(angle_between(&a, &b).abs() < f64::EPSILON);
        assert!(angle_between(&b, &a).abs() < f64::EPSILON);
    }
}
