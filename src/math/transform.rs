use crate::error::{GeometryError, Result};

use super::{Matrix4, Point3, Vector3, TOLERANCE};

/// Builds a uniform scaling about `center` in weighted form.
///
/// The 3x3 block stays identity and the factor is carried by the
/// homogeneous entry as `1 / factor`, with the translation pre-divided to
/// match. This is the layout many modelling hosts hand out; pass it through
/// [`normalize_homogeneous`] before giving it to consumers that assume
/// `m[(3, 3)] == 1`.
///
/// # Errors
///
/// Returns an error if `factor` is zero.
pub fn weighted_scaling_about(center: &Point3, factor: f64) -> Result<Matrix4> {
    if factor.abs() < TOLERANCE {
        return Err(GeometryError::Degenerate("scale factor is zero".into()).into());
    }
    let weight = 1.0 / factor;
    let offset = center.coords * (weight - 1.0);

    let mut matrix = Matrix4::identity();
    matrix[(0, 3)] = offset.x;
    matrix[(1, 3)] = offset.y;
    matrix[(2, 3)] = offset.z;
    matrix[(3, 3)] = weight;
    Ok(matrix)
}

/// Divides every entry by the homogeneous entry so that `m[(3, 3)] == 1`.
///
/// The geometric transform is unchanged.
///
/// # Errors
///
/// Returns an error if the homogeneous entry is zero.
pub fn normalize_homogeneous(matrix: &Matrix4) -> Result<Matrix4> {
    let weight = matrix[(3, 3)];
    if weight.abs() < TOLERANCE {
        return Err(GeometryError::Degenerate("homogeneous entry is zero".into()).into());
    }
    let mut normalized = *matrix / weight;
    normalized[(3, 3)] = 1.0;
    Ok(normalized)
}

/// Builds a normalized uniform scaling about `center`.
///
/// # Errors
///
/// Returns an error if `factor` is zero.
pub fn scaling_about(center: &Point3, factor: f64) -> Result<Matrix4> {
    normalize_homogeneous(&weighted_scaling_about(center, factor)?)
}

/// Builds a rotation by `angle` radians around the axis through `origin`.
///
/// # Errors
///
/// Returns an error if the axis direction is zero-length.
pub fn rotation_about(origin: &Point3, axis: &Vector3, angle: f64) -> Result<Matrix4> {
    let len = axis.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    let axis = *axis / len;

    // Translate to origin, rotate, translate back
    let t_neg = Matrix4::new_translation(&(-origin.coords));
    let rot = rodrigues(&axis, angle);
    let t_pos = Matrix4::new_translation(&origin.coords);
    Ok(t_pos * rot * t_neg)
}

/// Builds a 4x4 rotation matrix around a unit axis by an angle (Rodrigues).
///
/// `axis` must already be normalized; [`rotation_about`] takes care of that.
#[allow(clippy::many_single_char_names)]
fn rodrigues(axis: &Vector3, angle: f64) -> Matrix4 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    #[allow(clippy::suspicious_operation_groupings)]
    Matrix4::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y, 0.0,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x, 0.0,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,     0.0,
        0.0,               0.0,               0.0,               1.0,
    )
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
///
/// The result is divided by the homogeneous coordinate, so weighted
/// matrices map points the same way as their normalized form.
#[must_use]
pub fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    if v.w.abs() < TOLERANCE {
        return Point3::new(v.x, v.y, v.z);
    }
    Point3::new(v.x / v.w, v.y / v.w, v.z / v.w)
}
