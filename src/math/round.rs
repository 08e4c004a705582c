/// Rounds `value` to `precision` decimal digits.
///
/// Ties round half away from zero (`f64::round`). Used for display text
/// only; matrix math always works on the unrounded values.
#[must_use]
pub fn round_to(value: f64, precision: i32) -> f64 {
    let factor = 10_f64.powi(precision);
    (value * factor).round() / factor
}
