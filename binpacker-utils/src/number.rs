/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// `part / whole` as a percentage rounded to two decimal places.
///
/// A zero `whole` yields `0.0`.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64 * 100.0, 2)
}
