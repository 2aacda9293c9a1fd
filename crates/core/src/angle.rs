//! Circular heading arithmetic
//!
//! Headings are degrees in `[0, 360)`. Errors between headings are signed
//! shortest-path angular distances in `(-180, 180]`, so the controller
//! always turns the short way around (e.g. 350° → 10° is +20°, not -340°).

/// Wraps an angular difference to the signed shortest path.
///
/// The input is a raw difference of two headings in `[0, 360)`, so it lies
/// in `(-360, 360)` and a single correction step suffices.
pub fn wrap_180(diff: f32) -> f32 {
    if diff > 180.0 {
        diff - 360.0
    } else if diff < -180.0 {
        diff + 360.0
    } else {
        diff
    }
}

/// Wraps an angle into the canonical heading range `[0, 360)`.
pub fn wrap_360(angle: f32) -> f32 {
    let mut a = angle % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    a
}

/// Signed shortest-path error between a target and a measured heading.
///
/// Recomputed from a fresh sensor read every tick; the result is never
/// cached because the gyro is live.
pub fn heading_error(target: f32, measured: f32) -> f32 {
    wrap_180(target - measured)
}
