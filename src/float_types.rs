// Our Real scalar type. Sign geometry is always built in millimetres at f64.
pub type Real = f64;

/// Tolerance for comparing coordinates and volumes produced by the kernel.
pub const EPSILON: Real = 1e-9;

/// Tolerance for rejecting degenerate 2D profile area (mm²).
pub const AREA_EPSILON: Real = 1e-6;

// Pi
/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

// Frac Pi 2
/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

/// Returns `true` when `value` is finite and lies in `lo..=hi`.
#[inline]
pub fn in_range(value: Real, (lo, hi): (Real, Real)) -> bool {
    value.is_finite() && value >= lo && value <= hi
}
