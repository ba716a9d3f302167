use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI};

/// Elevation roots of the ideal range equation for one range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSolution {
    /// Flat, fast arc in radians, in [0, π/4]
    pub low: f64,
    /// Lofted, slow arc in radians, in [π/4, π/2]
    pub high: f64,
}

impl AngleSolution {
    /// Pick the arc the gunner asked for
    pub fn select(&self, prefer_high_arc: bool) -> f64 {
        if prefer_high_arc {
            self.high
        } else {
            self.low
        }
    }

    pub fn low_deg(&self) -> f64 {
        self.low.to_degrees()
    }

    pub fn high_deg(&self) -> f64 {
        self.high.to_degrees()
    }
}

/// Maximum ideal range (at 45° elevation) for a muzzle speed
pub fn max_range(v0: f64, g: f64) -> f64 {
    v0 * v0 / g
}

/// Invert R = (v0²/g)·sin(2θ) for θ.
///
/// Returns `None` when `range_m` exceeds the maximum range for `v0`.
pub fn solve_angles(v0: f64, range_m: f64, g: f64) -> Option<AngleSolution> {
    // Domain check on the range itself; g·R/v0² can round past 1 at R = v0²/g
    if !(range_m.abs() <= max_range(v0, g)) {
        return None;
    }

    // Clamp only absorbs rounding at the domain edge
    let arg = g * range_m / (v0 * v0);
    let two_theta = arg.clamp(-1.0, 1.0).asin();
    Some(AngleSolution {
        low: 0.5 * two_theta,
        high: 0.5 * (PI - two_theta),
    })
}

/// True when both roots coincide at 45°
pub fn is_max_range_shot(solution: &AngleSolution, tolerance: f64) -> bool {
    (solution.low - FRAC_PI_4).abs() < tolerance && (solution.high - FRAC_PI_4).abs() < tolerance
}
