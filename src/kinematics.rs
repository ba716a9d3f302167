use nalgebra::Vector2 as NVector2;
use serde::{Deserialize, Serialize};

/// Planar vector in meters or meters/second (x = East, y = North)
pub type Vector2 = NVector2<f64>;

/// Instantaneous motion of a platform, held constant for the duration of flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    pub position: Vector2,
    pub velocity: Vector2,
}

impl KinematicState {
    pub fn new(position: Vector2, velocity: Vector2) -> Self {
        Self { position, velocity }
    }

    /// A platform sitting still at `position`
    pub fn stationary(position: Vector2) -> Self {
        Self {
            position,
            velocity: Vector2::zeros(),
        }
    }

    /// Where the platform will be after `t` seconds of straight-line travel
    pub fn position_at(&self, t: f64) -> Vector2 {
        self.position + self.velocity * t
    }
}

/// Convert a speed and heading into Cartesian velocity components.
///
/// Heading is in degrees: 0° = +x (East), 90° = +y (North), increasing
/// counterclockwise. For wind the heading is the direction it blows TOWARD.
pub fn heading_speed_to_velocity(speed_mps: f64, heading_deg: f64) -> Vector2 {
    let heading_rad = heading_deg.to_radians();
    Vector2::new(speed_mps * heading_rad.cos(), speed_mps * heading_rad.sin())
}

/// Unit vector along `v`, or the zero vector when `v` has no length
pub fn unit_or_zero(v: &Vector2) -> Vector2 {
    let n = v.norm();
    if n == 0.0 {
        Vector2::zeros()
    } else {
        v / n
    }
}

/// In-plane bearing of `v` in radians, measured counterclockwise from +x
pub fn bearing(v: &Vector2) -> f64 {
    v.y.atan2(v.x)
}
