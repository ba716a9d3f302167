/// Physical and numerical constants used by the fire-control solver

/// Gravitational acceleration in m/s²
///
/// The fleet tables were computed with 9.81, not the standard 9.80665.
pub const G_ACCEL_MPS2: f64 = 9.81;

/// Floor applied to any horizontal projectile speed before it is used as a divisor
pub const MIN_HORIZONTAL_SPEED_MPS: f64 = 1e-6;

/// Default cap on fixed-point iterations
///
/// Physically reasonable engagements converge in 3-6 steps.
pub const DEFAULT_MAX_ITERATIONS: usize = 12;

/// Default convergence threshold on successive time-of-flight estimates (seconds)
pub const DEFAULT_TIME_TOLERANCE_S: f64 = 1e-3;

/// Muzzle speeds below this belong to torpedo-class launchers
///
/// The range equation is a poor model for these; elevation is advisory only.
pub const LOW_VELOCITY_ADVISORY_MPS: f64 = 50.0;
