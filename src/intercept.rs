//! Fixed-point intercept solver.
//!
//! The range equation has no closed form against a moving target, so the
//! solver alternates between aiming at a fixed range and re-estimating the
//! range from the flight time that aim implies.

use crate::angle_calculations::{max_range, solve_angles, AngleSolution};
use crate::constants::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_TIME_TOLERANCE_S, G_ACCEL_MPS2, MIN_HORIZONTAL_SPEED_MPS,
};
use crate::error::SolverError;
use crate::kinematics::{bearing, unit_or_zero, KinematicState, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

/// Launcher and numerical settings for one solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiringParameters {
    pub muzzle_velocity: f64,  // m/s
    pub prefer_high_arc: bool,
    pub max_iterations: usize,
    pub time_tolerance: f64,   // seconds
    pub gravity: f64,          // m/s²
}

impl Default for FiringParameters {
    fn default() -> Self {
        Self {
            muzzle_velocity: 0.0,
            prefer_high_arc: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            time_tolerance: DEFAULT_TIME_TOLERANCE_S,
            gravity: G_ACCEL_MPS2,
        }
    }
}

impl FiringParameters {
    pub fn new(muzzle_velocity: f64) -> Self {
        Self {
            muzzle_velocity,
            ..Default::default()
        }
    }

    pub fn with_high_arc(mut self, prefer_high_arc: bool) -> Self {
        self.prefer_high_arc = prefer_high_arc;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_time_tolerance(mut self, time_tolerance: f64) -> Self {
        self.time_tolerance = time_tolerance;
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Reject settings the iteration cannot run with
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.muzzle_velocity.is_finite() && self.muzzle_velocity > 0.0) {
            return Err(SolverError::InvalidMuzzleVelocity(self.muzzle_velocity));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidIterationCount);
        }
        if !(self.time_tolerance.is_finite() && self.time_tolerance > 0.0) {
            return Err(SolverError::InvalidTolerance(self.time_tolerance));
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(SolverError::InvalidGravity(self.gravity));
        }
        Ok(())
    }
}

/// A usable aim. `converged == false` marks a non-verified estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReachableSolution {
    pub elevation: f64,         // radians
    pub azimuth: f64,           // radians, counterclockwise from +x
    pub time_of_flight: f64,    // seconds
    pub impact_point: Vector2,  // world frame
    pub predicted_target: Vector2,
    pub angles: AngleSolution,
    pub iterations: usize,
    pub converged: bool,
}

/// Diagnostics for a target beyond the launcher's ideal range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnreachableSolution {
    pub azimuth: f64,
    pub max_range: f64,
    pub required_range: f64,
    pub predicted_target: Vector2,
    pub iterations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FiringSolution {
    Reachable(ReachableSolution),
    Unreachable(UnreachableSolution),
}

impl FiringSolution {
    pub fn is_reachable(&self) -> bool {
        matches!(self, FiringSolution::Reachable(_))
    }

    pub fn azimuth(&self) -> f64 {
        match self {
            FiringSolution::Reachable(s) => s.azimuth,
            FiringSolution::Unreachable(s) => s.azimuth,
        }
    }

    pub fn iterations(&self) -> usize {
        match self {
            FiringSolution::Reachable(s) => s.iterations,
            FiringSolution::Unreachable(s) => s.iterations,
        }
    }

    pub fn predicted_target(&self) -> Vector2 {
        match self {
            FiringSolution::Reachable(s) => s.predicted_target,
            FiringSolution::Unreachable(s) => s.predicted_target,
        }
    }

    pub fn reachable(&self) -> Option<&ReachableSolution> {
        match self {
            FiringSolution::Reachable(s) => Some(s),
            FiringSolution::Unreachable(_) => None,
        }
    }
}

/// Solve for azimuth, elevation and time of flight against a moving target.
///
/// Own-ship and wind velocities both carry the shell during flight, so the aim
/// point is the predicted target pulled back by that drift.
pub fn solve_fire(
    own: &KinematicState,
    target: &KinematicState,
    wind: &Vector2,
    params: &FiringParameters,
) -> Result<FiringSolution, SolverError> {
    params.validate()?;

    let v0 = params.muzzle_velocity;
    let g = params.gravity;
    let drift_velocity = own.velocity + wind;

    // Seed with a 45° shot at the current straight-line range
    let initial_range = (target.position - own.position).norm();
    let mut t = initial_range / (v0 / SQRT_2).max(MIN_HORIZONTAL_SPEED_MPS);

    let mut last: Option<ReachableSolution> = None;

    for iteration in 1..=params.max_iterations {
        let predicted_target = target.position_at(t);
        let aim_point = predicted_target - drift_velocity * t;
        let displacement = aim_point - own.position;
        let range = displacement.norm();
        let azimuth = bearing(&displacement);

        let angles = match solve_angles(v0, range, g) {
            Some(angles) => angles,
            None => {
                let max_range_m = max_range(v0, g);
                log::info!(
                    "target unreachable at iteration {}: need {:.1} m, max {:.1} m",
                    iteration, range, max_range_m
                );
                return Ok(FiringSolution::Unreachable(UnreachableSolution {
                    azimuth,
                    max_range: max_range_m,
                    required_range: range,
                    predicted_target,
                    iterations: iteration,
                }));
            }
        };

        let elevation = angles.select(params.prefer_high_arc);
        let mut horizontal_speed = v0 * elevation.cos();
        if horizontal_speed.abs() < MIN_HORIZONTAL_SPEED_MPS {
            horizontal_speed = MIN_HORIZONTAL_SPEED_MPS;
        }
        let t_new = range / horizontal_speed;

        log::debug!(
            "iteration {}: t={:.6} s, range={:.3} m, elevation={:.4}°, t_new={:.6} s",
            iteration, t, range, elevation.to_degrees(), t_new
        );

        // Aim frame is relative to the drifting shell; add the drift back for the world frame
        let impact_point =
            own.position + unit_or_zero(&displacement) * range + drift_velocity * t_new;

        let converged = (t_new - t).abs() < params.time_tolerance;
        let estimate = ReachableSolution {
            elevation,
            azimuth,
            time_of_flight: t_new,
            impact_point,
            predicted_target,
            angles,
            iterations: iteration,
            converged,
        };

        if converged {
            log::debug!("converged after {} iterations", iteration);
            return Ok(FiringSolution::Reachable(estimate));
        }

        last = Some(estimate);
        t = t_new;
    }

    match last {
        Some(estimate) => {
            log::warn!(
                "time of flight did not converge within {} iterations, returning last estimate",
                params.max_iterations
            );
            Ok(FiringSolution::Reachable(ReachableSolution {
                iterations: params.max_iterations,
                ..estimate
            }))
        }
        // validate() guarantees at least one iteration, each of which returns or sets `last`
        None => Err(SolverError::InvalidIterationCount),
    }
}
