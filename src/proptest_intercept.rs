//! Property-based tests for the intercept solver.
//!
//! Gun-class launchers against ship-speed targets, where the fixed point is
//! expected to converge.

use proptest::prelude::*;
use std::f64::consts::PI;

use crate::angle_calculations::solve_angles;
use crate::constants::G_ACCEL_MPS2;
use crate::intercept::{solve_fire, FiringParameters, FiringSolution, ReachableSolution};
use crate::kinematics::{heading_speed_to_velocity, KinematicState, Vector2};

fn converged(solution: FiringSolution) -> Result<ReachableSolution, TestCaseError> {
    match solution {
        FiringSolution::Reachable(s) if s.converged => Ok(s),
        other => Err(TestCaseError::fail(format!("expected converged solution, got {:?}", other))),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// With nothing moving the aim is the plain bearing and the low root.
    #[test]
    fn prop_stationary_aim_is_bearing(
        v0 in 400.0f64..1000.0,
        own_x in -5000.0f64..5000.0,
        own_y in -5000.0f64..5000.0,
        range in 1000.0f64..15000.0,
        bearing_deg in -180.0f64..180.0,
    ) {
        let own = KinematicState::stationary(Vector2::new(own_x, own_y));
        let offset = heading_speed_to_velocity(range, bearing_deg);
        let target = KinematicState::stationary(own.position + offset);
        let params = FiringParameters::new(v0);

        let solution = converged(solve_fire(&own, &target, &Vector2::zeros(), &params).unwrap())?;
        let delta = target.position - own.position;

        prop_assert_eq!(solution.azimuth, delta.y.atan2(delta.x));
        let expected = solve_angles(v0, delta.norm(), G_ACCEL_MPS2).unwrap().low;
        prop_assert_eq!(solution.elevation, expected);
    }

    /// Re-aiming at the converged aim point as a fixed target reproduces the aim.
    #[test]
    fn prop_solution_is_a_fixed_point(
        v0 in 700.0f64..1000.0,
        range in 2000.0f64..20000.0,
        bearing_deg in -180.0f64..180.0,
        own_speed in 0.0f64..20.0,
        own_heading in 0.0f64..360.0,
        target_speed in 0.0f64..20.0,
        target_heading in 0.0f64..360.0,
        wind_speed in 0.0f64..15.0,
        wind_heading in 0.0f64..360.0,
    ) {
        let own_velocity = heading_speed_to_velocity(own_speed, own_heading);
        let own = KinematicState::new(Vector2::zeros(), own_velocity);
        let target = KinematicState::new(
            heading_speed_to_velocity(range, bearing_deg),
            heading_speed_to_velocity(target_speed, target_heading),
        );
        let wind = heading_speed_to_velocity(wind_speed, wind_heading);
        let params = FiringParameters::new(v0).with_max_iterations(50);

        let first = converged(solve_fire(&own, &target, &wind, &params).unwrap())?;

        let aim_point = first.predicted_target - (own.velocity + wind) * first.time_of_flight;
        let fixed = KinematicState::stationary(aim_point);
        let parked = KinematicState::stationary(own.position);
        let second = converged(solve_fire(&parked, &fixed, &Vector2::zeros(), &params).unwrap())?;

        let azimuth_error = (first.azimuth - second.azimuth + PI).rem_euclid(2.0 * PI) - PI;
        prop_assert!(azimuth_error.abs() < 1e-4);
        prop_assert!((first.elevation - second.elevation).abs() < 1e-4);
    }

    /// The world-frame impact point meets the target within the drift over one tolerance step.
    #[test]
    fn prop_impact_meets_target(
        v0 in 700.0f64..1000.0,
        range in 2000.0f64..20000.0,
        bearing_deg in -180.0f64..180.0,
        own_speed in 0.0f64..20.0,
        own_heading in 0.0f64..360.0,
        target_speed in 0.0f64..20.0,
        target_heading in 0.0f64..360.0,
        wind_speed in 0.0f64..15.0,
        wind_heading in 0.0f64..360.0,
    ) {
        let own_velocity = heading_speed_to_velocity(own_speed, own_heading);
        let own = KinematicState::new(Vector2::zeros(), own_velocity);
        let target = KinematicState::new(
            heading_speed_to_velocity(range, bearing_deg),
            heading_speed_to_velocity(target_speed, target_heading),
        );
        let wind = heading_speed_to_velocity(wind_speed, wind_heading);
        let params = FiringParameters::new(v0).with_max_iterations(50);

        let solution = converged(solve_fire(&own, &target, &wind, &params).unwrap())?;
        let miss = (solution.impact_point - target.position_at(solution.time_of_flight)).norm();

        // Relative drift is at most 55 m/s; time error is below the tolerance
        prop_assert!(miss < 55.0 * params.time_tolerance, "miss {} m", miss);
    }
}
