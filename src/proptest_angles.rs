//! Property-based tests for the range-angle inversion.

use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::angle_calculations::{max_range, solve_angles};
use crate::constants::G_ACCEL_MPS2;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Both roots bracket 45° and sum to 90° for every reachable range.
    #[test]
    fn prop_roots_symmetric_about_45(
        v0 in 1.0f64..2000.0,
        fraction in 0.0f64..0.999,
    ) {
        let range = fraction * max_range(v0, G_ACCEL_MPS2);
        let solution = solve_angles(v0, range, G_ACCEL_MPS2);
        prop_assert!(solution.is_some(), "v0={} range={} should be reachable", v0, range);

        let solution = solution.unwrap();
        prop_assert!(solution.low >= 0.0 && solution.high <= FRAC_PI_2);
        prop_assert!(solution.low <= FRAC_PI_4 + 1e-12);
        prop_assert!(solution.high >= FRAC_PI_4 - 1e-12);
        prop_assert!((solution.low + solution.high - FRAC_PI_2).abs() < 1e-12);
    }

    /// Anything past v0²/g is out of reach.
    #[test]
    fn prop_beyond_max_range_unreachable(
        v0 in 1.0f64..2000.0,
        excess in 1.0001f64..100.0,
    ) {
        let range = excess * max_range(v0, G_ACCEL_MPS2);
        prop_assert!(solve_angles(v0, range, G_ACCEL_MPS2).is_none());
    }

    /// Feeding either root back through the range equation recovers the range.
    #[test]
    fn prop_roots_reproduce_range(
        v0 in 10.0f64..1500.0,
        fraction in 0.01f64..0.99,
        g in 1.0f64..25.0,
    ) {
        let range = fraction * max_range(v0, g);
        let solution = solve_angles(v0, range, g).unwrap();

        for theta in [solution.low, solution.high] {
            let r = v0 * v0 / g * (2.0 * theta).sin();
            prop_assert!((r - range).abs() <= 1e-9 * range.max(1.0), "r={} range={}", r, range);
        }
    }
}
