//! # Vector Fleet Solver
//!
//! Firing solutions for a gun on a moving ship against a moving target under
//! constant horizontal wind, using a flat-Earth, no-drag range model.

// Re-export the main types and functions
pub use angle_calculations::{max_range, solve_angles, AngleSolution};
pub use batch::{parse_engagements, solve_batch, BatchSummary};
pub use cli_api::{Engagement, FiringReport, Motion, OutputFormat};
pub use error::SolverError;
pub use intercept::{
    solve_fire, FiringParameters, FiringSolution, ReachableSolution, UnreachableSolution,
};
pub use kinematics::{heading_speed_to_velocity, KinematicState, Vector2};
pub use ships::ShipCatalog;

// Module declarations
pub mod angle_calculations;
pub mod batch;
pub mod cli_api;
pub mod constants;
mod error;
pub mod intercept;
pub mod kinematics;
mod ships;

#[cfg(test)]
mod proptest_angles;
#[cfg(test)]
mod proptest_intercept;
