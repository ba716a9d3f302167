use thiserror::Error;

/// Errors surfaced by the solver and its configuration layer.
///
/// Unreachable targets and non-convergence are not errors; they are encoded
/// in [`crate::FiringSolution`].
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("muzzle velocity must be positive (got {0} m/s)")]
    InvalidMuzzleVelocity(f64),

    #[error("iteration cap must be at least 1")]
    InvalidIterationCount,

    #[error("time tolerance must be positive and finite (got {0} s)")]
    InvalidTolerance(f64),

    #[error("gravitational acceleration must be positive and finite (got {0} m/s²)")]
    InvalidGravity(f64),

    #[error("unknown ship: {0}")]
    UnknownShip(String),

    #[error("ship catalog IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}
