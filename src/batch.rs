use crate::cli_api::{Engagement, FiringReport};
use crate::error::SolverError;
use rayon::prelude::*;

/// Solve many independent engagements in parallel
///
/// Results come back in input order. A rejected engagement does not stop the others.
pub fn solve_batch(engagements: &[Engagement]) -> Vec<Result<FiringReport, SolverError>> {
    log::debug!("solving {} engagements", engagements.len());
    engagements.par_iter().map(Engagement::solve).collect()
}

/// Parse a JSON array of engagements
pub fn parse_engagements(json: &str) -> Result<Vec<Engagement>, SolverError> {
    Ok(serde_json::from_str(json)?)
}

/// Counts of outcomes across a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub solved: usize,
    pub unconverged: usize,
    pub unreachable: usize,
    pub rejected: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[Result<FiringReport, SolverError>]) -> Self {
        let mut summary = Self::default();
        for result in results {
            match result {
                Ok(report) if !report.reachable => summary.unreachable += 1,
                Ok(report) if !report.converged => summary.unconverged += 1,
                Ok(_) => summary.solved += 1,
                Err(_) => summary.rejected += 1,
            }
        }
        summary
    }
}
