// CLI API module - boundary types in degrees/headings and report rendering
use crate::constants::LOW_VELOCITY_ADVISORY_MPS;
use crate::error::SolverError;
use crate::intercept::{solve_fire, FiringParameters, FiringSolution};
use crate::kinematics::{heading_speed_to_velocity, KinematicState, Vector2};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Write;

// Output format for results
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

// Platform motion as entered by an operator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Motion {
    pub speed: f64,    // m/s
    pub heading: f64,  // degrees, 0 = East, 90 = North
}

impl Motion {
    pub fn new(speed: f64, heading: f64) -> Self {
        Self { speed, heading }
    }

    pub fn velocity(&self) -> Vector2 {
        heading_speed_to_velocity(self.speed, self.heading)
    }
}

/// One engagement as the operator describes it.
///
/// Everything except the target position and muzzle velocity defaults to
/// zero, which makes JSON batch files terse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default)]
    pub name: Option<String>,
    pub muzzle_velocity: f64,    // m/s
    #[serde(default)]
    pub own_position: [f64; 2],  // meters
    pub target_position: [f64; 2],
    #[serde(default)]
    pub own_motion: Motion,
    #[serde(default)]
    pub target_motion: Motion,
    #[serde(default)]
    pub wind: Motion,            // heading is where the wind blows TOWARD
    #[serde(default)]
    pub prefer_high_arc: bool,
    #[serde(default)]
    pub max_iterations: Option<usize>,
    #[serde(default)]
    pub time_tolerance: Option<f64>,
}

impl Engagement {
    pub fn new(muzzle_velocity: f64, own_position: [f64; 2], target_position: [f64; 2]) -> Self {
        Self {
            name: None,
            muzzle_velocity,
            own_position,
            target_position,
            own_motion: Motion::default(),
            target_motion: Motion::default(),
            wind: Motion::default(),
            prefer_high_arc: false,
            max_iterations: None,
            time_tolerance: None,
        }
    }

    pub fn own_state(&self) -> KinematicState {
        KinematicState::new(Vector2::from(self.own_position), self.own_motion.velocity())
    }

    pub fn target_state(&self) -> KinematicState {
        KinematicState::new(Vector2::from(self.target_position), self.target_motion.velocity())
    }

    pub fn parameters(&self) -> FiringParameters {
        let mut params =
            FiringParameters::new(self.muzzle_velocity).with_high_arc(self.prefer_high_arc);
        if let Some(max_iterations) = self.max_iterations {
            params = params.with_max_iterations(max_iterations);
        }
        if let Some(time_tolerance) = self.time_tolerance {
            params = params.with_time_tolerance(time_tolerance);
        }
        params
    }

    pub fn solve(&self) -> Result<FiringReport, SolverError> {
        let solution = solve_fire(
            &self.own_state(),
            &self.target_state(),
            &self.wind.velocity(),
            &self.parameters(),
        )?;
        Ok(FiringReport::from_solution(self.name.clone(), self.muzzle_velocity, &solution))
    }
}

/// Operator-facing view of a [`FiringSolution`]: degrees, seconds, meters.
///
/// Fields that only make sense for one outcome are `None` for the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiringReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub reachable: bool,
    pub converged: bool,
    pub muzzle_velocity: f64,
    pub azimuth_deg: f64,
    pub elevation_deg: Option<f64>,
    pub low_high_deg: Option<(f64, f64)>,
    pub time_of_flight_s: Option<f64>,
    pub impact_point: Option<[f64; 2]>,
    pub predicted_target: [f64; 2],
    pub max_range_m: Option<f64>,
    pub iterations: usize,
}

impl FiringReport {
    pub fn from_solution(
        name: Option<String>,
        muzzle_velocity: f64,
        solution: &FiringSolution,
    ) -> Self {
        let predicted = solution.predicted_target();
        let predicted_target = [predicted.x, predicted.y];

        match solution {
            FiringSolution::Reachable(s) => Self {
                name,
                reachable: true,
                converged: s.converged,
                muzzle_velocity,
                azimuth_deg: s.azimuth.to_degrees(),
                elevation_deg: Some(s.elevation.to_degrees()),
                low_high_deg: Some((s.angles.low_deg(), s.angles.high_deg())),
                time_of_flight_s: Some(s.time_of_flight),
                impact_point: Some([s.impact_point.x, s.impact_point.y]),
                predicted_target,
                max_range_m: None,
                iterations: s.iterations,
            },
            FiringSolution::Unreachable(u) => Self {
                name,
                reachable: false,
                converged: false,
                muzzle_velocity,
                azimuth_deg: u.azimuth.to_degrees(),
                elevation_deg: None,
                low_high_deg: None,
                time_of_flight_s: None,
                impact_point: None,
                predicted_target,
                max_range_m: Some(u.max_range),
                iterations: u.iterations,
            },
        }
    }

    /// Torpedo-class launchers should ignore elevation and rely on intercept timing
    pub fn is_low_velocity(&self) -> bool {
        self.muzzle_velocity < LOW_VELOCITY_ADVISORY_MPS
    }

    pub fn to_table(&self) -> String {
        let mut rows = Vec::new();

        if !self.reachable {
            rows.push("Target is out of range for this muzzle velocity".to_string());
            if let Some(max_range) = self.max_range_m {
                rows.push(format!("Max ideal range:   {:>12.1} m", max_range));
            }
            rows.push(format!("Suggested azimuth: {:>12.2}°", self.azimuth_deg));
        } else {
            if let Some(elevation) = self.elevation_deg {
                rows.push(format!("Elevation:         {:>12.2}°", elevation));
            }
            if let Some((low, high)) = self.low_high_deg {
                rows.push(format!("Low/High options:  {:>6.2}° / {:>6.2}°", low, high));
            }
            rows.push(format!("Azimuth:           {:>12.2}°", self.azimuth_deg));
            if let Some(time) = self.time_of_flight_s {
                rows.push(format!("Time of flight:    {:>12.2} s", time));
            }
            if let Some([x, y]) = self.impact_point {
                rows.push(format!("Impact point:      ({:.2}, {:.2}) m", x, y));
            }
        }
        rows.push(format!(
            "Predicted target:  ({:.2}, {:.2}) m",
            self.predicted_target[0], self.predicted_target[1]
        ));
        rows.push(format!("Iterations:        {:>12}", self.iterations));

        // Box grows with the widest row so far-off coordinates stay inside it
        let width = rows
            .iter()
            .map(|row| row.chars().count())
            .fold(TABLE_MIN_WIDTH, usize::max);
        let rule = "═".repeat(width + 2);

        let mut out = String::new();
        let _ = writeln!(out, "╔{}╗", rule);
        let _ = writeln!(out, "║ {:^width$} ║", "FIRING SOLUTION", width = width);
        let _ = writeln!(out, "╠{}╣", rule);
        for row in &rows {
            let _ = writeln!(out, "║ {:<width$} ║", row, width = width);
        }
        let _ = writeln!(out, "╚{}╝", rule);

        if self.reachable && !self.converged {
            let _ = writeln!(
                out,
                "WARNING: time of flight did not converge; treat this solution as low confidence."
            );
        }
        out
    }

    pub fn csv_header() -> &'static str {
        "name,reachable,converged,azimuth_deg,elevation_deg,low_deg,high_deg,time_s,\
         impact_x,impact_y,target_x,target_y,max_range_m,iterations"
    }

    pub fn to_csv_row(&self) -> String {
        fn opt(v: Option<f64>) -> String {
            v.map(|v| format!("{:.4}", v)).unwrap_or_default()
        }

        format!(
            "{},{},{},{:.4},{},{},{},{},{},{},{:.4},{:.4},{},{}",
            csv_field(self.name.as_deref().unwrap_or("")),
            self.reachable,
            self.converged,
            self.azimuth_deg,
            opt(self.elevation_deg),
            opt(self.low_high_deg.map(|(low, _)| low)),
            opt(self.low_high_deg.map(|(_, high)| high)),
            opt(self.time_of_flight_s),
            opt(self.impact_point.map(|p| p[0])),
            opt(self.impact_point.map(|p| p[1])),
            self.predicted_target[0],
            self.predicted_target[1],
            opt(self.max_range_m),
            self.iterations,
        )
    }

    /// Row for a rejected engagement in batch CSV output: every report
    /// column empty, followed by the error message in a trailing column.
    pub fn csv_error_row(message: &str) -> String {
        let columns = Self::csv_header().split(',').count();
        format!("{}{}", ",".repeat(columns), csv_field(message))
    }
}

/// Inner width of the report box before any row widens it
const TABLE_MIN_WIDTH: usize = 46;

/// Quote a CSV field when it holds a delimiter, a quote or a line break
pub fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
