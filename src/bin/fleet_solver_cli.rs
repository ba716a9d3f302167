use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::PathBuf;
use vector_fleet_solver::angle_calculations::is_max_range_shot;
use vector_fleet_solver::constants::{
    DEFAULT_MAX_ITERATIONS, DEFAULT_TIME_TOLERANCE_S, G_ACCEL_MPS2,
};
use vector_fleet_solver::{
    max_range, parse_engagements, solve_angles, solve_batch, BatchSummary, Engagement,
    FiringReport, Motion, ShipCatalog,
};

#[derive(Parser)]
#[command(name = "fleet-solver")]
#[command(version)]
#[command(about = "Firing solutions for moving ships under constant wind drift", long_about = None)]
struct Cli {
    /// JSON ship catalog ({"Name": muzzle_velocity_mps, ...}) replacing the stock fleet
    #[arg(long, global = true)]
    ships: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single engagement
    Solve {
        /// Firing ship, looks up muzzle velocity in the catalog
        #[arg(
            short = 's',
            long,
            conflicts_with = "velocity",
            required_unless_present = "velocity"
        )]
        ship: Option<String>,

        /// Muzzle velocity (m/s)
        #[arg(short = 'v', long)]
        velocity: Option<f64>,

        /// Own ship x position (m)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        own_x: f64,

        /// Own ship y position (m)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        own_y: f64,

        /// Target x position (m)
        #[arg(long, allow_hyphen_values = true)]
        target_x: f64,

        /// Target y position (m)
        #[arg(long, allow_hyphen_values = true)]
        target_y: f64,

        /// Own speed (m/s)
        #[arg(long, default_value = "0.0")]
        own_speed: f64,

        /// Own heading (degrees, 0 = East, 90 = North)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        own_heading: f64,

        /// Target speed (m/s)
        #[arg(long, default_value = "0.0")]
        target_speed: f64,

        /// Target heading (degrees, 0 = East, 90 = North)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        target_heading: f64,

        /// Wind speed (m/s)
        #[arg(long, default_value = "0.0")]
        wind_speed: f64,

        /// Wind heading (degrees, direction the wind blows TOWARD)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        wind_heading: f64,

        /// Prefer the high (lofted) arc
        #[arg(long)]
        high_arc: bool,

        /// Maximum fixed-point iterations
        #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,

        /// Time-of-flight convergence tolerance (s)
        #[arg(long, default_value_t = DEFAULT_TIME_TOLERANCE_S)]
        tolerance: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Elevation angles for a fixed range
    Angles {
        /// Muzzle velocity (m/s)
        #[arg(short = 'v', long)]
        velocity: f64,

        /// Horizontal range (m)
        #[arg(short = 'r', long)]
        range: f64,
    },

    /// List the ship catalog
    Ships,

    /// Solve a JSON array of engagements in parallel
    Batch {
        /// Input file
        #[arg(short = 'i', long)]
        input: PathBuf,

        /// Output format
        #[arg(short = 'o', long, default_value = "json")]
        output: OutputFormat,
    },

    /// Display model information
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl From<OutputFormat> for vector_fleet_solver::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => Self::Table,
            OutputFormat::Json => Self::Json,
            OutputFormat::Csv => Self::Csv,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let catalog = match &cli.ships {
        Some(path) => ShipCatalog::load(path)?,
        None => ShipCatalog::default(),
    };

    match cli.command {
        Commands::Solve {
            ship,
            velocity,
            own_x,
            own_y,
            target_x,
            target_y,
            own_speed,
            own_heading,
            target_speed,
            target_heading,
            wind_speed,
            wind_heading,
            high_arc,
            max_iterations,
            tolerance,
            output,
        } => {
            let (name, muzzle_velocity) = match (ship, velocity) {
                (Some(ship), _) => {
                    let v0 = catalog.muzzle_velocity(&ship)?;
                    (Some(ship), v0)
                }
                (None, Some(v0)) => (None, v0),
                (None, None) => return Err("either --ship or --velocity is required".into()),
            };
            log::info!("solving with muzzle velocity {} m/s", muzzle_velocity);

            let engagement = Engagement {
                name,
                own_motion: Motion::new(own_speed, own_heading),
                target_motion: Motion::new(target_speed, target_heading),
                wind: Motion::new(wind_speed, wind_heading),
                prefer_high_arc: high_arc,
                max_iterations: Some(max_iterations),
                time_tolerance: Some(tolerance),
                ..Engagement::new(muzzle_velocity, [own_x, own_y], [target_x, target_y])
            };

            let report = engagement.solve()?;
            display_report(&report, output.into())?;
        },

        Commands::Angles { velocity, range } => {
            if velocity <= 0.0 {
                let message = format!("muzzle velocity must be positive (got {} m/s)", velocity);
                return Err(message.into());
            }
            match solve_angles(velocity, range, G_ACCEL_MPS2) {
                Some(angles) => {
                    println!("Low arc:  {:.3}°", angles.low_deg());
                    println!("High arc: {:.3}°", angles.high_deg());
                    if is_max_range_shot(&angles, 1e-6) {
                        println!("At maximum range: both arcs meet at 45°.");
                    }
                },
                None => {
                    println!("Range {:.1} m is out of reach.", range);
                    println!("Max ideal range: {:.1} m", max_range(velocity, G_ACCEL_MPS2));
                },
            }
        },

        Commands::Ships => {
            println!("Ships available:");
            for (i, (name, v0)) in catalog.iter().enumerate() {
                println!("  {}) {} (v0 = {} m/s)", i + 1, name, v0);
            }
        },

        Commands::Batch { input, output } => {
            let contents = std::fs::read_to_string(&input)?;
            let engagements = parse_engagements(&contents)?;
            let results = solve_batch(&engagements);

            let summary = BatchSummary::from_results(&results);
            log::info!("batch summary: {:?}", summary);

            display_batch(&results, output.into())?;
        },

        Commands::Info => {
            println!("╔════════════════════════════════════════════════╗");
            println!("║            VECTOR FLEET SOLVER                 ║");
            println!("╠════════════════════════════════════════════════╣");
            println!("║ Iterative fire-control for moving ships.       ║");
            println!("╠════════════════════════════════════════════════╣");
            println!("║ Model:                                         ║");
            println!("║ • Flat Earth, level launch and target          ║");
            println!("║ • No drag, wind as constant horizontal drift   ║");
            println!("║ • g = {:.2} m/s²                                ║", G_ACCEL_MPS2);
            println!("║ • Headings: 0° = East, 90° = North             ║");
            println!("╚════════════════════════════════════════════════╝");
        },
    }

    Ok(())
}

fn display_report(
    report: &FiringReport,
    format: vector_fleet_solver::OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        vector_fleet_solver::OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        },

        vector_fleet_solver::OutputFormat::Csv => {
            println!("{}", FiringReport::csv_header());
            println!("{}", report.to_csv_row());
        },

        vector_fleet_solver::OutputFormat::Table => {
            print!("{}", report.to_table());
            println!();
            println!(
                "NOTE: Vertical height differences and drag are ignored; \
                 wind is constant horizontal drift."
            );
            if report.is_low_velocity() {
                println!(
                    "Low-velocity launcher: the range equation may not apply; \
                     consider 0° elevation and pure intercept timing."
                );
            }
        },
    }

    Ok(())
}

fn display_batch(
    results: &[Result<FiringReport, vector_fleet_solver::SolverError>],
    format: vector_fleet_solver::OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        vector_fleet_solver::OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = results
                .iter()
                .map(|result| match result {
                    Ok(report) => serde_json::to_value(report),
                    Err(e) => Ok(serde_json::json!({ "error": e.to_string() })),
                })
                .collect::<Result<_, _>>()?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        },

        vector_fleet_solver::OutputFormat::Csv => {
            println!("{},error", FiringReport::csv_header());
            for result in results {
                match result {
                    Ok(report) => println!("{},", report.to_csv_row()),
                    Err(e) => println!("{}", FiringReport::csv_error_row(&e.to_string())),
                }
            }
        },

        vector_fleet_solver::OutputFormat::Table => {
            for (i, result) in results.iter().enumerate() {
                match result {
                    Ok(report) => {
                        let label = report.name.as_deref().map(|n| format!(" ({})", n));
                        println!("Engagement {}{}", i + 1, label.unwrap_or_default());
                        print!("{}", report.to_table());
                    },
                    Err(e) => println!("Engagement {}: rejected: {}", i + 1, e),
                }
            }
        },
    }

    Ok(())
}
