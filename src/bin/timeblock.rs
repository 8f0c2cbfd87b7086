//! Command-line front end.
//!
//! # Usage
//!
//! ```bash
//! # per-student rows
//! timeblock students.csv
//!
//! # one legacy grid
//! timeblock --legacy dana --hours 4 dana.csv
//!
//! # settings from a file, overridden by flags
//! timeblock --config planner.toml --per-student --parallel students.csv
//! ```
//!
//! Exit status: 0 solved, 1 error, 2 infeasible, 3 time limit reached.
//! Log verbosity follows `RUST_LOG` (default: `info`).

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use u_timeblock::cp::BacktrackingSolver;
use u_timeblock::io::{parse_legacy_grid, read_student_rows, render_schedule};
use u_timeblock::model::StudentRequest;
use u_timeblock::planner::{PlanOutcome, Planner, PlannerConfig, SolveMode};

#[derive(Debug, Parser)]
#[command(name = "timeblock", about = "Allocate weekly time blocks to students")]
struct Args {
    /// Input CSV file.
    input: PathBuf,

    /// Planner configuration (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read INPUT as a legacy availability grid for this student.
    #[arg(long, value_name = "ID", requires = "hours")]
    legacy: Option<String>,

    /// Required hours for a legacy grid.
    #[arg(long)]
    hours: Option<i64>,

    /// Solve each student separately.
    #[arg(long)]
    per_student: bool,

    /// Solve students on all cores.
    #[arg(long)]
    parallel: bool,

    /// On infeasibility, name the students that cannot be scheduled.
    #[arg(long)]
    localize: bool,

    /// Solver time limit in milliseconds.
    #[arg(long)]
    time_limit_ms: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> u_timeblock::Result<ExitCode> {
    let mut config = match &args.config {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };
    if args.per_student {
        config.mode = SolveMode::PerStudent;
    }
    if args.parallel {
        config.parallel = true;
        config.solver.num_workers = std::thread::available_parallelism().map_or(1, |n| n.get());
    }
    if args.localize {
        config.localize_infeasibility = true;
    }
    if let Some(ms) = args.time_limit_ms {
        config.solver.time_limit_ms = ms;
    }

    let grid = config.compiler.grid;
    let requests: Vec<StudentRequest> = match (&args.legacy, args.hours) {
        (Some(id), Some(hours)) => {
            let text = std::fs::read_to_string(&args.input)?;
            let required = grid.units_for_hours(hours).ok_or_else(|| {
                u_timeblock::Error::Config(format!("--hours {hours} is out of range"))
            })?;
            vec![parse_legacy_grid(&text, id, required, &grid)?]
        }
        _ => read_student_rows(File::open(&args.input)?, &grid)?,
    };

    let planner = Planner::new(BacktrackingSolver::new(), config);
    Ok(match planner.plan(&requests)? {
        PlanOutcome::Solved(result) => {
            print!("{}", render_schedule(&result.schedule, &grid));
            for (id, points) in result.violations.iter() {
                let listed: Vec<String> = points
                    .iter()
                    .map(|(day, time)| {
                        let (h, m) = grid.dequantize(*time);
                        format!("{day} {h}:{m:02}")
                    })
                    .collect();
                println!("# {id} covers avoided times: {}", listed.join(", "));
            }
            ExitCode::SUCCESS
        }
        PlanOutcome::Infeasible(infeasibility) => {
            if infeasibility.students.is_empty() {
                println!("infeasible");
            } else {
                println!("infeasible: {}", infeasibility.students.join(", "));
            }
            ExitCode::from(2)
        }
        PlanOutcome::Unknown => {
            println!("unknown: time limit reached");
            ExitCode::from(3)
        }
    })
}
