//! # boq CLI
//!
//! Command-line front end for `boq_core`: create a project file, print its
//! estimate, or evaluate a dimension expression.
//!
//! ```text
//! boq init house.boq.json --floors 2 --foundation rcc --columns 8 --ext "12+12+10+10"
//! boq estimate house.boq.json
//! boq estimate house.boq.json --floor "First Floor" --json
//! boq eval "10+5*2"
//! ```
//!
//! Set `RUST_LOG=boq_core=debug` to see the calculation trace.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use boq_core::boq::Phase;
use boq_core::expression::{evaluate, Expression};
use boq_core::project::{EstimateReport, Project};
use boq_core::setup::{ColumnGroup, ColumnGroupKind, FoundationType, GlobalParams};
use boq_core::units::{CubicMeters, Meters, SqMeters};
use boq_core::{load_project, save_project, CalcError, CalcResult};

#[derive(Parser, Debug)]
#[command(name = "boq")]
#[command(about = "Bill of quantities estimator for small buildings")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the estimate of a project file
    Estimate {
        /// Path to .boq.json file
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Only report this floor
        #[arg(long, value_name = "NAME")]
        floor: Option<String>,
    },

    /// Create a project file from a few setup values
    Init {
        /// Path of the new .boq.json file
        file: PathBuf,

        /// Number of floors
        #[arg(long, default_value_t = 1)]
        floors: usize,

        #[arg(long, value_enum, default_value_t = Foundation::Rr)]
        foundation: Foundation,

        /// Exterior wall length (expression)
        #[arg(long = "ext", value_name = "EXPR", default_value = "")]
        ext_len: String,

        /// Interior wall length (expression)
        #[arg(long = "int", value_name = "EXPR", default_value = "")]
        int_len: String,

        /// Concealed columns, sized for the floor count
        #[arg(long, default_value_t = 0)]
        columns: u32,

        #[arg(long, default_value = "")]
        client: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Evaluate a dimension expression
    Eval {
        expr: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Foundation {
    Rr,
    Rcc,
}

impl From<Foundation> for FoundationType {
    fn from(value: Foundation) -> Self {
        match value {
            Foundation::Rr => FoundationType::RandomRubble,
            Foundation::Rcc => FoundationType::Rcc,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> CalcResult<()> {
    match command {
        Command::Estimate { file, json, floor } => estimate(&file, json, floor.as_deref()),
        Command::Init {
            file,
            floors,
            foundation,
            ext_len,
            int_len,
            columns,
            client,
            force,
        } => {
            if file.exists() && !force {
                return Err(CalcError::file_error(
                    "create project",
                    file.display().to_string(),
                    "file exists (use --force to overwrite)",
                ));
            }
            let mut setup = GlobalParams {
                ext_len: Expression::new(ext_len),
                int_len: Expression::new(int_len),
                foundation_type: foundation.into(),
                ..Default::default()
            };
            if columns > 0 {
                setup.column_groups.push(ColumnGroup::new(ColumnGroupKind::Concealed, f64::from(columns), 1));
            }
            // resizes the group to the suggestion for this many floors
            setup.set_floor_count(floors);
            let job_id = file
                .file_stem()
                .map(|s| s.to_string_lossy().trim_end_matches(".boq").to_string())
                .unwrap_or_default();
            let project = Project::from_setup("", job_id, client, setup);
            save_project(&project, &file)?;
            println!("Created {} ({} floor(s))", file.display(), project.floors.len());
            Ok(())
        }
        Command::Eval { expr } => {
            println!("{}", evaluate(&expr));
            Ok(())
        }
    }
}

fn estimate(path: &Path, json: bool, floor: Option<&str>) -> CalcResult<()> {
    let project = load_project(path)?;
    let report = match floor {
        Some(name) => project.estimate_floor(name)?,
        None => project.estimate(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

const RULE: &str = "═══════════════════════════════════════════════════════";

fn print_report(report: &EstimateReport) {
    println!("{RULE}");
    println!("  ESTIMATE {}  {}", report.job_id, report.client);
    println!("  Foundation: {}", report.foundation);
    println!("{RULE}");
    println!();

    println!("Sub-structure (along {}):", Meters(report.substructure.total_length));
    for (name, total) in report.substructure.totals() {
        println!("  {:<20} {:>12.2}", name, total);
    }
    println!();

    for floor in &report.floors {
        println!("{}:", floor.floor_name);
        println!("  Net masonry volume  {}", CubicMeters(floor.volume.net));
        println!("  Net plaster area    {}", SqMeters(floor.area.net));
        println!("  Carpet area         {}", SqMeters(floor.carpet.net));
        println!("  Wall length         {}", Meters(floor.total_wall_length));
        println!("  Slab concrete       {}", CubicMeters(floor.slab.total_concrete));
        println!("  Parapet volume      {}", CubicMeters(floor.slab.parapet_volume));
        for advisory in &floor.advisories {
            println!("  [WARN] {}", advisory.message());
        }
        println!();
    }

    if !report.bill.sections.is_empty() {
        println!("Bill of quantities:");
        for phase in [Phase::SubStructure, Phase::SuperStructure, Phase::Finishing] {
            for section in report.bill.sections_in(phase) {
                println!("  {:>2}. {:<40} {:>10.2} {}", section.number, section.title, section.total, section.unit);
            }
        }
        println!();
    }

    let t = &report.totals;
    println!("{RULE}");
    println!(
        "  Masonry {} | Plaster {} | Carpet {}",
        CubicMeters(t.masonry_volume),
        SqMeters(t.plaster_area),
        SqMeters(t.carpet_area)
    );
    println!(
        "  Slab concrete {} | Frame concrete {} | Columns {}",
        CubicMeters(t.slab_concrete),
        CubicMeters(t.frame_concrete),
        t.column_count
    );
    println!("{RULE}");
}
