//! folio-report CLI — report generation and artifact slot inspection.
//!
//! Commands:
//! - `generate` — run the pipeline: load artifact slots, build the
//!   executive summary, publish the HTML report and JSON export
//! - `status` — report each artifact slot's state without generating
//!
//! Absent or corrupt artifacts never fail a run; only an output-write
//! failure (or internal error) exits non-zero.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use folio_report_core::{probe_slot, run_report, ArtifactKind, ReportConfig, ReportRun, SlotStatus};

#[derive(Parser)]
#[command(
    name = "folio-report",
    about = "Portfolio analysis report generator — aggregates offline analysis artifacts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the report pair (HTML document + JSON export).
    Generate {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding the artifact slot files. Overrides the config file.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Directory to publish the report pair into. Overrides the config file.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Report the state of each artifact slot without generating.
    Status {
        /// Directory holding the artifact slot files.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            data_dir,
            output_dir,
        } => run_generate(config, data_dir, output_dir),
        Commands::Status { data_dir } => run_status(&data_dir),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

fn run_generate(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => ReportConfig::from_file(&path)?,
        None => ReportConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    let run = run_report(&config)?;
    print_summary(&run);
    Ok(())
}

fn print_summary(run: &ReportRun) {
    println!();
    println!("=== Report Generated ===");
    println!("Document:        {}", run.paths.document.display());
    println!("Export:          {}", run.paths.export.display());
    if let Some(best) = run.summary.best_model {
        println!("Best Model:      {best}");
    }
    if let Some(ret) = run.summary.expected_return_pct {
        println!("Expected Return: {ret:.1}%");
    }
    if let Some(sharpe) = run.summary.sharpe_ratio {
        println!("Sharpe Ratio:    {sharpe:.3}");
    }
    println!();
}

fn run_status(data_dir: &Path) -> Result<()> {
    println!("Artifact slots in {}:", data_dir.display());
    println!();
    println!("{:<24} {:<32} {}", "Slot", "File", "State");
    println!("{}", "-".repeat(70));

    for kind in ArtifactKind::ALL {
        let state = match probe_slot(data_dir, kind) {
            SlotStatus::Present => "present".to_string(),
            SlotStatus::Missing => "missing".to_string(),
            SlotStatus::Unusable(reason) => format!("unusable ({reason})"),
        };
        println!("{:<24} {:<32} {}", kind.label(), kind.file_name(), state);
    }

    Ok(())
}
