use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use employee_pipeline::config::Config;
use employee_pipeline::domain::Table;
use employee_pipeline::generate::generate;
use employee_pipeline::pipeline::{CleaningPipeline, PipelineReport};
use employee_pipeline::{logging, metrics, profile, storage};

#[derive(Parser)]
#[command(name = "employee_pipeline")]
#[command(about = "Generate, clean and profile a synthetic employee dataset")]
#[command(version)]
struct Cli {
    /// TOML config file (defaults to $EMPLOYEE_PIPELINE_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write Prometheus metrics text here after the command finishes
    #[arg(long, global = true)]
    metrics_file: Option<PathBuf>,

    /// Directory for JSON log files
    #[arg(long, global = true, default_value = "logs")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a raw synthetic dataset and save it as CSV
    Generate {
        #[arg(long, default_value = "raw_employee_dataset.csv")]
        output: PathBuf,
    },
    /// Clean a raw CSV dataset
    Clean {
        #[arg(long)]
        input: PathBuf,
        /// Output CSV (defaults to the configured output path)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate a dataset in memory, clean it and save the result
    Run {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print descriptive statistics of a cleaned CSV dataset
    Profile {
        /// Cleaned CSV (defaults to the configured output path)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn clean_and_save(config: &Config, table: Table, output: &Path) -> Result<PipelineReport> {
    let pipeline = CleaningPipeline::new(&config.pipeline);
    let result = pipeline.run(table).context("cleaning pipeline failed")?;
    storage::write_cleaned(output, &result.table)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(result.report)
}

fn print_report(report: &PipelineReport, output: &Path) {
    println!("\n📊 Cleaning results:");
    println!("   Rows in: {}", report.rows_in);
    println!("   Rows out: {}", report.rows_out);
    println!("   Salary outliers: {}", report.outliers);
    for step in &report.steps {
        println!(
            "   - {:<22} {:>6} -> {:<6} changed={}",
            step.step, step.rows_in, step.rows_out, step.values_changed
        );
        for note in &step.notes {
            println!("       {}", note);
        }
    }
    println!("   Output file: {}", output.display());
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Generate { output } => {
            let table = generate(&config.generator).context("failed to generate dataset")?;
            storage::write_raw(&output, &table)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("✅ Wrote {} raw rows to {}", table.len(), output.display());
        }
        Commands::Clean { input, output } => {
            let output = output.unwrap_or_else(|| config.output.path.clone());
            let table = storage::read_raw(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let report = clean_and_save(&config, table, &output)?;
            print_report(&report, &output);
        }
        Commands::Run { output } => {
            let output = output.unwrap_or_else(|| config.output.path.clone());
            println!("🚀 Generating and cleaning dataset...");
            let table = generate(&config.generator).context("failed to generate dataset")?;
            let report = clean_and_save(&config, table, &output)?;
            print_report(&report, &output);
        }
        Commands::Profile { input, json } => {
            let input = input.unwrap_or_else(|| config.output.path.clone());
            let table = storage::read_cleaned(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let report = profile::profile(&table);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let _log_guard = logging::init_logging(&cli.log_dir);

    let metrics_file = cli.metrics_file.clone();
    if metrics_file.is_some() {
        metrics::init_metrics();
    }

    let result = run(cli);
    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }

    if let Some(path) = metrics_file {
        match metrics::render() {
            Some(text) => {
                fs::write(&path, text)
                    .with_context(|| format!("failed to write metrics to {}", path.display()))?;
                info!("Wrote metrics to {}", path.display());
            }
            None => error!("Metrics recorder unavailable, nothing written"),
        }
    }

    result
}
