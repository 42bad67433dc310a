//! Command-line interface for the harvester.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::census::{coverage_pct, Census};
use crate::config::{validate_batch, IngestOptions, DEFAULT_CENSUS_PATH, DEFAULT_SEED_DIR};
use crate::error::{HarvesterError, Result};
use crate::harvester::{BatchStats, Harvester};
use crate::source::{batch_name, load_batch};
use crate::splitting::document_provisions;
use crate::text::normalize_text;

/// RusLaw Harvester - Ingest Russian federal legislation from RusLawOD batches.
#[derive(Parser)]
#[command(name = "ruslaw-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest JSON Lines batches into seed records and a census.
    Ingest {
        /// Batch files or HTTP(S) URLs
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Seed record directory
        #[arg(short, long, default_value = DEFAULT_SEED_DIR)]
        output: PathBuf,

        /// Census file
        #[arg(long, default_value = DEFAULT_CENSUS_PATH)]
        census: PathBuf,

        /// Only build the census, do not parse or write provisions
        #[arg(long)]
        census_only: bool,

        /// Process only the N-th input (1-based)
        #[arg(short, long)]
        batch: Option<usize>,
    },

    /// Segment a plain-text law and print its provisions as JSON.
    Parse {
        /// Text file to parse
        file: PathBuf,

        /// Heading used for fallback provisions
        #[arg(long, default_value = "")]
        heading: String,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            inputs,
            output,
            census,
            census_only,
            batch,
        } => {
            let options = IngestOptions {
                seed_dir: output,
                census_path: census,
                census_only,
            };
            ingest_command(&inputs, batch, options)
        }
        Commands::Parse { file, heading } => parse_command(&file, &heading),
    }
}

/// Pick the inputs to process.
fn select_inputs(inputs: &[String], batch: Option<usize>) -> Result<&[String]> {
    if inputs.is_empty() {
        return Err(HarvesterError::NoInput);
    }

    match batch {
        Some(n) => {
            validate_batch(n, inputs.len())?;
            Ok(&inputs[n - 1..n])
        }
        None => Ok(inputs),
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("=> "),
    );
    pb
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// A batch that stopped early, with what it ingested before the failure.
struct BatchFailure {
    ingested: BatchStats,
    error: HarvesterError,
}

impl BatchFailure {
    fn load(error: HarvesterError) -> Self {
        Self {
            ingested: BatchStats::default(),
            error,
        }
    }

    fn message(&self) -> String {
        if self.ingested.rows == 0 {
            self.error.to_string()
        } else {
            format!(
                "{} (partially ingested: {} row(s) before the failure, {} in the census)",
                self.error, self.ingested.rows, self.ingested.federal
            )
        }
    }
}

/// Load and ingest one batch.
fn ingest_batch(
    harvester: &mut Harvester,
    input: &str,
) -> std::result::Result<BatchStats, BatchFailure> {
    let pb = spinner("Loading batch...");
    let loaded = load_batch(input);
    pb.finish_and_clear();
    let rows = loaded.map_err(BatchFailure::load)?;

    let pb = progress_bar(rows.len());
    pb.set_message("rows");
    let mut stats = BatchStats::default();
    for row in &rows {
        match harvester.ingest_row(row) {
            Ok(outcome) => stats.record(&outcome),
            Err(error) => {
                pb.finish_and_clear();
                return Err(BatchFailure {
                    ingested: stats,
                    error,
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(stats)
}

/// Execute the ingest command.
fn ingest_command(inputs: &[String], batch: Option<usize>, options: IngestOptions) -> Result<()> {
    let selected = select_inputs(inputs, batch)?;
    let census_only = options.census_only;
    let census_path = options.census_path.clone();

    println!(
        "{} {} batch(es){}",
        style("Ingesting").bold(),
        style(selected.len()).cyan(),
        if census_only { " (census only)" } else { "" }
    );

    let mut harvester = Harvester::new(options);
    let mut failed = 0;

    for (i, input) in selected.iter().enumerate() {
        println!();
        println!(
            "[{}/{}] {}",
            i + 1,
            selected.len(),
            style(batch_name(input)).cyan()
        );

        let start = Instant::now();
        match ingest_batch(&mut harvester, input) {
            Ok(stats) => {
                println!("  Federal legislation found: {}", stats.federal);
                if stats.duplicates > 0 {
                    println!("  Duplicates dropped: {}", stats.duplicates);
                }
                if !census_only {
                    println!(
                        "  Laws written: {}, Provisions: {}",
                        stats.laws_written, stats.provisions
                    );
                }
                println!("  Time: {:.1}s", start.elapsed().as_secs_f64());
            }
            Err(failure) => {
                failed += 1;
                tracing::error!(
                    batch = %input,
                    error = %failure.error,
                    rows_ingested = failure.ingested.rows,
                    "Batch failed"
                );
                println!(
                    "  {} ({:.1}s): {}",
                    style("ERROR").red().bold(),
                    start.elapsed().as_secs_f64(),
                    failure.message()
                );
            }
        }
    }

    let seed_files = harvester.store().count_records()?;
    let seed_dir = harvester.store().dir().to_path_buf();
    let census = harvester.into_census();
    census.write(&census_path)?;

    print_summary(&census, seed_files, &census_path, &seed_dir);
    if failed > 0 {
        println!(
            "\n  {} {failed} batch(es) failed",
            style("Warning:").yellow().bold()
        );
    }

    Ok(())
}

fn print_summary(census: &Census, seed_files: usize, census_path: &Path, seed_dir: &Path) {
    let stats = &census.stats;

    println!();
    println!("{}", style("Summary").bold());
    println!("  Census entries: {}", stats.total);
    if stats.id_collisions > 0 {
        println!("  ID collisions resolved: {}", stats.id_collisions);
    }
    for (label, prefix) in [
        ("By type", "type_"),
        ("By status", "status_"),
        ("By classification", "class_"),
    ] {
        println!("  {label}:");
        for (name, count) in stats.group(prefix) {
            println!("    {name}: {count}");
        }
    }

    if let Some(ingestion) = &census.ingestion {
        println!();
        println!("  Seed files: {seed_files}");
        println!("  Total provisions: {}", ingestion.total_provisions);

        let ingestable = stats.get("class_ingestable");
        if ingestion.total_laws > 0 && ingestion.total_laws >= ingestable {
            println!("  {}", style("All ingestable laws ingested").green());
        } else if ingestion.total_laws > 0 {
            println!(
                "  Coverage: {}/{ingestable} ({}%)",
                ingestion.total_laws,
                coverage_pct(ingestion.total_laws, ingestable)
            );
        }
    }

    println!();
    println!(
        "{} {}",
        style("Census:").green().bold(),
        census_path.display()
    );
    println!("{} {}", style("Seeds:").green().bold(), seed_dir.display());
}

/// Execute the parse command.
fn parse_command(file: &Path, heading: &str) -> Result<()> {
    let text = fs::read_to_string(file)?;
    let cleaned = normalize_text(&text);
    let provisions = document_provisions(&cleaned, heading, "");
    println!("{}", serde_json::to_string_pretty(&provisions)?);
    Ok(())
}
