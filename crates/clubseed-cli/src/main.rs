mod config;
mod registry;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use clubseed_core::{Dataset, document_schemas, redact_connection_string};
use clubseed_eval::{
    DatasetMetrics, EvalError, build_daily_report, check_dataset, collect_metrics,
    render_summary, write_daily_report,
};
use clubseed_generate::{DatasetGenerator, GenerateOptions, GenerationError};
use clubseed_store::{StoreError, StoreTarget, WriteReport, open_store, write_dataset};
use config::{ConfigError, SeedSection, load_config, resolve_store_url};
use registry::{RunContext, init_run_logging, start_run, write_summary};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("run artifacts: {0}")]
    RunArtifacts(#[from] registry::RunArtifactError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("report error: {0}")]
    Eval(#[from] EvalError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("generated dataset failed {0} integrity check(s)")]
    Integrity(usize),
}

#[derive(Parser, Debug)]
#[command(name = "clubseed", version, about = "Club reservation demo data seeder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset and replace the store's seeded collections.
    Seed(SeedArgs),
    /// Append a daily statistics document to the `reports` collection.
    Report(ReportArgs),
    /// Print the JSON Schema of the seeded documents.
    Schema(SchemaArgs),
}

#[derive(Args, Debug)]
struct SeedArgs {
    /// Path to a TOML config file (defaults to ./clubseed.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Store connection string (postgres://, mongodb://, dir:, file://, memory://).
    #[arg(long, value_name = "URL")]
    store: Option<String>,
    /// Generation profile: fixture or randomized.
    #[arg(long)]
    profile: Option<String>,
    /// Seed for reproducible datasets; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    clubs: Option<u32>,
    #[arg(long)]
    events_per_club: Option<u32>,
    #[arg(long)]
    tables_per_event: Option<u32>,
    /// Probability in [0, 1] that a table is reserved.
    #[arg(long)]
    reservation_probability: Option<f64>,
    /// Faker locale for the randomized profile (en_US, pt_BR).
    #[arg(long)]
    locale: Option<String>,
    /// Output directory for run artifacts.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Generate and check without writing to the store.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Path to a TOML config file (defaults to ./clubseed.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Store connection string (postgres://, mongodb://, dir:, file://).
    #[arg(long, value_name = "URL")]
    store: Option<String>,
    /// Repeat every SECS seconds instead of running once.
    #[arg(long, value_name = "SECS")]
    every: Option<u64>,
    /// Stop after this many reports when repeating.
    #[arg(long, requires = "every", value_parser = clap::value_parser!(u64).range(1..))]
    count: Option<u64>,
    /// Output directory for run artifacts.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Write the schema to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SeedSummary<'a> {
    run_id: &'a str,
    seed: u64,
    profile: &'a str,
    metrics: &'a DatasetMetrics,
    write: Option<&'a WriteReport>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Seed(args) => run_seed(args).await,
        Command::Report(args) => run_report(args).await,
        Command::Schema(args) => run_schema(args),
    }
}

async fn run_seed(args: SeedArgs) -> Result<(), CliError> {
    let file = load_config(args.config.as_deref())?;
    let flags = SeedSection {
        profile: args.profile,
        seed: args.seed,
        clubs: args.clubs,
        events_per_club: args.events_per_club,
        tables_per_event: args.tables_per_event,
        reservation_probability: args.reservation_probability,
        locale: args.locale,
    };
    let section = file.seed.merged_with(&flags);
    let options = section.to_options()?;
    let generator = DatasetGenerator::new(options.clone())?;
    let seed = section.seed.unwrap_or_else(|| Uuid::new_v4().as_u64_pair().0);

    let store_url = resolve_store_url(args.store, &file);
    let (engine, connection) = match store_url.as_deref() {
        Some(url) => (
            Some(StoreTarget::parse(url)?.engine().to_string()),
            Some(redact_connection_string(url)),
        ),
        None if args.dry_run => (None, None),
        None => return Err(missing_store_url()),
    };

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        command: "seed",
        run_dir: args.run_dir,
        engine: engine.clone(),
        connection: connection.clone(),
        options: Some(options.clone()),
        seed: Some(seed),
        dry_run: args.dry_run,
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        command = "seed",
        profile = %options.profile,
        seed,
        engine = engine.as_deref().unwrap_or("none"),
        store = connection.as_ref().map(|c| c.redacted.as_str()).unwrap_or("-"),
        run_dir = %run_paths.root.display()
    );

    let timer = Instant::now();
    let outcome = seed_store(
        &generator,
        seed,
        store_url.as_deref().filter(|_| !args.dry_run),
    )
    .await;

    let (dataset, write_report) = match outcome {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(event = "run_finished", status = "failure", error = %err);
            return Err(err);
        }
    };

    let metrics = collect_metrics(&dataset);
    write_summary(
        &run_paths,
        &SeedSummary {
            run_id: &run_id,
            seed,
            profile: options.profile.as_str(),
            metrics: &metrics,
            write: write_report.as_ref(),
        },
    )?;

    println!("\nDone!");
    println!("{}", render_summary(&metrics));

    tracing::info!(
        event = "run_finished",
        status = "success",
        dry_run = args.dry_run,
        duration_ms = timer.elapsed().as_millis() as u64
    );

    Ok(())
}

/// Generate, check and (unless `store_url` is `None`) persist one dataset.
async fn seed_store(
    generator: &DatasetGenerator,
    seed: u64,
    store_url: Option<&str>,
) -> Result<(Dataset, Option<WriteReport>), CliError> {
    println!("\nGenerating dataset ({} profile)...", generator.options().profile);
    let dataset = generator.generate_seeded(seed, chrono::Utc::now());
    report_generated(generator.options(), &dataset);

    let violations = check_dataset(&dataset);
    if !violations.is_empty() {
        for violation in &violations {
            tracing::warn!(
                event = "integrity_violation",
                code = %violation.code,
                collection = %violation.collection,
                id = %violation.id,
                message = %violation.message
            );
        }
        return Err(CliError::Integrity(violations.len()));
    }

    let Some(url) = store_url else {
        tracing::info!(event = "store_skipped", reason = "dry_run");
        return Ok((dataset, None));
    };

    println!("\nConnecting to {}...", redact_connection_string(url).redacted);
    let store = open_store(url).await?;
    tracing::info!(event = "store_connected", engine = store.engine());

    println!("Replacing seeded collections...");
    let report = write_dataset(store.as_ref(), &dataset).await?;
    for write in &report.collections {
        println!(
            "   {:<13} {} written ({} removed)",
            format!("{}:", write.collection),
            write.inserted,
            write.deleted
        );
    }

    Ok((dataset, Some(report)))
}

fn report_generated(options: &GenerateOptions, dataset: &Dataset) {
    let summary = dataset.summary();
    println!("   {} clubs", summary.clubs);
    println!(
        "   {} events ({} per club)",
        summary.events, options.events_per_club
    );
    println!(
        "   {} tables ({} per event)",
        summary.tables, options.tables_per_event
    );
    println!("   {} reservations", summary.reservations);
}

async fn run_report(args: ReportArgs) -> Result<(), CliError> {
    let file = load_config(args.config.as_deref())?;
    let url = resolve_store_url(args.store, &file).ok_or_else(missing_store_url)?;
    let target = StoreTarget::parse(&url)?;
    if target == StoreTarget::Memory {
        return Err(CliError::InvalidConfig(
            "the memory store does not persist between runs; nothing to report on".to_string(),
        ));
    }
    let every = match args.every {
        Some(0) => {
            return Err(CliError::InvalidConfig(
                "--every must be greater than 0".to_string(),
            ));
        }
        Some(secs) => Some(Duration::from_secs(secs)),
        None => None,
    };

    let run_id = Uuid::new_v4().to_string();
    let connection = redact_connection_string(&url);
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        command: "report",
        run_dir: args.run_dir,
        engine: Some(target.engine().to_string()),
        connection: Some(connection.clone()),
        options: None,
        seed: None,
        dry_run: false,
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        command = "report",
        engine = target.engine(),
        store = %connection.redacted,
        run_dir = %run_paths.root.display()
    );

    let outcome = report_loop(&url, every, args.count).await;
    match outcome {
        Ok(written) => {
            write_summary(&run_paths, &written)?;
            tracing::info!(event = "run_finished", status = "success", reports = written.len());
            Ok(())
        }
        Err(err) => {
            tracing::error!(event = "run_finished", status = "failure", error = %err);
            Err(err)
        }
    }
}

/// Write one report, or one per tick when `every` is set; ticks never overlap.
async fn report_loop(
    url: &str,
    every: Option<Duration>,
    count: Option<u64>,
) -> Result<Vec<clubseed_eval::DailyReport>, CliError> {
    let store = open_store(url).await?;
    let mut written = Vec::new();

    let Some(period) = every else {
        written.push(report_once(store.as_ref()).await?);
        return Ok(written);
    };

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        written.push(report_once(store.as_ref()).await?);
        if count.is_some_and(|limit| written.len() as u64 >= limit) {
            return Ok(written);
        }
    }
}

async fn report_once(
    store: &dyn clubseed_store::DocumentStore,
) -> Result<clubseed_eval::DailyReport, CliError> {
    println!("Generating daily report...");
    let report = build_daily_report(store, chrono::Utc::now()).await?;
    write_daily_report(store, &report).await?;
    println!(
        "Report saved: {} ({} reservations, {} free tables, revenue estimate {})",
        report.id,
        report.metrics.total_reservations,
        report.metrics.free_tables,
        report.metrics.revenue_estimate
    );
    Ok(report)
}

fn run_schema(args: SchemaArgs) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(&document_schemas())?;
    match args.out {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn missing_store_url() -> CliError {
    CliError::InvalidConfig(format!(
        "store url is required: pass --store, set [store].url in {}, or set {}",
        config::DEFAULT_CONFIG_PATH,
        config::STORE_URL_ENV
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_args(args: &[&str]) -> Result<ReportArgs, clap::Error> {
        let argv = ["clubseed", "report"].into_iter().chain(args.iter().copied());
        match Cli::try_parse_from(argv)?.command {
            Command::Report(args) => Ok(args),
            other => panic!("parsed unexpected command: {other:?}"),
        }
    }

    #[test]
    fn report_count_requires_every() {
        assert!(report_args(&["--count", "3"]).is_err());

        let args = report_args(&["--every", "60", "--count", "3"]).expect("parse report args");
        assert_eq!(args.every, Some(60));
        assert_eq!(args.count, Some(3));
    }

    #[test]
    fn report_count_rejects_zero() {
        assert!(report_args(&["--every", "60", "--count", "0"]).is_err());
    }

    #[test]
    fn seed_flags_parse() {
        let cli = Cli::try_parse_from([
            "clubseed",
            "seed",
            "--profile",
            "randomized",
            "--seed",
            "7",
            "--dry-run",
        ])
        .expect("parse seed args");
        let Command::Seed(args) = cli.command else {
            panic!("expected seed command");
        };
        assert_eq!(args.profile.as_deref(), Some("randomized"));
        assert_eq!(args.seed, Some(7));
        assert!(args.dry_run);
    }
}
