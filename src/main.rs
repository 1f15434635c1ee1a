mod bootstrap;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use chart_vision::export::{json_records, sql_statements};
use chart_vision::filename::parse_year_month;
use chart_vision::parallel_pipeline::{MonthJob, ParallelPipeline};
use chart_vision::pipeline::{DailyRecord, ExtractionPipeline, MonthSummary};
use chart_vision::settings::{OutputFormat, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;
    info!("chart_vision v{} starting", env!("CARGO_PKG_VERSION"));

    let config = settings
        .extraction_config()
        .context("Failed to build extraction profile")?;
    let precision = config.rounding_precision;
    let pipeline = ExtractionPipeline::new(config)?;

    let files = bootstrap::collect_screenshots(&settings.inputs)?;
    info!("Found {} screenshots", files.len());

    // Date every file from its name and decode it; anything unusable is skipped.
    let mut sources: Vec<PathBuf> = Vec::with_capacity(files.len());
    let mut jobs: Vec<MonthJob> = Vec::with_capacity(files.len());
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let (year, month) = match parse_year_month(&name) {
            Ok(year_month) => year_month,
            Err(err) => {
                warn!("Skipping {}: {err}", path.display());
                continue;
            }
        };

        let image = match bootstrap::load_screenshot(&path) {
            Ok(image) => image,
            Err(err) => {
                warn!("Skipping {}: {err}", path.display());
                continue;
            }
        };

        info!("Processing {name} ({year}-{month:02})...");
        jobs.push(MonthJob::new(Arc::new(image), year, month));
        sources.push(path);
    }

    let parallel = match settings.workers {
        Some(workers) => ParallelPipeline::with_workers(pipeline, usize::from(workers)),
        None => ParallelPipeline::new(pipeline),
    };
    let results = parallel.extract_all(jobs).await;

    let mut records: Vec<DailyRecord> = Vec::new();
    for (path, result) in sources.iter().zip(results) {
        match result {
            Ok(report) => {
                info!(
                    "  → {}: {} days, {:.1} kWh total",
                    path.display(),
                    report.summary.days,
                    report.summary.total
                );
                records.extend(report.records);
            }
            Err(err) => error!("Failed to extract {}: {err}", path.display()),
        }
    }

    match settings.format {
        OutputFormat::Sql => {
            for statement in sql_statements(&records, settings.sql_options()) {
                println!("{statement}");
            }
        }
        OutputFormat::Json => println!("{}", json_records(&records)?),
    }

    let summary = MonthSummary::from_records(&records, precision);
    info!("Total days with data: {}", summary.days_with_data);
    info!("Total kWh: {:.1}", summary.total);
    match summary.average {
        Some(average) => info!("Average kWh/day: {average:.1}"),
        None => info!("Average kWh/day: N/A"),
    }

    Ok(())
}
