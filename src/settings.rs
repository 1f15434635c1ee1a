use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::export::SqlOptions;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Sql,
    Json,
}

/// Recover daily kWh values from bar-chart screenshots
#[derive(Parser, Debug, Clone)]
#[command(
    name = "chart_vision",
    about = "Recover daily kWh values from bar-chart screenshots",
    version
)]
pub struct Settings {
    /// Screenshot files or directories of screenshots named `*-YYYY-MM.png`
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// JSON extraction profile (defaults to the my-PV ELWA layout)
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Sql)]
    pub format: OutputFormat,

    /// Emit records for days without a bar
    #[arg(long)]
    pub include_zero_days: bool,

    /// Do not emit `DELETE FROM elwaReadings;` before the inserts
    #[arg(long)]
    pub no_delete: bool,

    /// Override the profile's axis scale (kWh at the top of the plot)
    #[arg(long)]
    pub axis_scale: Option<f64>,

    /// Override the profile's noise threshold (matched pixels)
    #[arg(long)]
    pub noise_threshold: Option<u32>,

    /// Parallel extraction workers (defaults to the number of CPUs)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: Option<u16>,

    /// Logging level
    #[arg(long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,
}

impl Settings {
    /// The profile named by `--profile` (or the default), with CLI overrides applied.
    pub fn extraction_config(&self) -> Result<ExtractionConfig> {
        let mut config = match &self.profile {
            Some(path) => ExtractionConfig::load_from(path)?,
            None => ExtractionConfig::default(),
        };
        if let Some(axis_scale) = self.axis_scale {
            config.axis_scale = axis_scale;
        }
        if let Some(noise_threshold) = self.noise_threshold {
            config.noise_threshold = noise_threshold;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn sql_options(&self) -> SqlOptions {
        SqlOptions {
            delete_existing: !self.no_delete,
            include_zero_days: self.include_zero_days,
        }
    }
}
