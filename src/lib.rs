// THEORY:
// This file is the main entry point for the `chart_vision` library crate. It
// exposes the extraction pipeline that turns a decoded bar-chart screenshot into
// one value per calendar day.
//
// The layering mirrors how a chart is read:
// - `core_modules` holds the pixel-level building blocks (color rules, chart
//   geometry, the column scanner, the value mapper). None of them do I/O.
// - `pipeline` composes them into a single month extraction; `parallel_pipeline`
//   fans independent months out over a worker pool.
// - `config`, `filename`, `export` and `settings` are the thin layer the
//   `chart_vision` binary uses around the core: profiles, dating screenshots by
//   name, and printing SQL or JSON.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod export;
pub mod filename;
pub mod parallel_pipeline;
pub mod pipeline;
pub mod settings;

pub use config::ExtractionConfig;
pub use core_modules::chart_image::ChartImage;
pub use core_modules::color_rule::{ChannelRange, ColorClassifier, ColorRule};
pub use core_modules::geometry::{ChartGeometry, DayColumn, Margins, compute_columns};
pub use core_modules::column_scanner::{ScanResult, scan_column};
pub use core_modules::value_mapper::ValueMapper;
pub use error::{ExtractionError, Result};
pub use pipeline::{DailyRecord, ExtractionPipeline, MonthReport, MonthSummary};
