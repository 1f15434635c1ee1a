// THEORY:
// The `pipeline` module is the top-level API of the extractor. It wires the core
// modules together into one call: give it a decoded chart and a (year, month), get
// back one `DailyRecord` per calendar day, in day order.
//
// Stages, per day:
// 1.  Geometry: carve the plotting rectangle into the month's day columns.
// 2.  Scan: walk the column bottom-up and classify every pixel.
// 3.  Noise rejection: a column with `noise_threshold` matched pixels or fewer holds
//     no bar. Anti-aliasing specks and true zeros look the same, so both become 0.
// 4.  Mapping: convert the topmost bar pixel's height into kWh.
//
// Everything is computed from the image and the immutable configuration alone, so
// running the pipeline twice on the same input yields bit-identical output. The only
// failures are configuration errors, and they abort the whole month.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ExtractionConfig;
use crate::core_modules::calendar;
use crate::core_modules::chart_image::ChartImage;
use crate::core_modules::color_rule::ColorClassifier;
use crate::core_modules::column_scanner::{self, ScanResult};
use crate::core_modules::geometry::{ChartGeometry, DayColumn};
use crate::core_modules::value_mapper::{ValueMapper, round_to};
use crate::error::Result;

/// One calendar day's extracted value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// `None` marks a day for which no measurement exists at all. The pixel pipeline
    /// always measures, so it only ever produces `Some`.
    pub value: Option<f64>,
}

impl DailyRecord {
    pub fn measured(date: NaiveDate, value: f64) -> Self {
        Self { date, value: Some(value) }
    }

    pub fn absent(date: NaiveDate) -> Self {
        Self { date, value: None }
    }

    /// True when the day carries a measured, strictly positive value.
    pub fn has_data(&self) -> bool {
        self.value.is_some_and(|value| value > 0.0)
    }
}

/// The raw evidence behind one day's record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayMeasurement {
    pub column: DayColumn,
    pub scan: ScanResult,
    /// The column held too few bar pixels and was recorded as 0.
    pub rejected_as_noise: bool,
    pub value: f64,
}

/// Month totals, as reported alongside the records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthSummary {
    pub days: usize,
    pub days_with_data: usize,
    pub total: f64,
    /// Mean over days with data; `None` when no day has data.
    pub average: Option<f64>,
}

impl MonthSummary {
    pub fn from_records(records: &[DailyRecord], precision: u32) -> Self {
        let values: Vec<f64> = records
            .iter()
            .filter(|record| record.has_data())
            .filter_map(|record| record.value)
            .collect();
        let total: f64 = values.iter().sum();
        let average = (!values.is_empty()).then(|| round_to(total / values.len() as f64, precision));

        Self {
            days: records.len(),
            days_with_data: values.len(),
            total: round_to(total, precision),
            average,
        }
    }
}

/// Records plus per-day diagnostics for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthReport {
    pub year: i32,
    pub month: u32,
    pub geometry: ChartGeometry,
    pub records: Vec<DailyRecord>,
    pub measurements: Vec<DayMeasurement>,
    pub summary: MonthSummary,
}

/// The main, top-level struct for the extractor.
#[derive(Debug, Clone)]
pub struct ExtractionPipeline {
    classifier: ColorClassifier,
    mapper: ValueMapper,
    config: ExtractionConfig,
}

impl ExtractionPipeline {
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier: ColorClassifier::new(config.color_rules.clone()),
            mapper: ValueMapper::new(config.axis_scale, config.rounding_precision)?,
            config,
        })
    }

    /// One record per day of `year`-`month`, day-ascending.
    pub fn extract_month<I: ChartImage + ?Sized>(
        &self,
        image: &I,
        year: i32,
        month: u32,
    ) -> Result<Vec<DailyRecord>> {
        Ok(self.extract_month_report(image, year, month)?.records)
    }

    /// Like `extract_month`, keeping the scan evidence and month totals.
    pub fn extract_month_report<I: ChartImage + ?Sized>(
        &self,
        image: &I,
        year: i32,
        month: u32,
    ) -> Result<MonthReport> {
        let first = calendar::first_of_month(year, month)?;
        let day_count = calendar::days_in_month(year, month)?;

        // Stage 1: Geometry
        let geometry = ChartGeometry::from_margins(image.width(), image.height(), &self.config.margins)?;
        let columns = geometry.columns(day_count)?;

        let mut records = Vec::with_capacity(columns.len());
        let mut measurements = Vec::with_capacity(columns.len());

        for (column, date) in columns.into_iter().zip(first.iter_days()) {
            // Stage 2: Scan
            let scan = column_scanner::scan_day(image, &column, &geometry, &self.classifier);

            // Stage 3 & 4: Noise rejection, then mapping
            let rejected_as_noise = scan.matched_pixel_count <= self.config.noise_threshold;
            let value = if rejected_as_noise {
                0.0
            } else {
                self.mapper.to_value(scan.max_bar_height_pixels, geometry.height())?
            };

            let category = scan
                .top_pixel
                .and_then(|pixel| self.classifier.matching_rule(&pixel))
                .map_or("-", |rule| rule.name.as_str());
            debug!(
                %date,
                category,
                x_start = column.x_start,
                x_end = column.x_end,
                matched = scan.matched_pixel_count,
                height_px = scan.max_bar_height_pixels,
                rejected_as_noise,
                value,
                "scanned day column"
            );

            records.push(DailyRecord::measured(date, value));
            measurements.push(DayMeasurement {
                column,
                scan,
                rejected_as_noise,
                value,
            });
        }

        let summary = MonthSummary::from_records(&records, self.config.rounding_precision);
        info!(
            "{year}-{month:02}: {} days, {} with data, {:.1} kWh total",
            summary.days, summary.days_with_data, summary.total
        );

        Ok(MonthReport {
            year,
            month,
            geometry,
            records,
            measurements,
            summary,
        })
    }
}
