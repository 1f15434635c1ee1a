//! Extraction profiles.
//!
//! An `ExtractionConfig` describes one chart family: where the plotting rectangle
//! sits, which colors are bars, and what the vertical axis spans. Profiles are
//! plain JSON; any field left out takes the my-PV ELWA default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core_modules::color_rule::ColorRule;
use crate::core_modules::geometry::Margins;
use crate::core_modules::value_mapper::{self, DEFAULT_PRECISION};
use crate::error::{ExtractionError, Result};

pub const DEFAULT_AXIS_SCALE: f64 = 5.0;
pub const DEFAULT_NOISE_THRESHOLD: u32 = 5;

/// Immutable configuration handed to the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub margins: Margins,
    pub color_rules: Vec<ColorRule>,
    /// Domain units (kWh) spanned by the full plotting height.
    pub axis_scale: f64,
    /// A column with this many matched pixels or fewer is recorded as 0.
    pub noise_threshold: u32,
    /// Decimal places kept in extracted values.
    pub rounding_precision: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            color_rules: vec![ColorRule::mypv_leistung(), ColorRule::mypv_leistung_1()],
            axis_scale: DEFAULT_AXIS_SCALE,
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            rounding_precision: DEFAULT_PRECISION,
        }
    }
}

impl ExtractionConfig {
    /// Load a JSON profile from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ExtractionError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks everything that does not depend on the image size.
    pub fn validate(&self) -> Result<()> {
        if self.color_rules.is_empty() {
            return Err(ExtractionError::Configuration(
                "at least one color rule is required".to_string(),
            ));
        }
        for rule in &self.color_rules {
            rule.validate()?;
        }
        if !self.axis_scale.is_finite() || self.axis_scale <= 0.0 {
            return Err(ExtractionError::Configuration(format!(
                "axis scale must be positive, got {}",
                self.axis_scale
            )));
        }
        value_mapper::check_precision(self.rounding_precision)?;
        Ok(())
    }
}
