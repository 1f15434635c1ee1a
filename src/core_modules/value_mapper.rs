// THEORY:
// The `ValueMapper` converts a pixel height back into the unit the chart was drawn
// in. The vertical axis is linear from 0 at the baseline to `axis_scale` at the top
// of the plotting rectangle, so the conversion is a single ratio.
//
// Rounding is part of the contract, not presentation: values are rounded to
// `precision` decimal places by scaling, `f64::round` (half away from zero) and
// scaling back. The same input always yields the same bits.

use crate::error::{ExtractionError, Result};

pub const DEFAULT_PRECISION: u32 = 1;
/// Above this, `10^precision` stops being exactly representable.
pub const MAX_PRECISION: u32 = 15;

/// Linear pixel-height → domain-value conversion for one chart family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueMapper {
    axis_scale: f64,
    precision: u32,
}

impl ValueMapper {
    pub fn new(axis_scale: f64, precision: u32) -> Result<Self> {
        if !axis_scale.is_finite() || axis_scale <= 0.0 {
            return Err(ExtractionError::Configuration(format!(
                "axis scale must be positive, got {axis_scale}"
            )));
        }
        check_precision(precision)?;
        Ok(Self { axis_scale, precision })
    }

    /// `round(max_bar_height_pixels / chart_height_pixels * axis_scale, precision)`.
    pub fn to_value(&self, max_bar_height_pixels: u32, chart_height_pixels: i64) -> Result<f64> {
        if chart_height_pixels <= 0 {
            return Err(ExtractionError::Configuration(format!(
                "chart height must be positive, got {chart_height_pixels} px"
            )));
        }
        let raw = max_bar_height_pixels as f64 / chart_height_pixels as f64 * self.axis_scale;
        Ok(round_to(raw, self.precision))
    }
}

pub fn check_precision(precision: u32) -> Result<()> {
    if precision > MAX_PRECISION {
        return Err(ExtractionError::Configuration(format!(
            "rounding precision must be at most {MAX_PRECISION} decimals, got {precision}"
        )));
    }
    Ok(())
}

/// Rounds half away from zero to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_height_is_half_scale() {
        let mapper = ValueMapper::new(5.0, DEFAULT_PRECISION).unwrap();
        assert_eq!(mapper.to_value(135, 270).unwrap(), 2.5);
    }

    #[test]
    fn full_and_zero_height() {
        let mapper = ValueMapper::new(5.0, DEFAULT_PRECISION).unwrap();
        assert_eq!(mapper.to_value(270, 270).unwrap(), 5.0);
        assert_eq!(mapper.to_value(0, 270).unwrap(), 0.0);
    }

    #[test]
    fn rounds_to_configured_precision() {
        // 100 / 270 * 5 = 1.85185...
        assert_eq!(ValueMapper::new(5.0, 1).unwrap().to_value(100, 270).unwrap(), 1.9);
        assert_eq!(ValueMapper::new(5.0, 2).unwrap().to_value(100, 270).unwrap(), 1.85);
        assert_eq!(ValueMapper::new(5.0, 0).unwrap().to_value(100, 270).unwrap(), 2.0);
    }

    #[test]
    fn round_to_goes_half_away_from_zero() {
        assert_eq!(round_to(0.25, 1), 0.3);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(1.04, 1), 1.0);
    }

    #[test]
    fn non_positive_chart_height_fails() {
        let mapper = ValueMapper::new(5.0, 1).unwrap();
        assert!(matches!(mapper.to_value(10, 0), Err(ExtractionError::Configuration(_))));
        assert!(matches!(mapper.to_value(10, -5), Err(ExtractionError::Configuration(_))));
    }

    #[test]
    fn non_positive_axis_scale_fails() {
        assert!(ValueMapper::new(0.0, 1).is_err());
        assert!(ValueMapper::new(-5.0, 1).is_err());
        assert!(ValueMapper::new(f64::NAN, 1).is_err());
    }

    #[test]
    fn excessive_precision_fails() {
        assert!(ValueMapper::new(5.0, MAX_PRECISION).is_ok());
        for precision in [MAX_PRECISION + 1, 400, u32::MAX] {
            assert!(matches!(
                ValueMapper::new(5.0, precision),
                Err(ExtractionError::Configuration(_))
            ));
        }
    }

    #[test]
    fn max_precision_keeps_values_finite() {
        let mapper = ValueMapper::new(5.0, MAX_PRECISION).unwrap();
        let value = mapper.to_value(100, 270).unwrap();
        assert!(value.is_finite());
        assert!((value - 100.0 / 270.0 * 5.0).abs() < 1e-12);
    }
}
