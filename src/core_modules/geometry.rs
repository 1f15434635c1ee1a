// THEORY:
// `ChartGeometry` turns "an image of W×H pixels showing N days" into concrete pixel
// rectangles. It plays the same role a grid manager plays for square chunks, except
// the grid here is one row of N columns laid over the chart's plotting rectangle.
//
// Key architectural principles:
// 1.  **Known calibration**: The plotting rectangle is the image minus configured
//     margins. Nothing is auto-detected; a chart family ships its own margins.
// 2.  **Exhaustive tiling**: Column edges are computed on a real-valued day width and
//     rounded to the nearest pixel. Because day `d`'s right edge and day `d + 1`'s
//     left edge come from the same expression, columns never gap or overlap, and the
//     last edge is pinned to `right`.
// 3.  **Fail early**: A rectangle with no area, or one too narrow to give every day a
//     pixel, is a configuration error. The month is never partially measured.

use crate::error::{ExtractionError, Result};
use serde::{Deserialize, Serialize};

/// Insets, in pixels, from each image edge to the plotting rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Default for Margins {
    /// The my-PV ELWA chart layout.
    fn default() -> Self {
        Self {
            left: 60,
            right: 60,
            top: 50,
            bottom: 80,
        }
    }
}

/// The plotting rectangle in image coordinates. Rows grow downward, so `top < bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartGeometry {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    /// The axis baseline bars grow up from.
    pub bottom: i64,
}

/// The horizontal pixel range `[x_start, x_end)` assigned to one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayColumn {
    /// 1-based day of month.
    pub day: u32,
    pub x_start: i64,
    pub x_end: i64,
}

impl ChartGeometry {
    /// Applies `margins` to an image of the given size.
    pub fn from_margins(image_width: u32, image_height: u32, margins: &Margins) -> Result<Self> {
        let geometry = Self {
            left: margins.left as i64,
            right: image_width as i64 - margins.right as i64,
            top: margins.top as i64,
            bottom: image_height as i64 - margins.bottom as i64,
        };

        if geometry.width() <= 0 {
            return Err(ExtractionError::Configuration(format!(
                "plotting width is {} px (image width {}, margins left {} right {})",
                geometry.width(),
                image_width,
                margins.left,
                margins.right
            )));
        }
        if geometry.height() <= 0 {
            return Err(ExtractionError::Configuration(format!(
                "plotting height is {} px (image height {}, margins top {} bottom {})",
                geometry.height(),
                image_height,
                margins.top,
                margins.bottom
            )));
        }
        Ok(geometry)
    }

    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }

    /// Real-valued width of one day column.
    pub fn day_width(&self, day_count: u32) -> f64 {
        self.width() as f64 / day_count as f64
    }

    /// Splits the plotting width into `day_count` contiguous columns, day 1 leftmost.
    pub fn columns(&self, day_count: u32) -> Result<Vec<DayColumn>> {
        if day_count == 0 {
            return Err(ExtractionError::Configuration(
                "day count must be at least 1".to_string(),
            ));
        }
        if self.width() < day_count as i64 {
            return Err(ExtractionError::Configuration(format!(
                "plotting width {} px cannot hold {} day columns",
                self.width(),
                day_count
            )));
        }

        let day_width = self.day_width(day_count);
        let edge = |index: u32| -> i64 {
            if index == day_count {
                self.right
            } else {
                self.left + (index as f64 * day_width).round() as i64
            }
        };

        Ok((1..=day_count)
            .map(|day| DayColumn {
                day,
                x_start: edge(day - 1),
                x_end: edge(day),
            })
            .collect())
    }
}

/// Computes the day columns for an image of the given size and margins.
pub fn compute_columns(
    image_width: u32,
    image_height: u32,
    day_count: u32,
    margins: &Margins,
) -> Result<Vec<DayColumn>> {
    ChartGeometry::from_margins(image_width, image_height, margins)?.columns(day_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mypv_layout_on_800_by_400() {
        let geometry = ChartGeometry::from_margins(800, 400, &Margins::default()).unwrap();
        assert_eq!(geometry.width(), 680);
        assert_eq!(geometry.height(), 270);
        assert_eq!((geometry.top, geometry.bottom), (50, 320));
        assert!((geometry.day_width(30) - 22.67).abs() < 0.01);

        let columns = geometry.columns(30).unwrap();
        assert_eq!(columns[0], DayColumn { day: 1, x_start: 60, x_end: 83 });
        assert_eq!(columns[29].x_end, 740);
    }

    #[test]
    fn columns_tile_the_plotting_width() {
        for width in [31u32, 97, 680, 681, 1234] {
            let margins = Margins { left: 7, right: 3, top: 0, bottom: 0 };
            for day_count in [1u32, 28, 29, 30, 31] {
                if width - 10 < day_count {
                    continue;
                }
                let columns = compute_columns(width, 50, day_count, &margins).unwrap();
                assert_eq!(columns.len(), day_count as usize);
                assert_eq!(columns.first().unwrap().x_start, 7);
                assert_eq!(columns.last().unwrap().x_end, width as i64 - 3);
                for (index, column) in columns.iter().enumerate() {
                    assert_eq!(column.day, index as u32 + 1);
                    assert!(column.x_start < column.x_end);
                }
                for pair in columns.windows(2) {
                    assert_eq!(pair[0].x_end, pair[1].x_start);
                }
            }
        }
    }

    #[test]
    fn margins_wider_than_image_fail() {
        let margins = Margins { left: 400, right: 400, top: 10, bottom: 10 };
        let err = compute_columns(800, 400, 30, &margins).unwrap_err();
        assert!(matches!(err, ExtractionError::Configuration(_)));
    }

    #[test]
    fn margins_taller_than_image_fail() {
        let margins = Margins { left: 10, right: 10, top: 300, bottom: 100 };
        let err = compute_columns(800, 400, 30, &margins).unwrap_err();
        assert!(err.to_string().contains("plotting height is 0 px"));
    }

    #[test]
    fn zero_days_fail() {
        let err = compute_columns(800, 400, 0, &Margins::default()).unwrap_err();
        assert!(matches!(err, ExtractionError::Configuration(_)));
    }

    #[test]
    fn plot_narrower_than_day_count_fails() {
        let margins = Margins { left: 0, right: 0, top: 0, bottom: 0 };
        assert!(compute_columns(30, 10, 31, &margins).is_err());
        assert_eq!(compute_columns(31, 10, 31, &margins).unwrap().len(), 31);
    }
}
