// THEORY:
// The `ColumnScanner` is where pixels become a measurement. It walks one day
// column of the plotting rectangle from the axis baseline upward and answers two
// questions: how many bar pixels are there, and how high does the highest one sit?
//
// Key architectural principles:
// 1.  **Height is the topmost hit, not a count**: A bar may be narrower than its
//     column, anti-aliased at the edges, or crossed by a grid line. None of that
//     should shrink it. The height is `bottom - y` for the highest matching row,
//     independent of how many pixels below it also matched.
// 2.  **Count is for noise rejection only**: `matched_pixel_count` lets the pipeline
//     tell a real bar from a handful of stray anti-aliasing pixels. It never feeds
//     the value itself.
// 3.  **Explicit bounds**: Columns near the image edge may reach past it. Those
//     coordinates are skipped by a bounds branch; nothing else is ever swallowed.

use crate::core_modules::chart_image::ChartImage;
use crate::core_modules::color_rule::ColorClassifier;
use crate::core_modules::geometry::{ChartGeometry, DayColumn};
use crate::core_modules::pixel::pixel::Pixel;

/// The outcome of scanning one day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanResult {
    /// Height, in pixels above the baseline, of the highest matched pixel.
    pub max_bar_height_pixels: u32,
    /// Total matched pixels in the column rectangle.
    pub matched_pixel_count: u32,
    /// Leftmost matched pixel of the highest matched row.
    pub top_pixel: Option<Pixel>,
}

/// Scans `x ∈ [x_start, x_end)`, `y ∈ (top, bottom]`, from `bottom` upward.
pub fn scan_column<I: ChartImage + ?Sized>(
    image: &I,
    x_start: i64,
    x_end: i64,
    top: i64,
    bottom: i64,
    classifier: &ColorClassifier,
) -> ScanResult {
    let mut result = ScanResult::default();

    for y in (top + 1..=bottom).rev() {
        for x in x_start..x_end {
            // Out-of-bounds coordinates are skipped, not errors.
            let Some(pixel) = image.pixel(x, y) else {
                continue;
            };
            if classifier.classify(&pixel) {
                let height = (bottom - y) as u32;
                result.matched_pixel_count += 1;
                if result.top_pixel.is_none() || height > result.max_bar_height_pixels {
                    result.max_bar_height_pixels = height;
                    result.top_pixel = Some(pixel);
                }
            }
        }
    }

    result
}

/// Scans a `DayColumn` over the geometry's vertical bounds.
pub fn scan_day<I: ChartImage + ?Sized>(
    image: &I,
    column: &DayColumn,
    geometry: &ChartGeometry,
    classifier: &ColorClassifier,
) -> ScanResult {
    scan_column(image, column.x_start, column.x_end, geometry.top, geometry.bottom, classifier)
}
