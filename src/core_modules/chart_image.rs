// THEORY:
// `ChartImage` is the read-only view the extractor has of a decoded screenshot.
// Decoding is somebody else's job; the scanner only needs dimensions and a way to
// ask for one pixel at a time.
//
// The one rule that matters here: `pixel` is bounds-checked and returns `None`
// outside the grid. Callers treat `None` as "skip this coordinate", which is the
// only kind of pixel-access failure the scan ever absorbs.

use crate::core_modules::pixel::pixel::Pixel;
use image::{RgbImage, RgbaImage};

/// An immutable `width × height` grid of RGB pixels.
pub trait ChartImage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Returns the pixel at `(x, y)`, or `None` when the coordinate is outside the image.
    fn pixel(&self, x: i64, y: i64) -> Option<Pixel>;

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }
}

impl ChartImage for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: i64, y: i64) -> Option<Pixel> {
        if !self.contains(x, y) {
            return None;
        }
        Some(Pixel::from(*self.get_pixel(x as u32, y as u32)))
    }
}

impl ChartImage for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: i64, y: i64) -> Option<Pixel> {
        if !self.contains(x, y) {
            return None;
        }
        Some(Pixel::from(*self.get_pixel(x as u32, y as u32)))
    }
}
