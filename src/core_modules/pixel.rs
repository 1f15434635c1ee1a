// THEORY:
// The `Pixel` module defines the smallest unit the extractor reasons about: one
// RGB sample read out of a chart screenshot. It is deliberately a "dumb" value.
//
// Key architectural principles:
// 1.  **Single-pixel scope**: Nothing here reads neighbors or knows about bars,
//     columns or days. Classification lives in `color_rule`, geometry in `geometry`.
// 2.  **Decoder independence**: The extractor never touches encoded image bytes. A
//     `Pixel` is built from whatever decoded representation the caller owns (`image`
//     crate buffers today), so the scanning code only ever sees three channels.
// 3.  **Alpha is dropped**: Chart screenshots are opaque. When a decoder hands us
//     RGBA we keep the color channels and ignore transparency.

pub mod pixel {
    pub type Byte = u8;
    pub type Channel = Byte;

    /// A "dumb" data container representing a single opaque RGB pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    impl Pixel {
        pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel { red, green, blue }
        }
    }

    impl From<image::Rgb<Byte>> for Pixel {
        fn from(rgb: image::Rgb<Byte>) -> Self {
            let image::Rgb([red, green, blue]) = rgb;
            Pixel::new(red, green, blue)
        }
    }

    impl From<image::Rgba<Byte>> for Pixel {
        fn from(rgba: image::Rgba<Byte>) -> Self {
            let image::Rgba([red, green, blue, _alpha]) = rgba;
            Pixel::new(red, green, blue)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pixel::*;

    #[test]
    fn rgb_conversion_keeps_channels() {
        assert_eq!(Pixel::from(image::Rgb([1, 2, 3])), Pixel::new(1, 2, 3));
    }

    #[test]
    fn rgba_conversion_drops_alpha() {
        let pixel = Pixel::from(image::Rgba([120, 200, 40, 7]));
        assert_eq!(pixel, Pixel::new(120, 200, 40));
    }
}

// -----------------------------------------------------------------------------
// Glossary
//
// - Channel: one 8-bit color component (0..255) as stored by the decoder. No gamma
//   handling is done anywhere in the extractor; thresholds are written against the
//   same sRGB bytes the screenshot tool produced.
//
// - Opaque pixel: a pixel whose alpha (if any) has been discarded. Chart renderers
//   draw bars fully opaque, so alpha carries no information for bar detection.
