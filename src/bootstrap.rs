use std::path::{Path, PathBuf};

use chart_vision::error::{ExtractionError, Result};
use chart_vision::filename::discover_screenshots;
use image::RgbImage;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber on stderr.
///
/// stdout is reserved for the SQL/JSON output, so log lines never mix into it.
/// Falls back to `"info"` if the level string is not a valid filter directive.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(subscriber).init();

    Ok(())
}

// ── Input collection ───────────────────────────────────────────────────────────

/// Expands the CLI inputs: directories contribute their `.png` files, plain paths
/// are taken as-is. Order follows the inputs, then file name within a directory.
pub fn collect_screenshots(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(discover_screenshots(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

/// Decodes a screenshot into an opaque RGB grid.
pub fn load_screenshot(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).map_err(|source| ExtractionError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgb8())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn collect_mixes_directories_and_files() {
        let tmp = TempDir::new().expect("tempdir");
        let shots = tmp.path().join("shots");
        std::fs::create_dir_all(&shots).expect("create shots dir");
        std::fs::write(shots.join("m-2025-02.png"), b"").expect("write");
        std::fs::write(shots.join("m-2025-01.png"), b"").expect("write");
        let single = tmp.path().join("other-2024-12.png");

        let files = collect_screenshots(&[single.clone(), shots.clone()]).expect("collect");
        assert_eq!(
            files,
            vec![single, shots.join("m-2025-01.png"), shots.join("m-2025-02.png")]
        );
    }

    #[test]
    fn load_screenshot_drops_alpha() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("chart-2025-03.png");
        RgbaImage::from_pixel(8, 4, Rgba([140, 200, 40, 128]))
            .save(&path)
            .expect("save png");

        let image = load_screenshot(&path).expect("load");
        assert_eq!(image.dimensions(), (8, 4));
        assert_eq!(image.get_pixel(3, 2).0, [140, 200, 40]);
    }

    #[test]
    fn load_screenshot_reports_undecodable_files() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("broken-2025-03.png");
        std::fs::write(&path, b"not a png").expect("write");

        let err = load_screenshot(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::ImageDecode { .. }));
        assert!(err.to_string().contains("broken-2025-03.png"));
    }
}
