use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while turning chart screenshots into daily records.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The geometry, scale or color configuration cannot produce a measurement.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested (year, month) is not a valid Gregorian month.
    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    /// A screenshot filename did not carry a `YYYY-MM` suffix.
    #[error("Cannot read year/month from filename: {0}")]
    FilenameDate(String),

    /// A screenshot could not be decoded into a pixel grid.
    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An extraction profile could not be parsed.
    #[error("Failed to parse profile: {0}")]
    ProfileParse(#[from] serde_json::Error),

    /// A parallel extraction job did not deliver its result.
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExtractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_display() {
        let err = ExtractionError::Configuration("plotting width is 0".to_string());
        assert_eq!(err.to_string(), "Configuration error: plotting width is 0");
    }

    #[test]
    fn invalid_month_pads_month() {
        let err = ExtractionError::InvalidMonth { year: 2024, month: 13 };
        assert_eq!(err.to_string(), "Invalid month: 2024-13");
    }

    #[test]
    fn file_read_mentions_path_and_cause() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ExtractionError::FileRead {
            path: PathBuf::from("/profiles/mypv.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/profiles/mypv.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn profile_parse_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err: ExtractionError = json_err.into();
        assert!(err.to_string().starts_with("Failed to parse profile"));
    }
}
