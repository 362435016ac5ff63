//! Error types for report generation.
//!
//! This module provides [`ReportError`], the error type surfaced by the public
//! report-generation API. Per-entry paint failures are deliberately not part
//! of this taxonomy: a preview whose paint attempt fails is shown with a
//! skip-paint marker and never aborts the run.

use std::fmt;

/// Error type for report-generation operations.
#[derive(Debug)]
pub enum ReportError {
    /// Template compilation or rendering failure.
    Template(String),

    /// An SVG scene could not be parsed or rasterized.
    Raster(String),

    /// I/O error writing the report document or creating its directory.
    Io(std::io::Error),

    /// A theme file could not be interpreted as a defaults dictionary.
    ThemeSpec(String),

    /// The supplied dictionary was empty; no partial report is produced.
    EmptyDefaults,
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Template(msg) => write!(f, "template error: {}", msg),
            ReportError::Raster(msg) => write!(f, "raster error: {}", msg),
            ReportError::Io(err) => write!(f, "I/O error: {}", err),
            ReportError::ThemeSpec(msg) => write!(f, "theme spec error: {}", msg),
            ReportError::EmptyDefaults => write!(f, "defaults dictionary is empty"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err)
    }
}

impl From<minijinja::Error> for ReportError {
    fn from(err: minijinja::Error) -> Self {
        ReportError::Template(err.to_string())
    }
}

impl From<serde_yaml::Error> for ReportError {
    fn from(err: serde_yaml::Error) -> Self {
        ReportError::ThemeSpec(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::Raster("bad scene".to_string());
        assert!(err.to_string().contains("raster error"));
        assert!(err.to_string().contains("bad scene"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ReportError = io_err.into();
        assert!(matches!(err, ReportError::Io(_)));
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(": : :").unwrap_err();
        let err: ReportError = yaml_err.into();
        assert!(matches!(err, ReportError::ThemeSpec(_)));
    }
}
