//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating `nbsite.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("Failed to read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("Invalid config file")]
    Toml(#[from] toml::de::Error),

    /// A field value fails a semantic check.
    #[error("Invalid config value: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_names_the_file() {
        let err = ConfigError::Io(
            PathBuf::from("nbsite.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{err}");
        assert!(display.contains("Failed to read config"));
        assert!(display.contains("nbsite.toml"));
    }

    #[test]
    fn test_validation_error_carries_detail() {
        let err = ConfigError::Validation("[notebook.ext] must name at least one extension".into());
        assert!(format!("{err}").contains("[notebook.ext]"));
    }
}
