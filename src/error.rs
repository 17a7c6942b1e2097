use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown page: '{name}'")]
    UnknownPage {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Unknown sort algorithm: '{0}' (expected 'hoare' or 'lomuto')")]
    UnknownAlgorithm(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Storage error for key '{key}': {reason}")]
    Storage { key: String, reason: String },
}

impl GalleryError {
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn storage(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Storage {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Hint to show next to the error, if any.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::UnknownPage { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_page_message() {
        let err = GalleryError::UnknownPage {
            name: "bilder".to_string(),
            suggestion: Some("builder".to_string()),
        };
        assert_eq!(err.to_string(), "Unknown page: 'bilder'");
        assert_eq!(err.suggestion(), Some("builder"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: GalleryError = io_err.into();
        assert!(matches!(err, GalleryError::Io(_)));
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn test_invalid_config_message() {
        let err = GalleryError::invalid_config("sort.sample_size", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'sort.sample_size': must be at least 1"
        );
    }
}
