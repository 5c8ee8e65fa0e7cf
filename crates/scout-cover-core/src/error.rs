//! Error types for scout-cover.
//! Only configuration conflicts and input problems are errors; an incomplete
//! cover or a missing mandatory team is reported through the returned data.

use std::fmt;

use crate::Resource;

pub type CoverResult<T> = Result<T, CoverError>;

/// Main error type for scout-cover operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverError {
    /// The mandatory team is also on the exclusion list
    MandatoryExcluded { resource: Resource },
    /// A configuration value is out of range
    InvalidConfig { field: String, reason: String },
    /// Reading event data failed
    Io {
        operation: String,
        path: Option<String>,
        source: String,
    },
    /// Event data was not valid JSON
    Parse { path: String, source: String },
    /// A data source produced no events at all
    NoEventData { path: String },
}

impl CoverError {
    pub(crate) fn io(operation: &str, path: &std::path::Path, err: std::io::Error) -> Self {
        CoverError::Io {
            operation: operation.to_string(),
            path: Some(path.display().to_string()),
            source: err.to_string(),
        }
    }
}

impl fmt::Display for CoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverError::MandatoryExcluded { resource } => write!(
                f,
                "Team {} is required but also in the excluded teams list",
                resource
            ),
            CoverError::InvalidConfig { field, reason } => {
                write!(f, "Configuration error in {}: {}", field, reason)
            }
            CoverError::Io {
                operation,
                path,
                source,
            } => {
                write!(f, "I/O error in {}: {}", operation, source)?;
                if let Some(path) = path {
                    write!(f, " (path: {})", path)?;
                }
                Ok(())
            }
            CoverError::Parse { path, source } => {
                write!(f, "Invalid event data in {}: {}", path, source)
            }
            CoverError::NoEventData { path } => write!(f, "No event data found in {}", path),
        }
    }
}

impl std::error::Error for CoverError {}
