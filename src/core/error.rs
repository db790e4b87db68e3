//! Error types for data file loading.

use thiserror::Error;

/// Errors that can occur when loading hero or run configuration data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A run asked for a hero that no template defines.
    #[error("Unknown hero '{0}'")]
    UnknownHero(String),

    /// A data file parsed but described nothing usable.
    #[error("No entries in '{0}'")]
    Empty(String),
}

/// Read a RON file into `T`, mapping each failure to a `DataLoadError`.
pub fn read_ron<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T, DataLoadError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }
    let contents = std::fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: display,
        details: e.to_string(),
    })
}
