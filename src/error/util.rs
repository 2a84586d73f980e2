//! Utility functions for error handling
//!
//! File access helpers that attach the offending path to every failure.

use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{GeneratorError, Result};

/// Safely read a file to string with rich error information
///
/// # Arguments
/// * `path` - The path to the file to read
/// * `purpose` - Why the file is being read (for log context)
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    if !path.is_file() {
        log::warn!("{} not found at {}", purpose, path.display());
        return Err(GeneratorError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, format!("{purpose} is not a file")),
        ));
    }

    fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e))
}

/// Read and decode a JSON document
pub fn read_json<T: DeserializeOwned>(path: &Path, purpose: &str) -> Result<T> {
    let content = safe_read_to_string(path, purpose)?;
    serde_json::from_str(&content).map_err(|e| GeneratorError::json(path, e))
}

/// Ensure an output directory exists, creating it (and parents) if needed
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(GeneratorError::io(
            path,
            io::Error::new(io::ErrorKind::AlreadyExists, "Path is not a directory"),
        ));
    }
    fs::create_dir_all(path).map_err(|e| GeneratorError::io(path, e))
}
