//! Logging utilities
//!
//! Run-level messages shared by the loader, the assembler and the writer, so
//! every run reports its milestones in the same shape.

use std::path::Path;
use std::time::Duration;

use crate::config::GeneratorConfig;

/// Log the start of a generation run together with its configuration
pub fn log_run_start(config: &GeneratorConfig) {
    log::info!("Starting module generation");
    for line in config.to_string().lines() {
        log::info!("{line}");
    }
}

/// Log the size of freshly loaded catalogs
pub fn log_catalog_loaded(symptoms: usize, conditions: usize) {
    log::info!("Loaded {symptoms} symptoms and {conditions} conditions");
}

/// Log a condition that produces no module
///
/// # Arguments
/// * `key` - Catalog key of the condition
/// * `reason` - Why no module is emitted
pub fn log_skipped_condition(key: &str, reason: &str) {
    log::info!("Skipping condition '{key}': {reason}");
}

/// Log the outcome of writing modules to a directory
///
/// # Arguments
/// * `dir` - Output directory
/// * `count` - Number of module files written
/// * `elapsed` - Optional time taken by the whole run
pub fn log_modules_written(dir: &Path, count: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!(
            "Wrote {count} modules to {} in {duration:?}",
            dir.display()
        ),
        None => log::info!("Wrote {count} modules to {}", dir.display()),
    }
}

/// Log a warning, optionally tied to a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}
