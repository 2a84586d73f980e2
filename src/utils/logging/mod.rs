//! Logging utilities for run reporting and progress tracking

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use log::{
    log_catalog_loaded, log_modules_written, log_run_start, log_skipped_condition, log_warning,
};
pub use progress::{create_main_progress_bar, finish_progress_bar};
