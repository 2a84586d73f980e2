//! Error handling for module generation.

pub mod util;

use std::{io, path::PathBuf};

/// Errors raised while turning risk-factor data into module graphs
///
/// Every variant except the I/O ones signals malformed upstream data. None of
/// them are recoverable: the run stops instead of emitting wrong numbers.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Error opening, reading or writing a file
    #[error("IO error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error decoding or encoding a JSON document
    #[error("JSON error for {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Odds ratio below zero
    #[error("Odds must be non-negative, got {odds}")]
    NegativeOdds { odds: f64 },

    /// Odds ratio that is NaN or infinite
    #[error("Odds must be finite, got {odds}")]
    NonFiniteOdds { odds: f64 },

    /// A stratified distribution lacks one of the canonical buckets
    #[error("Missing {dimension} bucket '{bucket}' in a stratified distribution")]
    MissingBucket {
        dimension: &'static str,
        bucket: &'static str,
    },

    /// A catalog key outside the canonical bucket set
    #[error("Unknown {dimension} bucket '{key}'")]
    UnknownBucket { dimension: &'static str, key: String },

    /// Prior outside its admissible range or not a number
    #[error("Invalid prior [{section}] {key} = {value}")]
    InvalidPrior {
        section: String,
        key: String,
        value: String,
    },

    /// Explicit priors leave no room for the unspecified buckets
    #[error("Priors in [{section}] sum to {sum}, which exceeds 1 while some entries are unspecified")]
    PriorOverflow { section: String, sum: f64 },

    /// Malformed line in a prior configuration file
    #[error("Config error on line {line}: {message}")]
    InvalidConfig { line: usize, message: String },

    /// Symptom listing probability outside [0, 100]
    #[error("Symptom '{symptom}' of condition '{condition}' has probability {probability}, expected 0..=100")]
    InvalidSymptomProbability {
        condition: String,
        symptom: String,
        probability: f64,
    },

    /// Built module violates a graph invariant
    #[error("Invalid module graph '{module}': {message}")]
    InvalidGraph { module: String, message: String },
}

impl GeneratorError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a JSON error with the path it concerns
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Build a graph invariant error
    pub fn invalid_graph(module: &str, message: impl Into<String>) -> Self {
        Self::InvalidGraph {
            module: module.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for module generation
pub type Result<T> = std::result::Result<T, GeneratorError>;
