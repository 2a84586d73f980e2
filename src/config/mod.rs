//! Configuration for module generation
//!
//! Run-level knobs for the assembly driver, plus the prior-file loader in
//! [`priors`].

pub mod priors;

use std::fmt;

pub use priors::{load_priors, parse_priors};

/// Configuration for a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Symptoms a patient must present before the doctor visit; 0 disables gating
    pub min_symptoms: usize,
    /// Years of history simulated by the shared history module
    pub num_history_years: u32,
    /// Prefix prepended to every output file stem
    pub prefix: String,
    /// Whether to build condition modules in parallel
    pub parallel: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_symptoms: 1,
            num_history_years: 1,
            prefix: String::new(),
            parallel: true,
        }
    }
}

impl GeneratorConfig {
    /// Create a builder for generator configuration
    #[must_use]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generator Configuration:")?;
        writeln!(f, "  Minimum Symptoms: {}", self.min_symptoms)?;
        writeln!(f, "  History Years: {}", self.num_history_years)?;
        if !self.prefix.is_empty() {
            writeln!(f, "  File Prefix: {}", self.prefix)?;
        }
        writeln!(f, "  Parallel: {}", self.parallel)
    }
}

/// Builder for constructing generator configuration
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }

    /// Set the number of symptoms required before the doctor visit
    #[must_use]
    pub const fn min_symptoms(mut self, count: usize) -> Self {
        self.config.min_symptoms = count;
        self
    }

    /// Set the number of simulated history years
    #[must_use]
    pub const fn num_history_years(mut self, years: u32) -> Self {
        self.config.num_history_years = years;
        self
    }

    /// Set the output file prefix
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Set whether to use parallel processing
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}
