//! A Rust library for turning Symcat symptom and condition risk-factor odds
//! into calibrated, demographically stratified module graphs for a synthetic
//! patient simulator.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{GeneratorConfig, GeneratorConfigBuilder, load_priors, parse_priors};
pub use error::{GeneratorError, Result};
pub use models::{Catalog, Condition, PriorTable, Symptom};

// Probability engine
pub use algorithm::probability::{ConditionEngine, SymptomEngine, odds_to_probability};

// Module graphs
pub use algorithm::module::{ConditionModuleBuilder, ModuleGraph, build_history_module};

// Assembly driver
pub use algorithm::assembly::{
    GeneratedModule, ModuleAssembler, RunPaths, render_module, run, write_modules,
};
