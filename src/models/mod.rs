//! Domain models for module generation
//!
//! Demographic buckets, population priors and the symptom/condition catalogs
//! the probability engine reads from.

pub mod catalog;
pub mod demographics;
pub mod ordered;
pub mod priors;

// Re-export commonly used types
pub use catalog::{
    Catalog, Condition, ConditionSymptom, OddsEntry, RiskFactorDistribution, Stratification,
    Symptom, SymptomDefinition, slug_hash,
};
pub use demographics::{AgeBucket, AgeRange, Bucket, Dimension, Race, Sex, TimeBucket, TimeRange};
pub use ordered::OrderedMap;
pub use priors::{DEFAULT_PRIOR, Distribution, PriorTable};
