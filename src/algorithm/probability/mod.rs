//! Conditional probability engine
//!
//! Turns odds ratios and population priors into per-cell probabilities:
//!
//! 1. Odds to probability conversion
//! 2. Prior-weighted marginals per demographic dimension
//! 3. Condition and symptom probabilities for every demographic cell
//!
//! Everything here is pure computation over borrowed catalog data and is safe
//! to run from several threads against one shared prior table.

pub mod cell;
pub mod condition;
pub mod dimension;
pub mod odds;
pub mod symptom;

// Re-export key types
pub use cell::{BranchTable, Cell, CellBranch};
pub use condition::{ConditionEngine, ConditionProbabilities, Marginals};
pub use dimension::{DimensionView, joint_marginal, marginal};
pub use odds::{PROBABILITY_DIGITS, clamp_unit, odds_to_probability, round_probability, round_to};
pub use symptom::{SymptomBranching, SymptomEngine};
