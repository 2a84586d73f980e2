//! Population priors
//!
//! Demographic priors are kept as normalized distributions over the canonical
//! buckets. Per-condition and per-symptom priors are sparse maps keyed by
//! lowercased slug, with a default of 0.5 for anything not listed.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::{GeneratorError, Result};
use crate::models::demographics::{AgeBucket, Bucket, Race, Sex};

/// Prior used for conditions and symptoms with no explicit entry
pub const DEFAULT_PRIOR: f64 = 0.5;

const SUM_TOLERANCE: f64 = 1e-9;

/// A probability distribution over the buckets of one dimension
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<B: Bucket> {
    weights: BTreeMap<B, f64>,
}

impl<B: Bucket> Distribution<B> {
    /// Equal weight on every prior bucket
    #[must_use]
    pub fn uniform() -> Self {
        let weight = 1.0 / B::PRIOR_BUCKETS.len() as f64;
        Self {
            weights: B::PRIOR_BUCKETS.iter().map(|b| (*b, weight)).collect(),
        }
    }

    /// Normalize a partially specified set of priors
    ///
    /// Entries that are `None` share whatever mass the explicit entries leave
    /// unused. With every entry explicit, the values are rescaled to sum to 1,
    /// and an all-zero section falls back to uniform.
    pub fn normalized(section: &str, entries: &[(B, Option<f64>)]) -> Result<Self> {
        for (bucket, value) in entries {
            if let Some(v) = value {
                if !v.is_finite() || *v < 0.0 {
                    return Err(GeneratorError::InvalidPrior {
                        section: section.to_string(),
                        key: bucket.slug().to_string(),
                        value: v.to_string(),
                    });
                }
            }
        }

        let explicit_sum: f64 = entries.iter().filter_map(|(_, v)| *v).sum();
        let blank_count = entries.iter().filter(|(_, v)| v.is_none()).count();

        let weights = if blank_count == 0 {
            if explicit_sum <= 0.0 {
                return Ok(Self::uniform());
            }
            let scale = if (explicit_sum - 1.0).abs() <= SUM_TOLERANCE {
                1.0
            } else {
                explicit_sum
            };
            entries
                .iter()
                .map(|(b, v)| (*b, v.unwrap_or_default() / scale))
                .collect()
        } else {
            if explicit_sum > 1.0 + SUM_TOLERANCE {
                return Err(GeneratorError::PriorOverflow {
                    section: section.to_string(),
                    sum: explicit_sum,
                });
            }
            let share = (1.0 - explicit_sum).max(0.0) / blank_count as f64;
            entries
                .iter()
                .map(|(b, v)| (*b, v.unwrap_or(share)))
                .collect()
        };

        Ok(Self { weights })
    }

    /// Weight of one bucket, 0 when the bucket carries no prior
    #[must_use]
    pub fn weight(&self, bucket: B) -> f64 {
        self.weights.get(&bucket).copied().unwrap_or_default()
    }

    /// Sum of all weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Iterate buckets and weights in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (B, f64)> + '_ {
        B::PRIOR_BUCKETS.iter().map(|b| (*b, self.weight(*b)))
    }
}

impl<B: Bucket> Default for Distribution<B> {
    fn default() -> Self {
        Self::uniform()
    }
}

/// All priors consumed by the probability engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriorTable {
    pub age: Distribution<AgeBucket>,
    pub gender: Distribution<Sex>,
    pub race: Distribution<Race>,
    conditions: FxHashMap<String, f64>,
    symptoms: FxHashMap<String, f64>,
}

impl PriorTable {
    /// Assemble a table from already normalized demographic priors
    #[must_use]
    pub fn new(
        age: Distribution<AgeBucket>,
        gender: Distribution<Sex>,
        race: Distribution<Race>,
    ) -> Self {
        Self {
            age,
            gender,
            race,
            conditions: FxHashMap::default(),
            symptoms: FxHashMap::default(),
        }
    }

    /// Set the prior of a condition, keyed by its lowercased slug
    pub fn with_condition_prior(mut self, slug: &str, prior: f64) -> Result<Self> {
        let key = slug.to_lowercase();
        check_unit("Conditions", &key, prior)?;
        self.conditions.insert(key, prior);
        Ok(self)
    }

    /// Set the prior of a symptom, keyed by its lowercased slug
    pub fn with_symptom_prior(mut self, slug: &str, prior: f64) -> Result<Self> {
        let key = slug.to_lowercase();
        check_unit("Symptoms", &key, prior)?;
        self.symptoms.insert(key, prior);
        Ok(self)
    }

    /// Prior of a condition; slugs are matched case-insensitively
    #[must_use]
    pub fn condition_prior(&self, slug: &str) -> f64 {
        self.conditions
            .get(&slug.to_lowercase())
            .copied()
            .unwrap_or(DEFAULT_PRIOR)
    }

    /// Prior of a symptom; slugs are matched case-insensitively
    #[must_use]
    pub fn symptom_prior(&self, slug: &str) -> f64 {
        self.symptoms
            .get(&slug.to_lowercase())
            .copied()
            .unwrap_or(DEFAULT_PRIOR)
    }

    /// Priors of the dimension `B` belongs to
    #[must_use]
    pub fn demographic<B: Bucket>(&self) -> &Distribution<B> {
        B::priors(self)
    }
}

fn check_unit(section: &str, key: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GeneratorError::InvalidPrior {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl fmt::Display for PriorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prior Table:")?;
        for (bucket, weight) in self.gender.iter() {
            writeln!(f, "  {}: {weight:.4}", bucket.slug())?;
        }
        for (bucket, weight) in self.age.iter() {
            writeln!(f, "  {}: {weight:.4}", bucket.slug())?;
        }
        for (bucket, weight) in self.race.iter() {
            writeln!(f, "  {}: {weight:.4}", bucket.slug())?;
        }
        writeln!(f, "  Condition priors: {}", self.conditions.len())?;
        writeln!(f, "  Symptom priors: {}", self.symptoms.len())
    }
}
