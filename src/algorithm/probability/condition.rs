//! Condition-level conditional probabilities
//!
//! For every demographic cell the probability of contracting a condition is
//! the condition prior scaled by how much the cell's risk exceeds the
//! population average:
//!
//! `P(C | cell) = π · p_sex · p_age · p_race / (M_sex · M_age · M_race)`
//!
//! The prior is first capped so that no cell exceeds 1.

use itertools::iproduct;

use crate::algorithm::probability::cell::{BranchTable, Cell, CellBranch};
use crate::algorithm::probability::dimension::{BranchEntries, BranchEntry, DimensionView};
use crate::algorithm::probability::odds::{clamp_unit, round_probability};
use crate::error::Result;
use crate::models::catalog::{Condition, RiskFactorDistribution};
use crate::models::demographics::{AgeBucket, Bucket, Race, Sex};
use crate::models::priors::PriorTable;

/// Marginals of the three dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marginals {
    pub sex: f64,
    pub age: f64,
    pub race: f64,
}

impl Marginals {
    #[must_use]
    pub fn product(&self) -> f64 {
        self.sex * self.age * self.race
    }
}

/// Everything computed for one condition
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionProbabilities {
    /// Prior from the prior table
    pub raw_prior: f64,
    /// Largest prior keeping every cell within [0, 1]
    pub admissible_prior: f64,
    /// Prior actually used, the smaller of the two above
    pub effective_prior: f64,
    pub marginals: Marginals,
    pub table: BranchTable,
}

/// Computes per-cell condition probabilities against a prior table
#[derive(Debug, Clone, Copy)]
pub struct ConditionEngine<'a> {
    priors: &'a PriorTable,
}

impl<'a> ConditionEngine<'a> {
    #[must_use]
    pub const fn new(priors: &'a PriorTable) -> Self {
        Self { priors }
    }

    /// Odds-derived probability of one bucket; 1 when the dimension is unstratified
    pub fn dimension_probability<B: Bucket>(&self, condition: &Condition, bucket: B) -> Result<f64> {
        DimensionView::<B>::of(&condition.risk_factors).probability(bucket)
    }

    /// Marginals of a risk-factor distribution under the prior table
    pub fn marginals(&self, risk: &RiskFactorDistribution) -> Result<Marginals> {
        Ok(Marginals {
            sex: DimensionView::<Sex>::of(risk).marginal(&self.priors.gender)?,
            age: DimensionView::<AgeBucket>::of(risk).marginal(&self.priors.age)?,
            race: DimensionView::<Race>::of(risk).marginal(&self.priors.race)?,
        })
    }

    /// Compute the branch table of a condition
    pub fn evaluate(&self, condition: &Condition) -> Result<ConditionProbabilities> {
        let risk = &condition.risk_factors;
        let marginals = self.marginals(risk)?;

        let sexes = DimensionView::<Sex>::of(risk).branch_entries()?;
        let ages = DimensionView::<AgeBucket>::of(risk).branch_entries()?;
        let races = DimensionView::<Race>::of(risk).branch_entries()?;
        let has_fallback = has_zero(&sexes) || has_zero(&ages) || has_zero(&races);

        let numerators: Vec<(Cell, f64)> =
            iproduct!(nonzero(&sexes), nonzero(&ages), nonzero(&races))
                .map(|((sex, ps), (age, pa), (race, pr))| {
                    (Cell::new(sex, age, race), ps * pa * pr)
                })
                .collect();

        let denominator = marginals.product();
        let admissible_prior = numerators
            .iter()
            .map(|(_, numerator)| denominator / numerator)
            .fold(1.0, f64::min);
        let raw_prior = self.priors.condition_prior(&condition.slug);
        let effective_prior = raw_prior.min(admissible_prior);

        log::debug!(
            "Condition '{}': prior {raw_prior:.4}, admissible {admissible_prior:.4}, effective {effective_prior:.4}",
            condition.name
        );

        let branches = numerators
            .into_iter()
            .map(|(cell, numerator)| {
                let probability = if denominator > 0.0 {
                    clamp_unit(round_probability(effective_prior * numerator / denominator))
                } else {
                    0.0
                };
                CellBranch { cell, probability }
            })
            .collect();

        Ok(ConditionProbabilities {
            raw_prior,
            admissible_prior,
            effective_prior,
            marginals,
            table: BranchTable::new(branches, has_fallback),
        })
    }
}

fn has_zero<B: Bucket>(entries: &BranchEntries<B>) -> bool {
    entries.iter().any(|(_, p)| *p <= 0.0)
}

fn nonzero<B: Bucket>(entries: &BranchEntries<B>) -> impl Iterator<Item = BranchEntry<B>> + Clone + '_ {
    entries.iter().copied().filter(|(_, p)| *p > 0.0)
}
