//! Symptom-level conditional probabilities
//!
//! The catalog reports a single probability for a symptom given its
//! condition, averaged over the condition's own demographic mix. Each cell
//! rescales it per stratified dimension by
//!
//! `pˢ(b) · pᶜ(b) · Dᶜ / (Mˢ · pᶜ(b))`
//!
//! where `Dᶜ` is the condition marginal and `Mˢ = Σ prior(b) · pˢ(b) · pᶜ(b)`
//! the joint marginal. A dimension the symptom is not stratified on collapses
//! to one "any bucket" factor `Dᶜ`: its symptom-side terms fall back to 1 but
//! the condition marginal stays in the product.

use itertools::iproduct;
use smallvec::SmallVec;

use crate::algorithm::probability::cell::{BranchTable, Cell, CellBranch};
use crate::algorithm::probability::dimension::{DimensionView, joint_marginal};
use crate::algorithm::probability::odds::{clamp_unit, round_probability};
use crate::error::Result;
use crate::models::catalog::RiskFactorDistribution;
use crate::models::demographics::{AgeBucket, Bucket, Race, Sex};
use crate::models::priors::PriorTable;

/// How a symptom's transition branches
#[derive(Debug, Clone, PartialEq)]
pub enum SymptomBranching {
    /// Same probability in every cell
    Flat(f64),
    /// One probability per demographic cell
    Stratified(BranchTable),
}

/// Correction factor of one bucket, kept as numerator and denominator
#[derive(Debug, Clone, Copy)]
struct Factor<B> {
    bucket: Option<B>,
    numerator: f64,
    denominator: f64,
}

#[derive(Debug, Clone)]
struct DimensionFactors<B> {
    factors: SmallVec<[Factor<B>; 8]>,
    zero_skipped: bool,
}

impl<B: Bucket> DimensionFactors<B> {
    /// Single "any bucket" factor carrying only the condition marginal
    fn unstratified(condition_marginal: f64) -> Self {
        Self {
            factors: SmallVec::from_elem(
                Factor {
                    bucket: None,
                    numerator: condition_marginal,
                    denominator: 1.0,
                },
                1,
            ),
            zero_skipped: false,
        }
    }
}

/// A cell with its unscaled correction ratio
struct CellRatio {
    cell: Cell,
    numerator: f64,
    denominator: f64,
}

/// Computes per-cell symptom probabilities against a prior table
#[derive(Debug, Clone, Copy)]
pub struct SymptomEngine<'a> {
    priors: &'a PriorTable,
}

impl<'a> SymptomEngine<'a> {
    #[must_use]
    pub const fn new(priors: &'a PriorTable) -> Self {
        Self { priors }
    }

    /// Branching of a symptom listed with `probability` (0 to 1) under a condition
    ///
    /// `symptom` is `None` for symptoms missing from the catalog. `label` only
    /// names the symptom in diagnostics.
    pub fn evaluate(
        &self,
        label: &str,
        probability: f64,
        symptom: Option<&RiskFactorDistribution>,
        condition: &RiskFactorDistribution,
    ) -> Result<SymptomBranching> {
        let Some(symptom) = symptom.filter(|s| !s.is_unstratified()) else {
            return Ok(SymptomBranching::Flat(round_probability(probability)));
        };

        let (sex, age, race) = self.factors(symptom, condition)?;
        let has_fallback = sex.zero_skipped || age.zero_skipped || race.zero_skipped;

        let mut warned = false;
        let branches = cell_ratios(&sex, &age, &race)
            .map(|ratio| {
                let value = if ratio.denominator > 0.0 {
                    round_probability(probability * ratio.numerator / ratio.denominator)
                } else {
                    0.0
                };
                if value > 1.0 && !warned {
                    warned = true;
                    log::warn!(
                        "Symptom '{label}' saturates in {:?}: probability {value:.4} exceeds 1 (admissible listed probability {:.4})",
                        ratio.cell,
                        ratio.denominator / ratio.numerator
                    );
                }
                CellBranch {
                    cell: ratio.cell,
                    probability: clamp_unit(value),
                }
            })
            .collect();

        Ok(SymptomBranching::Stratified(BranchTable::new(
            branches,
            has_fallback,
        )))
    }

    fn factors(
        &self,
        symptom: &RiskFactorDistribution,
        condition: &RiskFactorDistribution,
    ) -> Result<(
        DimensionFactors<Sex>,
        DimensionFactors<AgeBucket>,
        DimensionFactors<Race>,
    )> {
        Ok((
            self.dimension_factors(symptom, condition)?,
            self.dimension_factors(symptom, condition)?,
            self.dimension_factors(symptom, condition)?,
        ))
    }

    fn dimension_factors<B: Bucket>(
        &self,
        symptom: &RiskFactorDistribution,
        condition: &RiskFactorDistribution,
    ) -> Result<DimensionFactors<B>> {
        let symptom = DimensionView::<B>::of(symptom);
        let condition = DimensionView::<B>::of(condition);
        let priors = self.priors.demographic::<B>();

        let condition_marginal = condition.marginal(priors)?;
        if !symptom.is_stratified() {
            return Ok(DimensionFactors::unstratified(condition_marginal));
        }
        let symptom_marginal = joint_marginal(&symptom, &condition, priors)?;

        let mut factors = SmallVec::new();
        let mut zero_skipped = false;
        for &bucket in B::BRANCH_BUCKETS {
            let ps = symptom.probability(bucket)?;
            let pc = condition.probability(bucket)?;
            if ps * pc <= 0.0 {
                zero_skipped = true;
                continue;
            }
            factors.push(Factor {
                bucket: Some(bucket),
                numerator: ps * pc * condition_marginal,
                denominator: symptom_marginal * pc,
            });
        }

        Ok(DimensionFactors {
            factors,
            zero_skipped,
        })
    }
}

fn cell_ratios<'f>(
    sex: &'f DimensionFactors<Sex>,
    age: &'f DimensionFactors<AgeBucket>,
    race: &'f DimensionFactors<Race>,
) -> impl Iterator<Item = CellRatio> + 'f {
    iproduct!(sex.factors.iter(), age.factors.iter(), race.factors.iter()).map(|(s, a, r)| {
        CellRatio {
            cell: Cell::new(s.bucket, a.bucket, r.bucket),
            numerator: s.numerator * a.numerator * r.numerator,
            denominator: s.denominator * a.denominator * r.denominator,
        }
    })
}
