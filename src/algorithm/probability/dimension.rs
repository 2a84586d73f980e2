//! Per-dimension view of a risk-factor distribution
//!
//! Converts the odds of one dimension into bucket probabilities and
//! aggregates them against the population priors. An unstratified dimension
//! behaves as probability 1 in every bucket, so it drops out of every product.

use smallvec::SmallVec;

use crate::algorithm::probability::odds::odds_to_probability;
use crate::error::Result;
use crate::models::catalog::{RiskFactorDistribution, Stratification};
use crate::models::demographics::Bucket;
use crate::models::priors::Distribution;

/// One branch bucket with its probability; `None` stands for "any bucket"
pub type BranchEntry<B> = (Option<B>, f64);

/// Branch entries of one dimension, at most eight
pub type BranchEntries<B> = SmallVec<[BranchEntry<B>; 8]>;

/// Odds of one dimension seen as bucket probabilities
#[derive(Debug, Clone, Copy)]
pub struct DimensionView<'a, B: Bucket> {
    odds: &'a Stratification<B>,
}

impl<'a, B: Bucket> DimensionView<'a, B> {
    #[must_use]
    pub const fn new(odds: &'a Stratification<B>) -> Self {
        Self { odds }
    }

    /// View of the dimension `B` inside a risk-factor distribution
    #[must_use]
    pub fn of(distribution: &'a RiskFactorDistribution) -> Self {
        Self::new(distribution.dimension::<B>())
    }

    #[must_use]
    pub fn is_stratified(&self) -> bool {
        !self.odds.is_empty()
    }

    /// Probability for one bucket; 1 when unstratified
    pub fn probability(&self, bucket: B) -> Result<f64> {
        if !self.is_stratified() {
            return Ok(1.0);
        }
        odds_to_probability(self.odds.odds(bucket)?)
    }

    /// Prior-weighted marginal `Σ prior(b) · p(b)`; 1 when unstratified
    pub fn marginal(&self, priors: &Distribution<B>) -> Result<f64> {
        if !self.is_stratified() {
            return Ok(1.0);
        }
        priors
            .iter()
            .map(|(bucket, weight)| Ok(weight * self.probability(bucket)?))
            .sum()
    }

    /// Branch buckets with their probabilities, in emission order
    pub fn branch_entries(&self) -> Result<BranchEntries<B>> {
        if !self.is_stratified() {
            return Ok(SmallVec::from_elem((None, 1.0), 1));
        }
        B::BRANCH_BUCKETS
            .iter()
            .map(|bucket| Ok((Some(*bucket), self.probability(*bucket)?)))
            .collect()
    }
}

/// Marginal probability of a stratified distribution under the priors
pub fn marginal<B: Bucket>(odds: &Stratification<B>, priors: &Distribution<B>) -> Result<f64> {
    DimensionView::new(odds).marginal(priors)
}

/// Prior-weighted marginal of a symptom jointly with its condition
///
/// `Σ prior(b) · pˢ(b) · pᶜ(b)`, or 1 when the symptom is unstratified.
pub fn joint_marginal<B: Bucket>(
    symptom: &DimensionView<'_, B>,
    condition: &DimensionView<'_, B>,
    priors: &Distribution<B>,
) -> Result<f64> {
    if !symptom.is_stratified() {
        return Ok(1.0);
    }
    priors
        .iter()
        .map(|(bucket, weight)| {
            Ok(weight * symptom.probability(bucket)? * condition.probability(bucket)?)
        })
        .sum()
}
