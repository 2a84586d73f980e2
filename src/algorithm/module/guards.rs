//! Demographic guards and two-way branches
//!
//! Each probabilistic cell becomes a guarded pair of weighted targets:
//! `success` with the cell probability and `fallback` with the rest.

use crate::algorithm::probability::cell::{BranchTable, Cell};
use crate::algorithm::probability::odds::round_probability;
use crate::algorithm::module::state::{ComplexBranch, Guard, Operator, TimeUnit, WeightedTarget};
use crate::models::demographics::{AgeBucket, AgeRange, Race, Sex};

#[must_use]
pub fn sex_guard(sex: Sex) -> Guard {
    Guard::Gender {
        gender: sex.gender_code(),
    }
}

fn age_bound(operator: Operator, quantity: u32) -> Guard {
    Guard::Age {
        operator,
        unit: TimeUnit::Years,
        quantity,
    }
}

#[must_use]
pub fn age_guard(age: AgeBucket) -> Guard {
    match age.range() {
        AgeRange::Below(bound) => age_bound(Operator::Less, bound),
        AgeRange::Above(bound) => age_bound(Operator::Greater, bound),
        AgeRange::Between(low, high) => Guard::And {
            conditions: vec![
                age_bound(Operator::GreaterOrEqual, low),
                age_bound(Operator::LessOrEqual, high),
            ],
        },
    }
}

#[must_use]
pub fn race_guard(race: Race) -> Guard {
    Guard::Race {
        race: race.simulator_name(),
    }
}

/// Guard selecting one cell; `None` when no dimension is stratified
#[must_use]
pub fn cell_guard(cell: &Cell) -> Option<Guard> {
    let guards = [
        cell.sex.map(sex_guard),
        cell.age.map(age_guard),
        cell.race.map(race_guard),
    ];
    Guard::all(guards.into_iter().flatten().collect())
}

/// `[success: p, fallback: 1 - p]`, both rounded
#[must_use]
pub fn weighted_pair(success: &str, fallback: &str, probability: f64) -> Vec<WeightedTarget> {
    let probability = round_probability(probability);
    vec![
        WeightedTarget {
            transition: success.to_string(),
            distribution: probability,
        },
        WeightedTarget {
            transition: fallback.to_string(),
            distribution: round_probability(1.0 - probability),
        },
    ]
}

/// Complex-transition branches for a table of cell probabilities
///
/// Skipped zero-probability cells are covered by a single trailing
/// unconditional branch to `fallback`.
#[must_use]
pub fn complex_branches(table: &BranchTable, success: &str, fallback: &str) -> Vec<ComplexBranch> {
    let mut branches: Vec<ComplexBranch> = table
        .branches()
        .iter()
        .map(|branch| ComplexBranch::Weighted {
            condition: cell_guard(&branch.cell),
            distributions: weighted_pair(success, fallback, branch.probability),
        })
        .collect();
    if table.has_fallback() {
        branches.push(ComplexBranch::Fallback {
            transition: fallback.to_string(),
        });
    }
    branches
}
