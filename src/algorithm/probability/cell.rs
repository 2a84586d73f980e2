//! Demographic cells and branch tables

use rustc_hash::FxHashMap;

use crate::models::demographics::{AgeBucket, Race, Sex};

/// A combination of one bucket per dimension
///
/// `None` means the dimension is not stratified and the cell spans all of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    pub sex: Option<Sex>,
    pub age: Option<AgeBucket>,
    pub race: Option<Race>,
}

impl Cell {
    #[must_use]
    pub const fn new(sex: Option<Sex>, age: Option<AgeBucket>, race: Option<Race>) -> Self {
        Self { sex, age, race }
    }
}

/// Probability emitted for one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBranch {
    pub cell: Cell,
    pub probability: f64,
}

/// Ordered cell probabilities of one condition or symptom
///
/// Cells whose bucket probability is zero in some dimension are not listed;
/// `has_fallback` records that at least one such cell was skipped and the
/// module must route it through a catch-all fallback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchTable {
    branches: Vec<CellBranch>,
    index: FxHashMap<Cell, usize>,
    has_fallback: bool,
}

impl BranchTable {
    #[must_use]
    pub fn new(branches: Vec<CellBranch>, has_fallback: bool) -> Self {
        let index = branches
            .iter()
            .enumerate()
            .map(|(i, b)| (b.cell, i))
            .collect();
        Self {
            branches,
            index,
            has_fallback,
        }
    }

    #[must_use]
    pub fn branches(&self) -> &[CellBranch] {
        &self.branches
    }

    #[must_use]
    pub const fn has_fallback(&self) -> bool {
        self.has_fallback
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Probability of a listed cell
    #[must_use]
    pub fn probability(&self, cell: &Cell) -> Option<f64> {
        self.index.get(cell).map(|&i| self.branches[i].probability)
    }
}
