//! Demographic risk-factor buckets
//!
//! Sex, age and race categories as exposed by the symptom/condition catalogs,
//! together with the `Bucket` trait that lets the probability engine treat the
//! three dimensions uniformly. `TimeBucket` covers the remaining-time ranges
//! used by the history module.

use std::fmt;
use std::hash::Hash;

use crate::models::catalog::{RiskFactorDistribution, Stratification};
use crate::models::priors::{Distribution, PriorTable};

/// One of the three risk-factor dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Sex,
    Age,
    Race,
}

impl Dimension {
    /// Lowercase name used in catalogs and error messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sex => "sex",
            Self::Age => "age",
            Self::Race => "race",
        }
    }

    /// Section holding this dimension's priors in a prior configuration file
    #[must_use]
    pub const fn prior_section(self) -> &'static str {
        match self {
            Self::Sex => "Gender",
            Self::Age => "Age",
            Self::Race => "Race",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A categorical bucket of one risk-factor dimension
pub trait Bucket: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Dimension this bucket belongs to
    const DIMENSION: Dimension;

    /// Every bucket carrying a population prior, in canonical order
    const PRIOR_BUCKETS: &'static [Self];

    /// Buckets in the order their branches are emitted
    const BRANCH_BUCKETS: &'static [Self];

    /// Catalog/config slug, e.g. `sex-male`
    fn slug(self) -> &'static str;

    /// Bucket whose odds stand in for this one in catalog lookups
    fn lookup_key(self) -> Self {
        self
    }

    /// Parse a catalog/config slug
    fn from_slug(slug: &str) -> Option<Self> {
        Self::PRIOR_BUCKETS.iter().copied().find(|b| b.slug() == slug)
    }

    /// This dimension's population priors
    fn priors(table: &PriorTable) -> &Distribution<Self>;

    /// This dimension's odds inside a risk-factor distribution
    fn stratification(distribution: &RiskFactorDistribution) -> &Stratification<Self>;
}

/// Sex bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Gender code understood by the simulator
    #[must_use]
    pub const fn gender_code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl Bucket for Sex {
    const DIMENSION: Dimension = Dimension::Sex;
    const PRIOR_BUCKETS: &'static [Self] = &[Self::Male, Self::Female];
    const BRANCH_BUCKETS: &'static [Self] = &[Self::Male, Self::Female];

    fn slug(self) -> &'static str {
        match self {
            Self::Male => "sex-male",
            Self::Female => "sex-female",
        }
    }

    fn priors(table: &PriorTable) -> &Distribution<Self> {
        &table.gender
    }

    fn stratification(distribution: &RiskFactorDistribution) -> &Stratification<Self> {
        &distribution.sex
    }
}

/// Inclusive age range of a bucket, in years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeRange {
    /// Younger than the bound
    Below(u32),
    /// Between both bounds, inclusive
    Between(u32, u32),
    /// Older than the bound
    Above(u32),
}

/// Age bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBucket {
    UnderOne,
    OneToFour,
    FiveToFourteen,
    FifteenToTwentyNine,
    ThirtyToFortyFour,
    FortyFiveToFiftyNine,
    SixtyToSeventyFour,
    SeventyFivePlus,
}

impl AgeBucket {
    /// Age range covered by this bucket
    #[must_use]
    pub const fn range(self) -> AgeRange {
        match self {
            Self::UnderOne => AgeRange::Below(1),
            Self::OneToFour => AgeRange::Between(1, 4),
            Self::FiveToFourteen => AgeRange::Between(5, 14),
            Self::FifteenToTwentyNine => AgeRange::Between(15, 29),
            Self::ThirtyToFortyFour => AgeRange::Between(30, 44),
            Self::FortyFiveToFiftyNine => AgeRange::Between(45, 59),
            Self::SixtyToSeventyFour => AgeRange::Between(60, 74),
            Self::SeventyFivePlus => AgeRange::Above(75),
        }
    }
}

const ALL_AGES: &[AgeBucket] = &[
    AgeBucket::UnderOne,
    AgeBucket::OneToFour,
    AgeBucket::FiveToFourteen,
    AgeBucket::FifteenToTwentyNine,
    AgeBucket::ThirtyToFortyFour,
    AgeBucket::FortyFiveToFiftyNine,
    AgeBucket::SixtyToSeventyFour,
    AgeBucket::SeventyFivePlus,
];

impl Bucket for AgeBucket {
    const DIMENSION: Dimension = Dimension::Age;
    const PRIOR_BUCKETS: &'static [Self] = ALL_AGES;
    const BRANCH_BUCKETS: &'static [Self] = ALL_AGES;

    fn slug(self) -> &'static str {
        match self {
            Self::UnderOne => "age-1-years",
            Self::OneToFour => "age-1-4-years",
            Self::FiveToFourteen => "age-5-14-years",
            Self::FifteenToTwentyNine => "age-15-29-years",
            Self::ThirtyToFortyFour => "age-30-44-years",
            Self::FortyFiveToFiftyNine => "age-45-59-years",
            Self::SixtyToSeventyFour => "age-60-74-years",
            Self::SeventyFivePlus => "age-75-years",
        }
    }

    fn priors(table: &PriorTable) -> &Distribution<Self> {
        &table.age
    }

    fn stratification(distribution: &RiskFactorDistribution) -> &Stratification<Self> {
        &distribution.age
    }
}

/// Race/ethnicity bucket
///
/// Catalogs only publish black, hispanic, white and other. The simulator
/// distinguishes asian and native as well, so those two borrow the odds
/// published under `other` while keeping their own population prior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Race {
    Black,
    Hispanic,
    White,
    Other,
    Asian,
    Native,
}

impl Race {
    /// Race name understood by the simulator
    #[must_use]
    pub const fn simulator_name(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::Hispanic => "Hispanic",
            Self::White => "White",
            Self::Other => "Other",
            Self::Asian => "Asian",
            Self::Native => "Native",
        }
    }
}

impl Bucket for Race {
    const DIMENSION: Dimension = Dimension::Race;
    const PRIOR_BUCKETS: &'static [Self] = &[
        Self::Black,
        Self::Hispanic,
        Self::White,
        Self::Other,
        Self::Asian,
        Self::Native,
    ];
    const BRANCH_BUCKETS: &'static [Self] = &[
        Self::Black,
        Self::Hispanic,
        Self::White,
        Self::Native,
        Self::Asian,
        Self::Other,
    ];

    fn slug(self) -> &'static str {
        match self {
            Self::Black => "race-ethnicity-black",
            Self::Hispanic => "race-ethnicity-hispanic",
            Self::White => "race-ethnicity-white",
            Self::Other => "race-ethnicity-other",
            Self::Asian => "race-ethnicity-asian",
            Self::Native => "race-ethnicity-native",
        }
    }

    fn lookup_key(self) -> Self {
        match self {
            Self::Asian | Self::Native => Self::Other,
            other => other,
        }
    }

    fn priors(table: &PriorTable) -> &Distribution<Self> {
        &table.race
    }

    fn stratification(distribution: &RiskFactorDistribution) -> &Stratification<Self> {
        &distribution.race
    }
}

/// Years left before the simulation's target age, as bucketed by the history module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeBucket {
    UpToOne,
    OneToFive,
    FiveToFifteen,
    FifteenToThirty,
    ThirtyToFortyFive,
    FortyFiveToSixty,
    SixtyToSeventyFive,
    OverSeventyFive,
}

/// Range of remaining years covered by a `TimeBucket`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    /// At most the bound
    AtMost(u32),
    /// Above the first bound, at most the second
    Within(u32, u32),
    /// Above the bound
    Above(u32),
}

impl TimeBucket {
    pub const ALL: &'static [Self] = &[
        Self::UpToOne,
        Self::OneToFive,
        Self::FiveToFifteen,
        Self::FifteenToThirty,
        Self::ThirtyToFortyFive,
        Self::FortyFiveToSixty,
        Self::SixtyToSeventyFive,
        Self::OverSeventyFive,
    ];

    #[must_use]
    pub const fn range(self) -> TimeRange {
        match self {
            Self::UpToOne => TimeRange::AtMost(1),
            Self::OneToFive => TimeRange::Within(1, 5),
            Self::FiveToFifteen => TimeRange::Within(5, 15),
            Self::FifteenToThirty => TimeRange::Within(15, 30),
            Self::ThirtyToFortyFive => TimeRange::Within(30, 45),
            Self::FortyFiveToSixty => TimeRange::Within(45, 60),
            Self::SixtyToSeventyFive => TimeRange::Within(60, 75),
            Self::OverSeventyFive => TimeRange::Above(75),
        }
    }
}
