//! Symptom and condition catalogs
//!
//! Typed views of the two JSON documents produced by the Symcat scraper:
//! a symptom catalog keyed by symptom slug, and a condition catalog keyed by
//! condition slug, each condition carrying its symptom listing and its
//! demographic odds ratios.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use sha2::{Digest, Sha224};

use crate::error::util::read_json;
use crate::error::{GeneratorError, Result};
use crate::models::demographics::{AgeBucket, Bucket, Race, Sex};
use crate::models::ordered::OrderedMap;
use crate::utils::logging::log_catalog_loaded;

/// Hex-encoded SHA-224 digest of a slug, used as a stable code
#[must_use]
pub fn slug_hash(slug: &str) -> String {
    let digest = Sha224::digest(slug.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Odds ratio published for one bucket
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OddsEntry {
    #[serde(default)]
    pub name: String,
    pub odds: f64,
}

impl OddsEntry {
    #[must_use]
    pub fn new(odds: f64) -> Self {
        Self {
            name: String::new(),
            odds,
        }
    }
}

/// Odds ratios of one dimension, keyed by bucket
///
/// An empty stratification means the entity is not stratified on that
/// dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Stratification<B: Bucket> {
    entries: BTreeMap<B, OddsEntry>,
}

impl<B: Bucket> Stratification<B> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Builder-style insertion of one bucket's odds
    #[must_use]
    pub fn with(mut self, bucket: B, odds: f64) -> Self {
        self.entries.insert(bucket, OddsEntry::new(odds));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Odds entry stored under exactly this bucket
    #[must_use]
    pub fn get(&self, bucket: B) -> Option<&OddsEntry> {
        self.entries.get(&bucket)
    }

    /// Odds for a bucket after redirecting it to its lookup key
    pub fn odds(&self, bucket: B) -> Result<f64> {
        let key = bucket.lookup_key();
        self.entries
            .get(&key)
            .map(|e| e.odds)
            .ok_or(GeneratorError::MissingBucket {
                dimension: B::DIMENSION.name(),
                bucket: key.slug(),
            })
    }
}

impl<B: Bucket> Default for Stratification<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Bucket> TryFrom<BTreeMap<String, OddsEntry>> for Stratification<B> {
    type Error = GeneratorError;

    fn try_from(raw: BTreeMap<String, OddsEntry>) -> Result<Self> {
        let entries = raw
            .into_iter()
            .map(|(key, entry)| match B::from_slug(&key) {
                Some(bucket) => Ok((bucket, entry)),
                None => Err(GeneratorError::UnknownBucket {
                    dimension: B::DIMENSION.name(),
                    key,
                }),
            })
            .collect::<Result<_>>()?;
        Ok(Self { entries })
    }
}

impl<'de, B: Bucket> Deserialize<'de> for Stratification<B> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, OddsEntry>::deserialize(deserializer)?;
        Self::try_from(raw).map_err(D::Error::custom)
    }
}

/// Demographic odds ratios of a condition or symptom
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RiskFactorDistribution {
    pub sex: Stratification<Sex>,
    pub age: Stratification<AgeBucket>,
    pub race: Stratification<Race>,
}

impl RiskFactorDistribution {
    /// Odds of the dimension `B` belongs to
    #[must_use]
    pub fn dimension<B: Bucket>(&self) -> &Stratification<B> {
        B::stratification(self)
    }

    /// True when no dimension carries any odds
    #[must_use]
    pub fn is_unstratified(&self) -> bool {
        self.sex.is_empty() && self.age.is_empty() && self.race.is_empty()
    }
}

/// One symptom listed under a condition
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConditionSymptom {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Percentage of patients with the condition presenting the symptom
    pub probability: f64,
}

/// A condition with its symptom listing and odds ratios
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    #[serde(rename = "condition_name", alias = "name")]
    pub name: String,
    #[serde(rename = "condition_slug", alias = "slug", default)]
    pub slug: String,
    #[serde(rename = "condition_description", default)]
    pub description: Option<String>,
    #[serde(rename = "condition_remarks", default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub symptoms: OrderedMap<ConditionSymptom>,
    #[serde(flatten)]
    pub risk_factors: RiskFactorDistribution,
}

/// A symptom definition from the symptom catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Symptom {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub risk_factors: RiskFactorDistribution,
}

/// Symptom and condition catalogs loaded together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub symptoms: BTreeMap<String, Symptom>,
    pub conditions: OrderedMap<Condition>,
}

impl Catalog {
    /// Build a catalog, filling slugs and hashes left implicit by the documents
    #[must_use]
    pub fn new(symptoms: BTreeMap<String, Symptom>, conditions: OrderedMap<Condition>) -> Self {
        let mut catalog = Self {
            symptoms,
            conditions,
        };
        catalog.fill_implicit_fields();
        catalog
    }

    /// Load both catalogs from JSON files
    pub fn from_files(symptoms_path: &Path, conditions_path: &Path) -> Result<Self> {
        let symptoms = read_json(symptoms_path, "Symptom catalog")?;
        let conditions = read_json(conditions_path, "Condition catalog")?;
        let catalog = Self::new(symptoms, conditions);
        log_catalog_loaded(catalog.symptoms.len(), catalog.conditions.len());
        Ok(catalog)
    }

    /// Parse both catalogs from JSON text
    pub fn from_json_str(symptoms: &str, conditions: &str) -> Result<Self> {
        let symptoms =
            serde_json::from_str(symptoms).map_err(|e| GeneratorError::json("<symptoms>", e))?;
        let conditions =
            serde_json::from_str(conditions).map_err(|e| GeneratorError::json("<conditions>", e))?;
        Ok(Self::new(symptoms, conditions))
    }

    /// Definition of a symptom, or a synthetic one when the catalog lacks it
    #[must_use]
    pub fn symptom_definition<'a>(&'a self, slug: &'a str) -> SymptomDefinition<'a> {
        match self.symptoms.get(slug) {
            Some(symptom) => SymptomDefinition::Known(symptom),
            None => SymptomDefinition::Synthetic {
                slug,
                hash: slug_hash(slug),
            },
        }
    }

    fn fill_implicit_fields(&mut self) {
        for (key, symptom) in &mut self.symptoms {
            if symptom.slug.is_empty() {
                symptom.slug.clone_from(key);
            }
            if symptom.hash.is_empty() {
                symptom.hash = slug_hash(&symptom.slug);
            }
        }
        for (key, condition) in self.conditions.iter_mut() {
            if condition.slug.is_empty() {
                condition.slug = key.to_string();
            }
            for (symptom_key, listing) in condition.symptoms.iter_mut() {
                if listing.slug.is_empty() {
                    listing.slug = symptom_key.to_string();
                }
            }
        }
    }
}

/// A symptom as seen by the module builder
#[derive(Debug, Clone)]
pub enum SymptomDefinition<'a> {
    Known(&'a Symptom),
    /// Listed by a condition but absent from the symptom catalog
    Synthetic { slug: &'a str, hash: String },
}

impl SymptomDefinition<'_> {
    /// Odds ratios, absent for synthetic symptoms
    #[must_use]
    pub fn risk_factors(&self) -> Option<&RiskFactorDistribution> {
        match self {
            Self::Known(symptom) => Some(&symptom.risk_factors),
            Self::Synthetic { .. } => None,
        }
    }
}
