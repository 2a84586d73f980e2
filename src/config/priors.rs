//! Prior configuration files
//!
//! Priors are read from an INI document with `[Age]`, `[Gender]`, `[Race]`,
//! `[Conditions]` and `[Symptoms]` sections. Demographic sections are
//! normalized into distributions; the two sparse sections hold per-slug
//! priors in [0, 1].
//!
//! ```ini
//! [Gender]
//! sex-male = 0.49
//! sex-female =
//!
//! [Conditions]
//! appendicitis = 0.2
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::util::safe_read_to_string;
use crate::error::{GeneratorError, Result};
use crate::models::demographics::{AgeBucket, Bucket, Race, Sex};
use crate::models::priors::{DEFAULT_PRIOR, Distribution, PriorTable};

/// A parsed INI document: section name to ordered `(key, value)` pairs
#[derive(Debug, Default)]
struct IniDocument {
    sections: FxHashMap<String, Vec<(String, String)>>,
}

impl IniDocument {
    fn parse(text: &str) -> Result<Self> {
        let mut doc = Self::default();
        let mut current: Option<String> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header.strip_suffix(']').ok_or_else(|| GeneratorError::InvalidConfig {
                    line: line_no,
                    message: format!("Unterminated section header '{line}'"),
                })?;
                let name = name.trim().to_string();
                doc.sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }

            let Some(section) = current.as_ref() else {
                return Err(GeneratorError::InvalidConfig {
                    line: line_no,
                    message: "Entry appears before any section header".to_string(),
                });
            };

            let split_at = line.find(['=', ':']).ok_or_else(|| GeneratorError::InvalidConfig {
                line: line_no,
                message: format!("Expected 'key = value', got '{line}'"),
            })?;
            let key = line[..split_at].trim().to_lowercase();
            let value = line[split_at + 1..].trim().to_string();
            if key.is_empty() {
                return Err(GeneratorError::InvalidConfig {
                    line: line_no,
                    message: "Empty key".to_string(),
                });
            }

            let entries = doc.sections.entry(section.clone()).or_default();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }

        Ok(doc)
    }

    fn section(&self, name: &str) -> &[(String, String)] {
        self.sections.get(name).map_or(&[][..], Vec::as_slice)
    }

    fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse a prior value; a blank value means "unspecified"
fn parse_value(section: &str, key: &str, raw: &str) -> Result<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| GeneratorError::InvalidPrior {
            section: section.to_string(),
            key: key.to_string(),
            value: raw.to_string(),
        })
}

fn demographic<B: Bucket>(doc: &IniDocument) -> Result<Distribution<B>> {
    let section = B::DIMENSION.prior_section();
    let entries = B::PRIOR_BUCKETS
        .iter()
        .map(|bucket| {
            let value = match doc.get(section, bucket.slug()) {
                Some(raw) => parse_value(section, bucket.slug(), raw)?,
                None => None,
            };
            Ok((*bucket, value))
        })
        .collect::<Result<Vec<_>>>()?;
    Distribution::normalized(section, &entries)
}

/// Parse priors from INI text
pub fn parse_priors(text: &str) -> Result<PriorTable> {
    let doc = IniDocument::parse(text)?;

    let mut table = PriorTable::new(
        demographic::<AgeBucket>(&doc)?,
        demographic::<Sex>(&doc)?,
        demographic::<Race>(&doc)?,
    );

    for (key, raw) in doc.section("Conditions") {
        let prior = parse_value("Conditions", key, raw)?.unwrap_or(DEFAULT_PRIOR);
        table = table.with_condition_prior(key, prior)?;
    }
    for (key, raw) in doc.section("Symptoms") {
        let prior = parse_value("Symptoms", key, raw)?.unwrap_or(DEFAULT_PRIOR);
        table = table.with_symptom_prior(key, prior)?;
    }

    Ok(table)
}

/// Load priors from an optional INI file
///
/// A missing path yields the default table: uniform demographics and the
/// default prior for every condition and symptom.
pub fn load_priors(path: Option<&Path>) -> Result<PriorTable> {
    match path {
        Some(path) if !path.as_os_str().is_empty() => {
            let text = safe_read_to_string(path, "Prior configuration")?;
            let table = parse_priors(&text)?;
            log::info!("Loaded priors from {}", path.display());
            Ok(table)
        }
        _ => {
            log::info!("No prior configuration given, using uniform priors");
            Ok(PriorTable::default())
        }
    }
}
