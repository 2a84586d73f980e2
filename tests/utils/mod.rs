use std::fs;
use std::path::{Path, PathBuf};

use symcat_modules::models::{Catalog, Condition, OrderedMap, RiskFactorDistribution};

/// Symptom catalog with one stratified and one unstratified symptom
pub const SYMPTOMS_JSON: &str = r#"{
    "abdominal-distention": {
        "name": "Abdominal distention",
        "description": "Swelling of the abdomen"
    },
    "vomiting": {
        "name": "Vomiting",
        "description": "Forceful expulsion of stomach contents",
        "sex": {
            "sex-male": {"name": "Male", "odds": 2.0},
            "sex-female": {"name": "Female", "odds": 0.5}
        }
    }
}"#;

/// Condition catalog around the appendicitis example
pub const CONDITIONS_JSON: &str = r#"{
    "appendicitis": {
        "condition_name": "Appendicitis",
        "condition_slug": "appendicitis",
        "condition_description": "Inflammation of the appendix",
        "condition_remarks": null,
        "symptoms": {
            "vomiting": {"slug": "vomiting", "name": "Vomiting", "probability": 30},
            "abdominal-distention": {"slug": "abdominal-distention", "name": "Abdominal distention", "probability": 91}
        },
        "sex": {
            "sex-male": {"name": "Male", "odds": 1.3},
            "sex-female": {"name": "Female", "odds": 0.8}
        }
    },
    "headache": {
        "condition_name": "Headache",
        "condition_slug": "headache",
        "symptoms": {}
    }
}"#;

/// Parsed fixture catalog
#[must_use]
pub fn fixture_catalog() -> Catalog {
    Catalog::from_json_str(SYMPTOMS_JSON, CONDITIONS_JSON).expect("fixture catalog parses")
}

/// A symptomless condition carrying the given odds
#[must_use]
pub fn condition_with(risk: RiskFactorDistribution) -> Condition {
    Condition {
        name: "Test Condition".to_string(),
        slug: "test-condition".to_string(),
        description: None,
        remarks: None,
        symptoms: OrderedMap::new(),
        risk_factors: risk,
    }
}

/// Write a fixture file into `dir` and return its path
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("fixture file is writable");
    path
}

/// Assert two probabilities agree to within `tolerance`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
