//! Module states, transitions and guard expressions
//!
//! These types mirror the simulator's module JSON. Serialization puts the
//! `type` tag first, then the state's own fields, then its transition.

use serde::Serialize;

/// Comparison operator of a guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
}

/// Time unit of ages and delays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Months,
    Years,
}

/// Boolean expression over patient attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "condition_type")]
pub enum Guard {
    Gender {
        gender: &'static str,
    },
    Age {
        operator: Operator,
        unit: TimeUnit,
        quantity: u32,
    },
    Race {
        race: &'static str,
    },
    Attribute {
        attribute: String,
        operator: Operator,
        value: i64,
    },
    And {
        conditions: Vec<Guard>,
    },
    False,
}

impl Guard {
    /// Conjunction of guards; a single guard stays bare and none yields `None`
    #[must_use]
    pub fn all(mut guards: Vec<Self>) -> Option<Self> {
        match guards.len() {
            0 => None,
            1 => guards.pop(),
            _ => Some(Self::And { conditions: guards }),
        }
    }

    /// Integer attribute comparison
    #[must_use]
    pub fn attribute(attribute: impl Into<String>, operator: Operator, value: i64) -> Self {
        Self::Attribute {
            attribute: attribute.into(),
            operator,
            value,
        }
    }
}

/// A coded concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Code {
    pub system: String,
    pub code: String,
    pub display: String,
}

impl Code {
    #[must_use]
    pub fn new(system: impl Into<String>, code: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            code: code.into(),
            display: display.into(),
        }
    }
}

/// One weighted target of a distributed transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedTarget {
    pub transition: String,
    pub distribution: f64,
}

/// One branch of a conditional transition; a branch without a condition always matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalBranch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Guard>,
    pub transition: String,
}

/// One branch of a complex transition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComplexBranch {
    /// Weighted targets, taken when the condition holds
    Weighted {
        #[serde(skip_serializing_if = "Option::is_none")]
        condition: Option<Guard>,
        distributions: Vec<WeightedTarget>,
    },
    /// Unconditional catch-all
    Fallback { transition: String },
}

/// Outgoing transition of a state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Transition {
    #[serde(rename = "direct_transition")]
    Direct(String),
    #[serde(rename = "distributed_transition")]
    Distributed(Vec<WeightedTarget>),
    #[serde(rename = "conditional_transition")]
    Conditional(Vec<ConditionalBranch>),
    #[serde(rename = "complex_transition")]
    Complex(Vec<ComplexBranch>),
}

impl Transition {
    #[must_use]
    pub fn direct(target: impl Into<String>) -> Self {
        Self::Direct(target.into())
    }

    /// Every state name this transition can lead to
    #[must_use]
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Self::Direct(target) => vec![target.as_str()],
            Self::Distributed(weighted) => weighted.iter().map(|w| w.transition.as_str()).collect(),
            Self::Conditional(branches) => branches.iter().map(|b| b.transition.as_str()).collect(),
            Self::Complex(branches) => branches
                .iter()
                .flat_map(|branch| match branch {
                    ComplexBranch::Weighted { distributions, .. } => {
                        distributions.iter().map(|w| w.transition.as_str()).collect()
                    }
                    ComplexBranch::Fallback { transition } => vec![transition.as_str()],
                })
                .collect(),
        }
    }
}

/// Counter update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterAction {
    Increment,
    Decrement,
}

/// Fixed delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Exact {
    pub quantity: u32,
    pub unit: TimeUnit,
}

/// Severity range of a symptom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityRange {
    pub low: u32,
    pub high: u32,
}

/// What a state does, tagged by the simulator's state type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum StateKind {
    Initial,
    Terminal,
    Simple,
    Guard {
        allow: Guard,
    },
    SetAttribute {
        attribute: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        expression: Option<String>,
    },
    Counter {
        attribute: String,
        action: CounterAction,
    },
    ConditionOnset {
        codes: Vec<Code>,
        target_encounter: String,
        remarks: Vec<Option<String>>,
    },
    ConditionEnd {
        condition_onset: String,
    },
    Encounter {
        encounter_class: String,
        reason: String,
        codes: Vec<Code>,
    },
    EncounterEnd,
    Delay {
        exact: Exact,
    },
    Symptom {
        symptom: String,
        range: SeverityRange,
        condition_codes: Vec<Code>,
        symptom_code: Code,
        value_code: Code,
        remarks: Vec<Option<String>>,
    },
}

/// A module state: its kind plus at most one outgoing transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct State {
    #[serde(flatten)]
    pub kind: StateKind,
    #[serde(flatten)]
    pub transition: Option<Transition>,
}

impl State {
    /// A state with an outgoing transition
    #[must_use]
    pub const fn new(kind: StateKind, transition: Transition) -> Self {
        Self {
            kind,
            transition: Some(transition),
        }
    }

    /// A state with no outgoing transition
    #[must_use]
    pub const fn terminal() -> Self {
        Self {
            kind: StateKind::Terminal,
            transition: None,
        }
    }

    #[must_use]
    pub const fn is_initial(&self) -> bool {
        matches!(self.kind, StateKind::Initial)
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.kind, StateKind::Terminal)
    }

    /// State names reachable in one step
    #[must_use]
    pub fn targets(&self) -> Vec<&str> {
        self.transition.as_ref().map(Transition::targets).unwrap_or_default()
    }
}
