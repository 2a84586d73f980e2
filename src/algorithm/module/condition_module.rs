//! Condition module builder
//!
//! Lays out one condition's module:
//!
//! 1. `Initial`, the history guard and `Potential_Infection`, which branches
//!    per demographic cell into the condition onset or `No_Infection`
//! 2. An optional symptom counter, then the onset itself
//! 3. The symptom chain, least likely symptom first
//! 4. The doctor visit, the condition end and `TerminalState`
//!
//! Symptom states keep the 1-based position of the symptom in the catalog
//! listing as their suffix, so names do not depend on chain order.

use crate::algorithm::module::graph::{INITIAL_STATE, ModuleGraph, ModuleGraphBuilder, TERMINAL_STATE};
use crate::algorithm::module::guards::{complex_branches, weighted_pair};
use crate::algorithm::module::history::HISTORY_AGE_ATTRIBUTE;
use crate::algorithm::module::state::{
    Code, ConditionalBranch, CounterAction, Guard, Operator, SeverityRange, State, StateKind,
    Transition,
};
use crate::algorithm::probability::{ConditionEngine, SymptomBranching, SymptomEngine};
use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::models::catalog::{Catalog, Condition, ConditionSymptom, SymptomDefinition, slug_hash};
use crate::models::priors::PriorTable;

const CHECK_HISTORY: &str = "Check_History_Age_Attribute";
const POTENTIAL_INFECTION: &str = "Potential_Infection";
const NO_INFECTION: &str = "No_Infection";
const INIT_SYMPTOM_COUNTER: &str = "Init_Symptom_Counter";
const DOCTOR_VISIT: &str = "Doctor_Visit";
const END_DOCTOR_VISIT: &str = "End_Doctor_Visit";
const CONDITION_ENDS: &str = "ConditionEnds";

const HASH_SYSTEM: &str = "sha224";
const SYMPTOM_SEVERITY: SeverityRange = SeverityRange { low: 25, high: 50 };

/// One symptom in chain order
#[derive(Debug, Clone, Copy)]
struct ChainLink<'c> {
    /// 1-based position in the catalog listing
    index: usize,
    listing: &'c ConditionSymptom,
    /// Listed probability scaled to [0, 1]
    probability: f64,
}

fn simple_transition_name(index: usize) -> String {
    format!("Simple_Transition_{index}")
}

fn symptom_name(index: usize) -> String {
    format!("Symptom_{index}")
}

/// Name of the onset state, e.g. `Acute_Sinusitis_Infection`
#[must_use]
pub fn infection_state_name(condition: &Condition) -> String {
    format!("{}_Infection", condition.name.replace(' ', "_"))
}

/// Builds condition modules against a catalog and prior table
#[derive(Debug, Clone, Copy)]
pub struct ConditionModuleBuilder<'a> {
    catalog: &'a Catalog,
    priors: &'a PriorTable,
    min_symptoms: usize,
}

impl<'a> ConditionModuleBuilder<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog, priors: &'a PriorTable, config: &GeneratorConfig) -> Self {
        Self {
            catalog,
            priors,
            min_symptoms: config.min_symptoms,
        }
    }

    /// Build the module of one condition; `None` when it lists no symptoms
    pub fn build(&self, condition: &Condition) -> Result<Option<ModuleGraph>> {
        let links = chain(condition)?;
        let Some(first) = links.first() else {
            return Ok(None);
        };

        let gated = self.min_symptoms > 0;
        let infection = infection_state_name(condition);
        let counter = format!("count_symptom_{}", condition.slug);
        let condition_code = Code::new(HASH_SYSTEM, slug_hash(&condition.slug), &condition.name);
        let probabilities = ConditionEngine::new(self.priors).evaluate(condition)?;

        let mut builder = ModuleGraph::builder(&condition.name);
        builder.push(
            INITIAL_STATE,
            State::new(StateKind::Initial, Transition::direct(CHECK_HISTORY)),
        )?;
        builder.push(
            CHECK_HISTORY,
            State::new(
                StateKind::Guard {
                    allow: Guard::attribute(HISTORY_AGE_ATTRIBUTE, Operator::LessOrEqual, 0),
                },
                Transition::direct(POTENTIAL_INFECTION),
            ),
        )?;
        builder.push(
            POTENTIAL_INFECTION,
            State::new(
                StateKind::Simple,
                Transition::Complex(complex_branches(&probabilities.table, &infection, NO_INFECTION)),
            ),
        )?;
        builder.push(
            NO_INFECTION,
            State::new(StateKind::Simple, Transition::direct(TERMINAL_STATE)),
        )?;

        let mut onset_next = simple_transition_name(first.index);
        if gated {
            builder.push(
                INIT_SYMPTOM_COUNTER,
                State::new(
                    StateKind::SetAttribute {
                        attribute: counter.clone(),
                        value: Some(0),
                        expression: None,
                    },
                    Transition::direct(onset_next),
                ),
            )?;
            onset_next = INIT_SYMPTOM_COUNTER.to_string();
        }

        builder.push(
            infection.as_str(),
            State::new(
                StateKind::ConditionOnset {
                    codes: vec![condition_code.clone()],
                    target_encounter: DOCTOR_VISIT.to_string(),
                    remarks: vec![condition.description.clone(), condition.remarks.clone()],
                },
                Transition::direct(onset_next),
            ),
        )?;

        let symptoms = SymptomEngine::new(self.priors);
        for (position, link) in links.iter().enumerate() {
            let next = links
                .get(position + 1)
                .map_or_else(|| DOCTOR_VISIT.to_string(), |l| simple_transition_name(l.index));
            let remaining = links.len() - position;
            self.push_symptom(
                &mut builder,
                &symptoms,
                condition,
                &condition_code,
                &counter,
                link,
                &next,
                gated && remaining <= self.min_symptoms,
            )?;
        }

        builder.push(
            DOCTOR_VISIT,
            State::new(
                StateKind::Encounter {
                    encounter_class: "ambulatory".to_string(),
                    reason: format!("{}_Infection", condition.name),
                    codes: vec![Code::new("SNOMED-CT", "185345009", "Encounter for symptom")],
                },
                Transition::direct(END_DOCTOR_VISIT),
            ),
        )?;
        builder.push(
            END_DOCTOR_VISIT,
            State::new(StateKind::EncounterEnd, Transition::direct(CONDITION_ENDS)),
        )?;
        builder.push(
            CONDITION_ENDS,
            State::new(
                StateKind::ConditionEnd {
                    condition_onset: infection,
                },
                Transition::direct(TERMINAL_STATE),
            ),
        )?;
        builder.push(TERMINAL_STATE, State::terminal())?;

        builder.build().map(Some)
    }

    /// Append `Inc_Symptom_i`, `Check_Symptom_i`, `Simple_Transition_i` and `Symptom_i`
    #[allow(clippy::too_many_arguments)]
    fn push_symptom(
        &self,
        builder: &mut ModuleGraphBuilder,
        engine: &SymptomEngine<'_>,
        condition: &Condition,
        condition_code: &Code,
        counter: &str,
        link: &ChainLink<'_>,
        next: &str,
        check_count: bool,
    ) -> Result<()> {
        let index = link.index;
        let symptom_state = symptom_name(index);

        let mut after_symptom = next.to_string();
        if self.min_symptoms > 0 {
            let inc = format!("Inc_Symptom_{index}");
            builder.push(
                inc.as_str(),
                State::new(
                    StateKind::Counter {
                        attribute: counter.to_string(),
                        action: CounterAction::Increment,
                    },
                    Transition::direct(next),
                ),
            )?;
            after_symptom = inc;
        }

        let mut missed = next.to_string();
        if check_count {
            let check = format!("Check_Symptom_{index}");
            builder.push(
                check.as_str(),
                State::new(
                    StateKind::Simple,
                    Transition::Conditional(vec![
                        ConditionalBranch {
                            condition: Some(Guard::attribute(
                                counter,
                                Operator::Less,
                                i64::try_from(self.min_symptoms).unwrap_or(i64::MAX),
                            )),
                            transition: symptom_state.clone(),
                        },
                        ConditionalBranch {
                            condition: None,
                            transition: next.to_string(),
                        },
                    ]),
                ),
            )?;
            missed = check;
        }

        let definition = self.catalog.symptom_definition(&link.listing.slug);
        let label = format!("{}' of condition '{}", link.listing.slug, condition.name);
        let branching = engine.evaluate(
            &label,
            link.probability,
            definition.risk_factors(),
            &condition.risk_factors,
        )?;
        let transition = match branching {
            SymptomBranching::Flat(p) => {
                Transition::Distributed(weighted_pair(&symptom_state, &missed, p))
            }
            SymptomBranching::Stratified(table) => {
                Transition::Complex(complex_branches(&table, &symptom_state, &missed))
            }
        };
        builder.push(
            simple_transition_name(index),
            State::new(StateKind::Simple, transition),
        )?;

        builder.push(
            symptom_state.as_str(),
            State::new(
                symptom_kind(&definition, condition_code),
                Transition::direct(after_symptom),
            ),
        )?;
        Ok(())
    }
}

/// Validate the listing and order it by ascending probability, ties by position
fn chain(condition: &Condition) -> Result<Vec<ChainLink<'_>>> {
    let mut links = condition
        .symptoms
        .iter()
        .enumerate()
        .map(|(position, (key, listing))| {
            if !(0.0..=100.0).contains(&listing.probability) {
                return Err(GeneratorError::InvalidSymptomProbability {
                    condition: condition.name.clone(),
                    symptom: key.to_string(),
                    probability: listing.probability,
                });
            }
            Ok(ChainLink {
                index: position + 1,
                listing,
                probability: listing.probability / 100.0,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    links.sort_by(|a, b| a.probability.total_cmp(&b.probability));
    Ok(links)
}

fn symptom_kind(definition: &SymptomDefinition<'_>, condition_code: &Code) -> StateKind {
    match definition {
        SymptomDefinition::Known(symptom) => StateKind::Symptom {
            symptom: symptom.name.clone(),
            range: SYMPTOM_SEVERITY,
            condition_codes: vec![condition_code.clone()],
            symptom_code: Code::new(HASH_SYSTEM, &symptom.hash, &symptom.name),
            value_code: Code::new(HASH_SYSTEM, &symptom.hash, format!("{} (finding)", symptom.name)),
            remarks: vec![symptom.description.clone()],
        },
        SymptomDefinition::Synthetic { slug, hash } => {
            log::debug!("Symptom '{slug}' is not in the catalog, using a synthetic definition");
            StateKind::Symptom {
                symptom: (*slug).to_string(),
                range: SYMPTOM_SEVERITY,
                condition_codes: vec![condition_code.clone()],
                symptom_code: Code::new(HASH_SYSTEM, hash.as_str(), *slug),
                value_code: Code::new(HASH_SYSTEM, *slug, format!("{slug} (finding)")),
                remarks: Vec::new(),
            }
        }
    }
}
