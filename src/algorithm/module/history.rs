//! Shared history module
//!
//! Sets `age_time_to_the_end` (years left before the patient's target age,
//! minus the simulated history) and delays until it is time for the condition
//! modules to fire. Condition modules guard on this attribute.

use crate::algorithm::module::graph::{INITIAL_STATE, ModuleGraph, TERMINAL_STATE};
use crate::algorithm::module::state::{
    ConditionalBranch, Exact, Guard, Operator, State, StateKind, TimeUnit, Transition,
};
use crate::error::Result;
use crate::models::demographics::{TimeBucket, TimeRange};

/// Attribute holding the years left before the target age
pub const HISTORY_AGE_ATTRIBUTE: &str = "age_time_to_the_end";

/// Name of the history module
pub const HISTORY_MODULE_NAME: &str = "update_age_time_to_the_end";

/// File stem of the history module; sorts ahead of condition modules
pub const HISTORY_MODULE_STEM: &str = "1_update_age_time_to_the_end";

const HISTORY_AGE_STATE: &str = "History_Age_Attribute";
const CHECK_EXIT_STATE: &str = "Check_Exit";

fn delay_state_name(bucket: TimeBucket) -> String {
    match bucket.range() {
        TimeRange::AtMost(bound) => format!("End_Time_LessOrEqual_{bound}"),
        TimeRange::Within(low, high) => format!("End_Time_{low}_{high}"),
        TimeRange::Above(bound) => format!("End_Time_Greater_{bound}"),
    }
}

fn time_guard(bucket: TimeBucket) -> Guard {
    match bucket.range() {
        TimeRange::AtMost(bound) => {
            Guard::attribute(HISTORY_AGE_ATTRIBUTE, Operator::LessOrEqual, i64::from(bound))
        }
        TimeRange::Within(low, high) => Guard::And {
            conditions: vec![
                Guard::attribute(HISTORY_AGE_ATTRIBUTE, Operator::Greater, i64::from(low)),
                Guard::attribute(HISTORY_AGE_ATTRIBUTE, Operator::LessOrEqual, i64::from(high)),
            ],
        },
        TimeRange::Above(bound) => {
            Guard::attribute(HISTORY_AGE_ATTRIBUTE, Operator::Greater, i64::from(bound))
        }
    }
}

fn delay(bucket: TimeBucket) -> Exact {
    match bucket.range() {
        TimeRange::AtMost(_) => Exact {
            quantity: 1,
            unit: TimeUnit::Months,
        },
        TimeRange::Within(low, _) | TimeRange::Above(low) => Exact {
            quantity: low,
            unit: TimeUnit::Years,
        },
    }
}

/// Build the history module for `num_history_years` of simulated history
pub fn build_history_module(num_history_years: u32) -> Result<ModuleGraph> {
    let mut builder = ModuleGraph::builder(HISTORY_MODULE_NAME);
    builder.push(
        INITIAL_STATE,
        State::new(StateKind::Initial, Transition::direct(HISTORY_AGE_STATE)),
    )?;

    let time_branches = TimeBucket::ALL
        .iter()
        .map(|&bucket| ConditionalBranch {
            condition: Some(time_guard(bucket)),
            transition: delay_state_name(bucket),
        })
        .collect();
    builder.push(
        HISTORY_AGE_STATE,
        State::new(
            StateKind::SetAttribute {
                attribute: HISTORY_AGE_ATTRIBUTE.to_string(),
                value: None,
                expression: Some(format!("#{{target_age}} - #{{age}} - {num_history_years}")),
            },
            Transition::Conditional(time_branches),
        ),
    )?;

    for &bucket in TimeBucket::ALL {
        builder.push(
            delay_state_name(bucket),
            State::new(
                StateKind::Delay {
                    exact: delay(bucket),
                },
                Transition::direct(CHECK_EXIT_STATE),
            ),
        )?;
    }

    builder.push(
        CHECK_EXIT_STATE,
        State::new(
            StateKind::Simple,
            Transition::Conditional(vec![
                ConditionalBranch {
                    condition: Some(Guard::False),
                    transition: TERMINAL_STATE.to_string(),
                },
                ConditionalBranch {
                    condition: None,
                    transition: HISTORY_AGE_STATE.to_string(),
                },
            ]),
        ),
    )?;
    builder.push(TERMINAL_STATE, State::terminal())?;

    builder.build()
}
