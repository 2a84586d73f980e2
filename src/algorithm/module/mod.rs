//! Module graph construction
//!
//! Typed simulator states, the append-only graph builder, demographic guard
//! construction, and the builders for condition modules and the shared
//! history module.

pub mod condition_module;
pub mod graph;
pub mod guards;
pub mod history;
pub mod state;

// Re-export key types
pub use condition_module::{ConditionModuleBuilder, infection_state_name};
pub use graph::{INITIAL_STATE, ModuleGraph, ModuleGraphBuilder, TERMINAL_STATE};
pub use history::{HISTORY_MODULE_NAME, HISTORY_MODULE_STEM, build_history_module};
pub use state::{
    Code, ComplexBranch, ConditionalBranch, Guard, Operator, State, StateKind, Transition,
    WeightedTarget,
};
