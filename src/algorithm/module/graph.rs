//! Module graphs and their append-only builder
//!
//! A graph keeps its states in build order. The builder refuses duplicate
//! names and validates the finished graph:
//!
//! - every transition target names a state of the graph (or `TerminalState`)
//! - there is exactly one `Initial` state
//! - a `Terminal` state is reachable from it

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::algorithm::module::state::State;
use crate::error::{GeneratorError, Result};

/// Name of the entry state of every module
pub const INITIAL_STATE: &str = "Initial";

/// Name of the exit state of every module
pub const TERMINAL_STATE: &str = "TerminalState";

/// A finished, validated module
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleGraph {
    name: String,
    states: Vec<(String, State)>,
    index: FxHashMap<String, usize>,
}

impl ModuleGraph {
    /// Start building a module
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ModuleGraphBuilder {
        ModuleGraphBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn state(&self, name: &str) -> Option<&State> {
        self.index.get(name).map(|&i| &self.states[i].1)
    }

    /// States in build order
    pub fn states(&self) -> impl ExactSizeIterator<Item = (&str, &State)> {
        self.states.iter().map(|(name, state)| (name.as_str(), state))
    }

    /// State names in build order
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|(name, _)| name.as_str())
    }

    /// Check the graph invariants
    pub fn validate(&self) -> Result<()> {
        let initials: Vec<&str> = self
            .states()
            .filter(|(_, state)| state.is_initial())
            .map(|(name, _)| name)
            .collect();
        let [initial] = initials.as_slice() else {
            return Err(GeneratorError::invalid_graph(
                &self.name,
                format!("expected exactly one Initial state, found {}", initials.len()),
            ));
        };

        for (name, state) in self.states() {
            if let Some(missing) = state
                .targets()
                .into_iter()
                .find(|target| *target != TERMINAL_STATE && !self.index.contains_key(*target))
            {
                return Err(GeneratorError::invalid_graph(
                    &self.name,
                    format!("state '{name}' transitions to unknown state '{missing}'"),
                ));
            }
        }

        if !self.reaches_terminal(initial) {
            return Err(GeneratorError::invalid_graph(
                &self.name,
                "no Terminal state is reachable from Initial",
            ));
        }
        Ok(())
    }

    fn reaches_terminal(&self, start: &str) -> bool {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::from([start]);
        while let Some(name) = queue.pop_front() {
            if !seen.insert(name) {
                continue;
            }
            let Some(state) = self.state(name) else {
                // only the TerminalState sentinel may be absent
                return true;
            };
            if state.is_terminal() {
                return true;
            }
            queue.extend(state.targets());
        }
        false
    }
}

struct OrderedStates<'a>(&'a [(String, State)]);

impl Serialize for OrderedStates<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, state)| (name, state)))
    }
}

impl Serialize for ModuleGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut module = serializer.serialize_struct("ModuleGraph", 2)?;
        module.serialize_field("name", &self.name)?;
        module.serialize_field("states", &OrderedStates(&self.states))?;
        module.end()
    }
}

/// Append-only builder for a `ModuleGraph`
#[derive(Debug, Clone)]
pub struct ModuleGraphBuilder {
    graph: ModuleGraph,
}

impl ModuleGraphBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            graph: ModuleGraph {
                name: name.into(),
                states: Vec::new(),
                index: FxHashMap::default(),
            },
        }
    }

    /// Append a state; names must be unique within the module
    pub fn push(&mut self, name: impl Into<String>, state: State) -> Result<&mut Self> {
        let name = name.into();
        if self.graph.index.contains_key(&name) {
            return Err(GeneratorError::invalid_graph(
                &self.graph.name,
                format!("duplicate state '{name}'"),
            ));
        }
        self.graph.index.insert(name.clone(), self.graph.states.len());
        self.graph.states.push((name, state));
        Ok(self)
    }

    /// Validate and return the finished graph
    pub fn build(self) -> Result<ModuleGraph> {
        self.graph.validate()?;
        Ok(self.graph)
    }
}
