#[cfg(test)]
mod tests {
    use symcat_modules::GeneratorError;
    use symcat_modules::algorithm::module::{
        ComplexBranch, ConditionalBranch, Guard, INITIAL_STATE, ModuleGraph, State, StateKind,
        TERMINAL_STATE, Transition, WeightedTarget,
    };

    fn simple(target: &str) -> State {
        State::new(StateKind::Simple, Transition::direct(target))
    }

    #[test]
    fn test_terminal_reached_through_branches() {
        let mut builder = ModuleGraph::builder("branching");
        builder
            .push(INITIAL_STATE, State::new(StateKind::Initial, Transition::direct("Split")))
            .unwrap()
            .push(
                "Split",
                State::new(
                    StateKind::Simple,
                    Transition::Distributed(vec![
                        WeightedTarget {
                            transition: "Loop".to_string(),
                            distribution: 0.5,
                        },
                        WeightedTarget {
                            transition: "Out".to_string(),
                            distribution: 0.5,
                        },
                    ]),
                ),
            )
            .unwrap()
            .push("Loop", simple("Split"))
            .unwrap()
            .push("Out", simple(TERMINAL_STATE))
            .unwrap()
            .push(TERMINAL_STATE, State::terminal())
            .unwrap();

        let graph = builder.build().unwrap();
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.state("Split").unwrap().targets(), ["Loop", "Out"]);
    }

    #[test]
    fn test_terminal_target_may_be_implicit() {
        let mut builder = ModuleGraph::builder("implicit");
        builder
            .push(INITIAL_STATE, State::new(StateKind::Initial, Transition::direct(TERMINAL_STATE)))
            .unwrap();
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_two_initial_states_are_rejected() {
        let mut builder = ModuleGraph::builder("twice");
        builder
            .push(INITIAL_STATE, State::new(StateKind::Initial, Transition::direct(TERMINAL_STATE)))
            .unwrap()
            .push("Again", State::new(StateKind::Initial, Transition::direct(TERMINAL_STATE)))
            .unwrap()
            .push(TERMINAL_STATE, State::terminal())
            .unwrap();
        let err = builder.build().unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidGraph { .. }));
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn test_dangling_fallback_target_is_rejected() {
        let mut builder = ModuleGraph::builder("dangling");
        builder
            .push(INITIAL_STATE, State::new(StateKind::Initial, Transition::direct("Pick")))
            .unwrap()
            .push(
                "Pick",
                State::new(
                    StateKind::Simple,
                    Transition::Complex(vec![
                        ComplexBranch::Weighted {
                            condition: Some(Guard::Gender { gender: "F" }),
                            distributions: vec![WeightedTarget {
                                transition: TERMINAL_STATE.to_string(),
                                distribution: 1.0,
                            }],
                        },
                        ComplexBranch::Fallback {
                            transition: "Missing".to_string(),
                        },
                    ]),
                ),
            )
            .unwrap()
            .push(TERMINAL_STATE, State::terminal())
            .unwrap();
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("'Missing'"));
    }

    #[test]
    fn test_conditional_branches_count_as_edges() {
        let mut builder = ModuleGraph::builder("conditional");
        builder
            .push(INITIAL_STATE, State::new(StateKind::Initial, Transition::direct("Gate")))
            .unwrap()
            .push(
                "Gate",
                State::new(
                    StateKind::Simple,
                    Transition::Conditional(vec![
                        ConditionalBranch {
                            condition: Some(Guard::False),
                            transition: "Gate".to_string(),
                        },
                        ConditionalBranch {
                            condition: None,
                            transition: "Done".to_string(),
                        },
                    ]),
                ),
            )
            .unwrap()
            .push("Done", State::terminal())
            .unwrap();
        let graph = builder.build().unwrap();
        assert_eq!(graph.state_names().last(), Some("Done"));
    }
}
