#[cfg(test)]
mod tests {
    use serde_json::json;
    use symcat_modules::algorithm::module::build_history_module;

    #[test]
    fn test_history_buckets_and_delays() {
        let graph = build_history_module(2).unwrap();
        let value = serde_json::to_value(&graph).unwrap();
        let states = &value["states"];

        assert_eq!(value["name"], "update_age_time_to_the_end");
        assert_eq!(
            states["History_Age_Attribute"]["conditional_transition"][0],
            json!({
                "condition": {
                    "condition_type": "Attribute",
                    "attribute": "age_time_to_the_end",
                    "operator": "<=",
                    "value": 1
                },
                "transition": "End_Time_LessOrEqual_1"
            })
        );
        assert_eq!(
            states["End_Time_LessOrEqual_1"],
            json!({
                "type": "Delay",
                "exact": {"quantity": 1, "unit": "months"},
                "direct_transition": "Check_Exit"
            })
        );
        assert_eq!(states["End_Time_15_30"]["exact"], json!({"quantity": 15, "unit": "years"}));
        assert_eq!(
            states["End_Time_Greater_75"]["exact"],
            json!({"quantity": 75, "unit": "years"})
        );
    }

    #[test]
    fn test_exit_loops_back_to_attribute() {
        let graph = build_history_module(1).unwrap();
        let exit = serde_json::to_value(graph.state("Check_Exit").unwrap()).unwrap();
        assert_eq!(
            exit,
            json!({
                "type": "Simple",
                "conditional_transition": [
                    {"condition": {"condition_type": "False"}, "transition": "TerminalState"},
                    {"transition": "History_Age_Attribute"}
                ]
            })
        );
    }
}
