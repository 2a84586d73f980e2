#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use serde_json::Value;
    use symcat_modules::algorithm::module::HISTORY_MODULE_STEM;
    use symcat_modules::models::PriorTable;
    use symcat_modules::{
        GeneratorConfig, GeneratorError, ModuleAssembler, RunPaths, render_module, run,
        write_modules,
    };
    use tempfile::TempDir;

    use crate::utils::{CONDITIONS_JSON, SYMPTOMS_JSON, fixture_catalog, write_fixture};

    fn run_paths(dir: &Path) -> RunPaths {
        RunPaths {
            symptoms: write_fixture(dir, "symptoms.json", SYMPTOMS_JSON),
            conditions: write_fixture(dir, "conditions.json", CONDITIONS_JSON),
            priors: None,
            output: dir.join("modules"),
        }
    }

    fn sorted_file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_run_writes_prefixed_modules() {
        let dir = TempDir::new().unwrap();
        let paths = run_paths(dir.path());
        let config = GeneratorConfig::builder().prefix("symcat_").build();

        let written = run(&paths, &config).unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            sorted_file_names(&paths.output),
            [
                "symcat_1_update_age_time_to_the_end.json",
                "symcat_appendicitis.json"
            ]
        );

        let text = fs::read_to_string(paths.output.join("symcat_appendicitis.json")).unwrap();
        let module: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(module["name"], "Appendicitis");
        assert_eq!(
            module["states"]["Simple_Transition_2"]["distributed_transition"][0]["distribution"],
            0.91
        );
        assert!(text.contains("\n        \"Initial\": {"));
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let paths = run_paths(dir.path());
        let config = GeneratorConfig::default();

        run(&paths, &config).unwrap();
        let first = fs::read(paths.output.join("appendicitis.json")).unwrap();
        run(&paths, &config).unwrap();
        let second = fs::read(paths.output.join("appendicitis.json")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let catalog = fixture_catalog();
        let priors = PriorTable::default();
        let parallel = GeneratorConfig::builder().parallel(true).build();
        let sequential = GeneratorConfig::builder().parallel(false).build();

        let a = ModuleAssembler::new(&catalog, &priors, &parallel).assemble().unwrap();
        let b = ModuleAssembler::new(&catalog, &priors, &sequential).assemble().unwrap();
        assert_eq!(a, b);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(render_module(&x.graph).unwrap(), render_module(&y.graph).unwrap());
        }
    }

    #[test]
    fn test_zero_history_years_keep_history_module() {
        let catalog = fixture_catalog();
        let priors = PriorTable::default();
        let config = GeneratorConfig::builder().num_history_years(0).build();
        let modules = ModuleAssembler::new(&catalog, &priors, &config).assemble().unwrap();
        let stems: Vec<_> = modules.iter().map(|m| m.stem.as_str()).collect();
        assert_eq!(stems, ["appendicitis", HISTORY_MODULE_STEM]);

        let history = serde_json::to_value(&modules[1].graph).unwrap();
        let expression = history["states"]["History_Age_Attribute"]["expression"]
            .as_str()
            .unwrap();
        assert!(expression.ends_with("- 0"));
    }

    #[test]
    fn test_write_modules_into_fresh_directory() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("out");
        let catalog = fixture_catalog();
        let priors = PriorTable::default();
        let config = GeneratorConfig::default();
        let modules = ModuleAssembler::new(&catalog, &priors, &config).assemble().unwrap();

        assert_eq!(write_modules(&target, &modules, "").unwrap(), 2);
        assert!(target.join("appendicitis.json").is_file());
        assert_eq!(write_modules(&target, &[], "").unwrap(), 0);
    }

    #[test]
    fn test_missing_catalog_aborts_run() {
        let dir = TempDir::new().unwrap();
        let mut paths = run_paths(dir.path());
        paths.symptoms = dir.path().join("nope.json");
        let err = run(&paths, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GeneratorError::Io { .. }));
        assert!(!paths.output.exists());
    }

    #[test]
    fn test_malformed_catalog_is_a_json_error() {
        let dir = TempDir::new().unwrap();
        let mut paths = run_paths(dir.path());
        paths.conditions = write_fixture(dir.path(), "broken.json", "{\"x\": ");
        let err = run(&paths, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, GeneratorError::Json { .. }));
    }
}
