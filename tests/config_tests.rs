//! Configuration loading through the System abstraction

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use getpot_tree::config::{Config, Verbosity};
    use getpot_tree::error::TreeError;
    use getpot_tree::load_config;
    use getpot_tree::system::MockSystem;

    #[test]
    fn full_config_file() {
        let content = r#"
verbosity: quiet
writeInactive: true
priorityBlocks:
  - Variables
  - AuxVariables
syntaxExtension: actions
bindVariables: false
projectFileOptions: false
"#;
        let system = MockSystem::new()
            .with_file("/work/getpot.yaml", content.as_bytes())
            .unwrap();

        let config = Config::load_from_file(&system, "/work/getpot.yaml").unwrap();
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert!(config.write_inactive);
        assert_eq!(config.priority_blocks, vec!["Variables", "AuxVariables"]);
        assert_eq!(config.syntax_extension, "actions");
        assert!(!config.bind_variables);
        assert!(!config.project_file_options);
    }

    #[test]
    fn logical_validation_runs_after_schema() {
        let system = MockSystem::new()
            .with_file("/work/getpot.yaml", b"priorityBlocks: [Mesh, Mesh]\n")
            .unwrap();
        let err = Config::load_from_file(&system, "/work/getpot.yaml").unwrap_err();
        assert!(matches!(err, TreeError::Configuration { .. }));
        assert!(err.to_string().contains("/work/getpot.yaml"));
    }

    #[test]
    fn unnamed_config_falls_back_to_defaults() {
        let system = MockSystem::new();
        assert_eq!(load_config(&system, None).unwrap(), Config::default());
    }

    #[test]
    fn named_missing_config_is_an_error() {
        let system = MockSystem::new();
        let err = load_config(&system, Some("/work/missing.yaml")).unwrap_err();
        let err = err.downcast_ref::<TreeError>().unwrap();
        assert_eq!(err.exit_code(), 1);
    }
}
