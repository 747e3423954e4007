use std::io::Write;

use essay_score::{
    AnalysisInput, ConfigError, Engine, EngineConfig, IssueCategory, Severity,
};

const SAMPLE: &str = include_str!("../config/essay-score.toml");

#[test]
fn sample_config_loads() {
    let config = EngineConfig::from_toml_str(SAMPLE).unwrap();
    assert_eq!(config.weights.grammar, 0.35);
    assert_eq!(config.ranking.min_composite, Some(0.01));
    assert_eq!(config.tables.confusions.len(), 3);
    assert_eq!(config.tables.confusions["then"].severity, Severity::Low);
    assert!(
        config.tables.misspellings.contains_key("occured"),
        "keys should be lower-cased on load"
    );
}

#[test]
fn sample_tables_replace_the_defaults() {
    let engine = Engine::new(EngineConfig::from_toml_str(SAMPLE).unwrap());
    let analysis = engine.analyze(&AnalysisInput::new(
        "I always lose my keys and it occured again, alot.",
    ));

    let confused: Vec<&str> = analysis
        .grammar_issues
        .iter()
        .filter(|i| i.category == IssueCategory::ConfusedWord)
        .map(|i| i.term.as_str())
        .collect();
    assert_eq!(confused, vec!["lose"]);

    let misspelled: Vec<&str> = analysis
        .spelling_issues
        .iter()
        .map(|i| i.term.as_str())
        .collect();
    assert_eq!(misspelled, vec!["occured"]);
}

#[test]
fn empty_config_uses_defaults() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config = EngineConfig::from_toml_str("[ranking]\nactivity_cap = 10.0\n").unwrap();
    assert_eq!(config.ranking.activity_cap, 10.0);
    assert_eq!(config.ranking.quality_weight, 0.7);
    assert_eq!(config.weights.content, 0.40);
}

#[test]
fn rejects_weights_that_do_not_sum_to_one() {
    let err = EngineConfig::from_toml_str("[weights]\ngrammar = 0.5\nspelling = 0.5\ncontent = 0.5\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {err}");
}

#[test]
fn rejects_negative_ranking_parameters() {
    let err = EngineConfig::from_toml_str("[ranking]\nper_like = -1.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {err}");
    assert!(err.to_string().contains("per_like"));
}

#[test]
fn rejects_entries_without_suggestions() {
    let err =
        EngineConfig::from_toml_str("[tables.misspellings]\nteh = []\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {err}");
}

#[test]
fn reports_parse_errors() {
    let err = EngineConfig::from_toml_str("weights = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "got {err}");
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{SAMPLE}").unwrap();
    let config = EngineConfig::from_file(file.path()).unwrap();
    assert_eq!(config.tables.confusions.len(), 3);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }), "got {err}");
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn punctuated_keys_are_folded_like_tokens() {
    let config = EngineConfig::from_toml_str(
        r#"
[tables.misspellings]
"would'nt" = ["wouldn't"]

[tables.confusions."Who's"]
suggestions = ["whose"]
"#,
    )
    .unwrap();
    assert!(config.tables.misspellings.contains_key("wouldnt"));
    assert!(config.tables.confusions.contains_key("whos"));

    let analysis = Engine::new(config).analyze(&AnalysisInput::new(
        "He would'nt say who's coat it was here today.",
    ));
    let misspelled: Vec<&str> = analysis
        .spelling_issues
        .iter()
        .map(|i| i.term.as_str())
        .collect();
    assert_eq!(misspelled, vec!["wouldnt"]);
    let confused: Vec<&str> = analysis
        .grammar_issues
        .iter()
        .filter(|i| i.category == IssueCategory::ConfusedWord)
        .map(|i| i.term.as_str())
        .collect();
    assert_eq!(confused, vec!["who's"]);
}

#[test]
fn rejects_keys_without_letters() {
    let err = EngineConfig::from_toml_str("[tables.misspellings]\n\"42\" = [\"forty-two\"]\n")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {err}");
}

#[test]
fn rejects_phrase_confusion_keys() {
    let err = EngineConfig::from_toml_str(
        "[tables.confusions.\"a lot\"]\nsuggestions = [\"alot\"]\n",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "got {err}");
}

#[test]
fn validate_flags_unfolded_keys_built_in_code() {
    let mut config = EngineConfig::default();
    config
        .tables
        .misspellings
        .insert("e-mial".to_string(), vec!["e-mail".to_string()]);
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("e-mial"), "got {err}");
}
