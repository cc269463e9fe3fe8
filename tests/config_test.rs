// tests/config_test.rs
use pr_changelog::config::{load_config, Config};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_classifier_vocabulary() {
    let config = Config::default();
    assert!(config
        .classifier
        .feature_types
        .contains(&"feat".to_string()));
    assert!(config.classifier.fix_types.contains(&"fix".to_string()));
    assert!(config.classifier.fix_types.contains(&"perf".to_string()));
    assert!(config
        .classifier
        .breaking_indicators
        .contains(&"BREAKING CHANGE:".to_string()));
}

#[test]
fn test_default_template_headings() {
    let config = Config::default();
    assert_eq!(config.template.title, "## Changelog");
    assert!(config.template.breaking_heading.contains("Breaking"));
    assert!(config.template.fix_heading.contains("Bug Fixes"));
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r##"
[classifier]
feature_types = ["feat", "add"]
fix_types = ["fix"]

[template]
title = "# What changed"
"##;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert!(config.classifier.feature_types.contains(&"add".to_string()));
    assert_eq!(config.classifier.fix_types, vec!["fix".to_string()]);
    assert_eq!(config.template.title, "# What changed");
    // unspecified fields keep their defaults
    assert!(config
        .classifier
        .breaking_indicators
        .contains(&"BREAKING CHANGE:".to_string()));
    assert!(config.template.feature_heading.contains("Features"));
}

#[test]
fn test_load_empty_file_uses_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"").unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.classifier, Config::default().classifier);
    assert_eq!(config.template, Config::default().template);
}

#[test]
fn test_load_missing_custom_path_fails() {
    assert!(load_config(Some("/nonexistent/prchangelog.toml")).is_err());
}

#[test]
fn test_load_invalid_toml_fails() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[classifier\nbroken").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path().to_str().unwrap())).is_err());
}
