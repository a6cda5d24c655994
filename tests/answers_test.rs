use kitgen::answers::{load_answers_file, parse_answers, TargetPlatform, UiFramework};
use kitgen::error::Error;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_json_answer_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("answers.json");
    fs::write(&path, r#"{"appName": "My App", "target": "web", "ui": "bootstrap"}"#).unwrap();

    let answers = load_answers_file(&path, "fallback").unwrap();
    assert_eq!(answers.app_name(), "My App");
    assert_eq!(answers.project_name(), "my-app");
    assert_eq!(answers.target(), TargetPlatform::Web);
    assert_eq!(answers.ui(), UiFramework::Bootstrap);
}

#[test]
fn test_load_yaml_answer_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("answers.yml");
    fs::write(&path, "target: both\nui: ionic\n").unwrap();

    let answers = load_answers_file(&path, "Field Notes").unwrap();
    assert_eq!(answers.app_name(), "Field Notes");
    assert_eq!(answers.project_name(), "field-notes");
    assert_eq!(answers.target(), TargetPlatform::Both);
}

#[test]
fn test_stored_project_name_is_rederived() {
    let answers = parse_answers(
        r#"{"appName": "My App", "projectName": "something-else", "target": "mobile", "ui": "material"}"#,
        "fallback",
    )
    .unwrap();
    assert_eq!(answers.project_name(), "my-app");
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = load_answers_file(temp_dir.path().join("nope.json"), "app");
    assert!(matches!(result, Err(Error::ConfigurationError(_))));
}

#[test]
fn test_schema_violations() {
    let cases = [
        r#"{"ui": "bootstrap"}"#,
        r#"{"target": "web"}"#,
        r#"{"target": "desktop", "ui": "bootstrap"}"#,
        r#"{"target": "web", "ui": "foundation"}"#,
        r#"{"target": "web", "ui": "bootstrap", "extra": true}"#,
        r#"{"appName": 42, "target": "web", "ui": "bootstrap"}"#,
        r#"["web", "bootstrap"]"#,
    ];
    for case in cases {
        let result = parse_answers(case, "app");
        assert!(
            matches!(result, Err(Error::ConfigurationError(_))),
            "expected a configuration error for {}",
            case
        );
    }
}

#[test]
fn test_unparsable_content() {
    let result = parse_answers("{ target: [", "app");
    assert!(matches!(result, Err(Error::ConfigurationError(_))));
}
