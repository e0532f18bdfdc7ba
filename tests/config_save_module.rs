use bulkquiz::config::{load_settings_or_default, save_settings, ConfigError, Settings};
use bulkquiz::workflow::{QuizStatus, WorkflowLimits};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn saved_settings_load_back_unchanged() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested/config.yaml");
    let settings = Settings {
        api_base: "https://admin.example.test".to_string(),
        default_status: QuizStatus::Active,
        categories_path: Some(PathBuf::from("/srv/quiz/categories.json")),
        limits: WorkflowLimits {
            max_total_count: 30,
            ..WorkflowLimits::default()
        },
        ..Settings::default()
    };
    save_settings(&settings, &path).expect("save");

    let loaded = Settings::from_path(&path).expect("load");
    assert_eq!(loaded, settings);
    let leftovers: Vec<_> = fs::read_dir(path.parent().expect("parent"))
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(leftovers.len(), 1, "temp file left behind: {leftovers:?}");
}

#[test]
fn invalid_settings_are_not_written() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    let settings = Settings {
        notice_seconds: 0,
        ..Settings::default()
    };
    let err = save_settings(&settings, &path).expect_err("invalid");
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(!path.exists());
}

#[test]
fn malformed_yaml_reports_the_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    fs::write(&path, "api_base: [unterminated").expect("write");
    let err = load_settings_or_default(&path).expect_err("parse error");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.yaml"));
}
