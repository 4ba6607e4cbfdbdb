use flock_config::{ConfigError, ConfigManager, ReportConfig};
use tempfile::tempdir;

#[test]
fn default_config_has_usable_fields() {
    let cfg = ReportConfig::default();

    assert!(!cfg.tithe_category.is_empty());
    assert_eq!(cfg.window_months, 12);
    assert!(cfg.scope_id.is_none());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = ReportConfig::default();
    cfg.tithe_category = "dizimo".to_string();
    cfg.window_months = 6;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    assert_eq!(manager.load().expect("load"), ReportConfig::default());
    assert!(manager.config_path().ends_with("config/config.json"));
}

#[test]
fn corrupt_file_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").expect("write");
    let manager = ConfigManager::new(path);

    let err = manager.load().expect_err("corrupt config");
    assert!(matches!(err, ConfigError::Serde(_)));
}
