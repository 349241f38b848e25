use tally_config::{Config, ConfigManager, TokenStore};
use tally_domain::AuthToken;
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.api_base.is_empty());
    assert!(!cfg.currency_symbol.is_empty());
    assert!(cfg.request_timeout_secs > 0);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");

    let mut cfg = Config::default();
    cfg.api_base = "https://budget.example/api".to_string();
    cfg.currency_symbol = "€".to_string();

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
}

#[test]
fn missing_config_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");
    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn zero_timeout_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");
    std::fs::write(manager.config_path(), r#"{"request_timeout_secs":0}"#).unwrap();
    assert!(manager.load().is_err());
}

#[test]
fn token_store_round_trips_and_clears() {
    let dir = tempdir().expect("tempdir");
    let store = TokenStore::in_dir(dir.path());
    let api = "https://budget.example/api";

    assert!(store.load(api).is_none());
    store.save(&AuthToken::new("tok-123"), api).expect("save token");

    let loaded = store.load(api).expect("token present");
    assert_eq!(loaded.token.as_str(), "tok-123");
    assert!(store.load("https://other.example/api").is_none());

    store.clear().expect("clear");
    assert!(store.load(api).is_none());
    store.clear().expect("clearing twice is fine");
}

#[cfg(unix)]
#[test]
fn token_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().expect("tempdir");
    let store = TokenStore::in_dir(dir.path());
    store
        .save(&AuthToken::new("tok"), "http://localhost")
        .expect("save");
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn corrupt_token_file_reads_as_signed_out() {
    let dir = tempdir().expect("tempdir");
    let store = TokenStore::in_dir(dir.path());
    std::fs::write(store.path(), "not json").unwrap();
    assert!(store.load("http://localhost").is_none());
}
