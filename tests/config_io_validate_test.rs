use pos_energy::config::{Config, DEFAULT_ETHEREUM_URL};
use std::fs;

#[test]
fn save_and_load_yaml_roundtrip() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("config.yaml");

    let mut cfg = Config::default();
    cfg.sources.bitcoin_url = "http://127.0.0.1:9000/btc".to_string();
    cfg.refresh.interval_secs = 60;
    cfg.logging.file = path.with_extension("log").to_string_lossy().to_string();

    cfg.save_to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.sources.bitcoin_url, "http://127.0.0.1:9000/btc");
    assert_eq!(loaded.sources.ethereum_url, DEFAULT_ETHEREUM_URL);
    assert_eq!(loaded.refresh.interval_secs, 60);
    assert_eq!(loaded.logging.file, cfg.logging.file);
    assert!(loaded.validate().is_ok());
}

#[test]
fn config_validation_errors() {
    let mut cfg = Config::default();
    cfg.sources.ethereum_url.clear();
    assert!(cfg.validate().is_err());

    cfg = Config::default();
    cfg.sources.request_timeout_secs = 0;
    assert!(cfg.validate().is_err());

    cfg = Config::default();
    cfg.display.min_ethereum_percentage = -1.0;
    assert!(cfg.validate().is_err());

    cfg = Config::default();
    cfg.web.port = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn from_file_with_invalid_yaml_fails() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    fs::write(tmp.path(), b"refresh: [unclosed").unwrap();
    let err = Config::from_file(tmp.path()).unwrap_err();
    assert!(format!("{}", err).contains("Serialization error"));
}

#[test]
fn from_missing_file_is_io_error() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(tmp_dir.path().join("nope.yaml")).unwrap_err();
    assert!(format!("{}", err).contains("I/O error"));
}
