//! Configuration loading across supported formats.

use camino::{Utf8Path, Utf8PathBuf};
use defect_metrics::config::Config;
use std::fs;

fn scratch_dir(name: &str) -> Utf8PathBuf {
    let dir = Utf8PathBuf::from_path_buf(std::env::temp_dir()).expect("temp dir is utf-8").join(format!("defect-metrics-{name}"));
    fs::create_dir_all(&dir).expect("scratch dir creates");
    dir
}

#[test]
fn test_missing_file_means_defaults() {
    let dir = scratch_dir("defaults");
    let (config, warnings) = Config::load(&dir, None).expect("defaults load");
    assert_eq!(config.escape_rate_bands, [5.0, 10.0]);
    assert!(warnings.is_empty());
}

#[test]
fn test_explicit_toml_path() {
    let dir = scratch_dir("toml");
    let path = dir.join("custom.toml");
    fs::write(&path, "escape_rate_bands = [1.0, 4.0]\n").expect("config writes");

    let (config, warnings) = Config::load(&dir, Some(&path)).expect("toml config loads");
    assert_eq!(config.escape_rate_bands, [1.0, 4.0]);
    assert!(warnings.is_empty());
}

#[test]
fn test_searched_yaml_file() {
    let dir = scratch_dir("yaml");
    fs::write(dir.join("defect-metrics.yml"), "mttr_bands: [2.0, 5.0]\n").expect("config writes");

    let (config, _) = Config::load(&dir, None).expect("yaml config loads");
    assert_eq!(config.mttr_bands, [2.0, 5.0]);
}

#[test]
fn test_searched_json_file() {
    let dir = scratch_dir("json");
    fs::write(dir.join("defect-metrics.json"), "{\"escape_rate_bands\": [3.0, 9.0]}").expect("config writes");

    let (config, _) = Config::load(&dir, None).expect("json config loads");
    assert_eq!(config.escape_rate_bands, [3.0, 9.0]);
}

#[test]
fn test_search_ignores_defect_record_files() {
    // The default `extract` output lands next to the config search path and
    // must never be probed as configuration.
    let dir = scratch_dir("record-files");
    let records = r#"{"defects": [{
        "id": "DEF-001",
        "title": "Login fails with special characters",
        "severity": "High",
        "found_stage": "QA Testing",
        "introduced_stage": "Development",
        "created_at": "2024-01-15T00:00:00Z",
        "sprint": "Sprint 1"
    }]}"#;
    fs::write(dir.join("defects.json"), records).expect("record file writes");

    let (config, warnings) = Config::load(&dir, None).expect("defaults load despite record file");
    assert_eq!(config.escape_rate_bands, [5.0, 10.0]);
    assert!(warnings.is_empty());
}

#[test]
fn test_unordered_bands_produce_warning() {
    let dir = scratch_dir("warn");
    let path = dir.join("unordered.toml");
    fs::write(&path, "escape_rate_bands = [20.0, 10.0]\n").expect("config writes");

    let (_, warnings) = Config::load(&dir, Some(&path)).expect("config loads despite warning");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("unordered"));
}

#[test]
fn test_unsupported_extension_fails() {
    let dir = scratch_dir("bad-ext");
    let path = dir.join("defects.ini");
    fs::write(&path, "escape_rate_bands = [1.0, 2.0]\n").expect("config writes");

    assert!(Config::load(Utf8Path::new("."), Some(&path)).is_err());
}
