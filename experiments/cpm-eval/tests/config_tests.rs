use cpm_base::LogTarget;
use cpm_infer::Device;
use std::collections::HashMap;
use std::path::PathBuf;

mod config {
    include!("../src/config.rs");
}

use config::EvalConfig;

fn with_env(vars: &[(&str, &str)]) -> Result<EvalConfig, String> {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EvalConfig::from_lookup("models", "people.jpg", |key| env.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = with_env(&[]).unwrap();
    assert_eq!(config.model_dir, PathBuf::from("models"));
    assert_eq!(config.image_path, PathBuf::from("people.jpg"));
    assert_eq!(config.device, Device::Cpu);
    assert_eq!(config.log_target, LogTarget::Stdout);
    assert_eq!(config.save_path, None);
    assert!(!config.headless);
}

#[test]
fn test_environment_overrides() {
    let config = with_env(&[
        ("CPM_DEVICE", "cuda:1"),
        ("CPM_LOG_DIR", "/tmp/cpm-logs"),
        ("CPM_SAVE_PATH", "out.png"),
        ("CPM_HEADLESS", "1"),
    ])
    .unwrap();

    assert_eq!(config.device, Device::Cuda { device_id: 1 });
    assert_eq!(config.log_target, LogTarget::Directory(PathBuf::from("/tmp/cpm-logs")));
    assert_eq!(config.save_path, Some(PathBuf::from("out.png")));
    assert!(config.headless);
}

#[test]
fn test_headless_false_values() {
    for value in ["0", "false", "NO", ""] {
        let config = with_env(&[("CPM_HEADLESS", value)]).unwrap();
        assert!(!config.headless, "CPM_HEADLESS={value:?}");
    }
}

#[test]
fn test_empty_values_fall_back_to_defaults() {
    let config = with_env(&[("CPM_DEVICE", " "), ("CPM_LOG_DIR", "")]).unwrap();
    assert_eq!(config.device, Device::Cpu);
    assert_eq!(config.log_target, LogTarget::Stdout);
}

#[test]
fn test_bad_device_is_an_error() {
    let err = with_env(&[("CPM_DEVICE", "gpu")]).unwrap_err();
    assert!(err.contains("gpu"));
}
