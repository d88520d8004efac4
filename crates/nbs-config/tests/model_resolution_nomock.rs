//! No-mock model loading + resolution tests.
//!
//! Covers:
//! - Model parsing and validation against real JSON files on disk
//! - Resolution order (CLI > NBS_MODEL > config dir > XDG)

use nbs_config::resolve::{resolve_model_path, ModelSource, ENV_CONFIG_DIR, ENV_MODEL_PATH};
use nbs_config::validate::{validate_model, ValidationError};
use nbs_config::Model;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const VALID_MODEL: &str = r#"{
  "schema_version": "1.0.0",
  "prior": 0.5,
  "likelihood": { "good": 1.2, "bad": -1.5 }
}"#;

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::with_capacity(keys.len());
        for key in keys {
            saved.push(env::var(key).ok());
        }
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("env lock poisoned");
    f()
}

/// Clear every variable the resolver reads and point XDG at an empty dir.
fn isolated_env(xdg: &Path) -> EnvGuard {
    let guard = EnvGuard::new(&[ENV_MODEL_PATH, ENV_CONFIG_DIR, "XDG_CONFIG_HOME"]);
    env::remove_var(ENV_MODEL_PATH);
    env::remove_var(ENV_CONFIG_DIR);
    env::set_var("XDG_CONFIG_HOME", xdg);
    guard
}

fn write_model(dir: &Path, name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("create model dir");
    let path = dir.join(name);
    fs::write(&path, content).expect("write model");
    path
}

#[test]
fn valid_model_file_loads_and_validates() {
    let tmp = TempDir::new().unwrap();
    let path = write_model(tmp.path(), "model.json", VALID_MODEL);

    let model = Model::from_file(&path).expect("parse model");
    validate_model(&model).expect("valid model");
    assert_eq!(model.prior(), 0.5);
    assert_eq!(model.vocabulary_size(), 2);
}

#[test]
fn corrupt_model_file_is_parse_error() {
    let tmp = TempDir::new().unwrap();
    let path = write_model(tmp.path(), "model.json", "{ \"prior\": ");

    let err = Model::from_file(&path).unwrap_err();
    assert!(matches!(err, ValidationError::ParseError(_)));
}

#[test]
fn cli_path_wins_over_environment() {
    with_env_lock(|| {
        let tmp = TempDir::new().unwrap();
        let _guard = isolated_env(&tmp.path().join("xdg"));
        let cli = write_model(&tmp.path().join("cli"), "custom.json", VALID_MODEL);
        let env_model = write_model(&tmp.path().join("env"), "model.json", VALID_MODEL);
        env::set_var(ENV_MODEL_PATH, &env_model);

        let resolution = resolve_model_path(Some(&cli), None);
        let found = resolution.found.expect("resolved");
        assert_eq!(found.path, cli);
        assert_eq!(found.source, ModelSource::CliArgument);
    });
}

#[test]
fn env_model_path_wins_over_config_dir() {
    with_env_lock(|| {
        let tmp = TempDir::new().unwrap();
        let _guard = isolated_env(&tmp.path().join("xdg"));
        let env_model = write_model(&tmp.path().join("env"), "model.json", VALID_MODEL);
        let config_dir = tmp.path().join("config");
        write_model(&config_dir, "model.json", VALID_MODEL);
        env::set_var(ENV_MODEL_PATH, &env_model);
        env::set_var(ENV_CONFIG_DIR, &config_dir);

        let found = resolve_model_path(None, None).found.expect("resolved");
        assert_eq!(found.path, env_model);
        assert_eq!(found.source, ModelSource::Environment);
    });
}

#[test]
fn cli_config_dir_wins_over_env_config_dir() {
    with_env_lock(|| {
        let tmp = TempDir::new().unwrap();
        let _guard = isolated_env(&tmp.path().join("xdg"));
        let cli_dir = tmp.path().join("cli-config");
        let env_dir = tmp.path().join("env-config");
        let expected = write_model(&cli_dir, "model.json", VALID_MODEL);
        write_model(&env_dir, "model.json", VALID_MODEL);
        env::set_var(ENV_CONFIG_DIR, &env_dir);

        let found = resolve_model_path(None, Some(&cli_dir)).found.expect("resolved");
        assert_eq!(found.path, expected);
        assert_eq!(found.source, ModelSource::ConfigDir);
    });
}

#[test]
fn xdg_config_is_used_when_nothing_else_is_set() {
    with_env_lock(|| {
        let tmp = TempDir::new().unwrap();
        let xdg = tmp.path().join("xdg");
        let _guard = isolated_env(&xdg);
        let expected = write_model(&xdg.join("nb-sentiment"), "model.json", VALID_MODEL);

        let found = resolve_model_path(None, None).found.expect("resolved");
        assert_eq!(found.path, expected);
        assert_eq!(found.source, ModelSource::XdgConfig);
    });
}

#[test]
fn nothing_found_reports_every_searched_location() {
    with_env_lock(|| {
        let tmp = TempDir::new().unwrap();
        let _guard = isolated_env(&tmp.path().join("xdg"));
        let empty_dir = tmp.path().join("empty");
        fs::create_dir_all(&empty_dir).unwrap();

        let resolution = resolve_model_path(None, Some(&empty_dir));
        if resolution.found.is_some() {
            // A system-wide model is installed on this host; nothing to assert.
            assert_eq!(
                resolution.found.unwrap().source,
                ModelSource::SystemConfig
            );
            return;
        }
        assert!(resolution.searched.contains(&empty_dir.join("model.json")));
        assert!(resolution
            .searched
            .iter()
            .any(|p| p.starts_with(tmp.path().join("xdg"))));
        assert!(resolution
            .searched
            .contains(&PathBuf::from("/etc/nb-sentiment/model.json")));
    });
}

#[test]
fn blank_env_model_is_ignored() {
    with_env_lock(|| {
        let tmp = TempDir::new().unwrap();
        let _guard = isolated_env(&tmp.path().join("xdg"));
        let config_dir = tmp.path().join("config");
        let expected = write_model(&config_dir, "model.json", VALID_MODEL);
        env::set_var(ENV_MODEL_PATH, "   ");

        let found = resolve_model_path(None, Some(&config_dir)).found.expect("resolved");
        assert_eq!(found.path, expected);
    });
}
