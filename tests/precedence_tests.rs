// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for load order and override precedence.

use envdot::prelude::*;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

/// Helper to set and clean up environment variables
struct EnvGuard {
    keys: Vec<String>,
}

impl EnvGuard {
    fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }

    fn track(&mut self, key: &str) {
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

fn temp_env(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".env").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_later_file_wins() {
    let base = temp_env("MODE=base\nSHARED=base\n");
    let local = temp_env("SHARED=local\n");

    let config = DotEnv::builder()
        .with_file(base.path())
        .with_file(local.path())
        .build()
        .unwrap();

    assert_eq!(config.get_string("mode").unwrap(), "base");
    assert_eq!(config.get_string("shared").unwrap(), "local");
    let keys: Vec<&str> = config.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["MODE", "SHARED"]);
}

#[test]
fn test_without_override_first_file_wins() {
    let base = temp_env("SHARED=base\n");
    let local = temp_env("SHARED=local\nEXTRA=1\n");

    let mut config = DotEnv::new();
    config.load_file(base.path()).unwrap();
    let written = config
        .load_file_with(local.path(), LoadOptions::default().override_existing(false))
        .unwrap();

    assert_eq!(written, 1);
    assert_eq!(config.get_string("shared").unwrap(), "base");
    assert!(config.has("extra"));
}

#[test]
fn test_set_overrides_loaded_value() {
    let file = temp_env("PORT=8080\n");

    let mut config = DotEnv::new();
    config.load_file(file.path()).unwrap();
    config.set_raw("port", "9090");

    assert_eq!(config.get_int("PORT").unwrap(), 9090);
}

#[test]
fn test_reload_keeps_registration_order() {
    let first = temp_env("KEY=first\n");
    let second = temp_env("KEY=second\n");

    let mut config = DotEnv::new();
    config.load_file(first.path()).unwrap();
    config.load_file(second.path()).unwrap();
    config.reload().unwrap();

    assert_eq!(config.get_string("key").unwrap(), "second");
}

#[test]
fn test_reload_drops_manual_sets() {
    let file = temp_env("KEY=file\n");

    let mut config = DotEnv::new();
    config.load_file(file.path()).unwrap();
    config.set("key", "manual").set("only_manual", 1);
    config.reload().unwrap();

    assert_eq!(config.get_string("key").unwrap(), "file");
    assert!(!config.has("only_manual"));
}

#[test]
fn test_memory_env_existing_value_survives_without_override() {
    let file = temp_env("HOME_DIR=/from/file\nNEW_VAR=x\n");

    let mut config = DotEnv::builder()
        .mirror_to(MemoryEnv::with_vars(vec![("HOME_DIR", "/from/env")]))
        .override_existing(false)
        .build()
        .unwrap();
    config
        .load_file_with(file.path(), LoadOptions::default().override_existing(false))
        .unwrap();

    let env = config.env_store().unwrap();
    assert_eq!(env.get("HOME_DIR").as_deref(), Some("/from/env"));
    assert_eq!(env.get("NEW_VAR").as_deref(), Some("x"));
}

#[test]
#[cfg(feature = "env")]
fn test_env_prefix_source_over_file() {
    let mut env_guard = EnvGuard::new();
    env_guard.set("ENVDOT_PREC_TEST_DATABASE_HOST", "from-env");

    let file = temp_env("DATABASE_HOST=from-file\nDATABASE_PORT=5432\n");

    let config = DotEnv::builder()
        .with_file(file.path())
        .with_env_prefix("ENVDOT_PREC_TEST_")
        .build()
        .unwrap();

    assert_eq!(config.get_string("database.host").unwrap(), "from-env");
    assert_eq!(config.get_int("database.port").unwrap(), 5432);
}

#[test]
#[cfg(feature = "env")]
fn test_mirror_to_process_env() {
    let mut env_guard = EnvGuard::new();
    env_guard.track("ENVDOT_MIRROR_TEST_FLAG");
    env_guard.track("ENVDOT_MIRROR_TEST_COUNT");

    let file = temp_env("ENVDOT_MIRROR_TEST_FLAG=yes\nENVDOT_MIRROR_TEST_COUNT=3\n");

    let mut config = DotEnv::builder()
        .mirror_to_process_env()
        .with_file(file.path())
        .build()
        .unwrap();

    assert_eq!(env::var("ENVDOT_MIRROR_TEST_FLAG").unwrap(), "true");
    assert_eq!(env::var("ENVDOT_MIRROR_TEST_COUNT").unwrap(), "3");

    config.delete("envdot.mirror.test.count");
    assert!(env::var("ENVDOT_MIRROR_TEST_COUNT").is_err());
}

#[test]
#[cfg(feature = "env")]
fn test_process_env_not_overwritten_without_override() {
    let mut env_guard = EnvGuard::new();
    env_guard.set("ENVDOT_KEEP_TEST_VALUE", "original");

    let file = temp_env("ENVDOT_KEEP_TEST_VALUE=replaced\n");

    let config = DotEnv::builder()
        .mirror_to_process_env()
        .override_existing(false)
        .with_file(file.path())
        .build()
        .unwrap();

    assert_eq!(env::var("ENVDOT_KEEP_TEST_VALUE").unwrap(), "original");
    assert_eq!(config.get_string("envdot_keep_test_value").unwrap(), "replaced");
}
