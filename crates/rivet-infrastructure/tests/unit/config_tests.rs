//! Configuration loader tests

use rivet_application::CollisionPolicy;
use rivet_domain::Error;
use rivet_infrastructure::config::{
    AppConfig, ConfigBuilder, ConfigLoader, LoggingConfig, RemoteConfig, SseConfig,
};
use rivet_infrastructure::constants::DEFAULT_LOG_LEVEL;
use std::time::Duration;
use tempfile::TempDir;

/// Loader isolated from the process environment and the working directory
fn isolated_loader(temp_dir: &TempDir, prefix: &str) -> ConfigLoader {
    ConfigLoader::new()
        .with_config_path(temp_dir.path().join("missing.toml"))
        .with_env_prefix(prefix)
}

fn write_config(temp_dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = temp_dir.path().join("rivet.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = isolated_loader(&temp_dir, "RIVET_TEST_DEFAULTS").load().unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.container.protocol_collision, CollisionPolicy::Fail);
    assert!(!config.container.eager_singletons);
}

#[test]
fn test_toml_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
[logging]
level = "debug"
json_format = true

[container]
eager_singletons = true
protocol_collision = "first_wins"

[sse]
channel_capacity = 8
"#,
    );

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("RIVET_TEST_TOML")
        .load()
        .unwrap();

    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json_format);
    assert!(config.container.eager_singletons);
    assert_eq!(config.container.protocol_collision, CollisionPolicy::FirstWins);
    assert_eq!(config.sse.channel_capacity, 8);
    // untouched sections keep their defaults
    assert_eq!(config.remote, RemoteConfig::default());
    assert_eq!(config.sse.send_timeout_ms, SseConfig::default().send_timeout_ms);
}

#[test]
#[allow(unsafe_code)]
fn test_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[sse]\nchannel_capacity = 8\n");

    // Prefix unique to this test so parallel tests never observe it
    unsafe {
        std::env::set_var("RIVET_TEST_ENV_SSE__CHANNEL_CAPACITY", "16");
        std::env::set_var("RIVET_TEST_ENV_REMOTE__TIMEOUT_SECS", "3");
    }

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("RIVET_TEST_ENV")
        .load()
        .unwrap();

    assert_eq!(config.sse.channel_capacity, 16);
    assert_eq!(config.remote.timeout_secs, 3);
}

#[test]
fn test_zero_channel_capacity_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[sse]\nchannel_capacity = 0\n");

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("RIVET_TEST_ZERO")
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[logging]\nlevel = \"loud\"\n");

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("RIVET_TEST_LEVEL")
        .load()
        .unwrap_err();

    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_unknown_collision_policy_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[container]\nprotocol_collision = \"last_wins\"\n");

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("RIVET_TEST_POLICY")
        .load();

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_save_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("saved.toml");

    let original = ConfigBuilder::new()
        .with_logging(LoggingConfig {
            level: "warn".to_string(),
            json_format: true,
            file_output: Some(temp_dir.path().join("logs").join("rivet.log")),
        })
        .with_protocol_collision(CollisionPolicy::FirstWins)
        .with_eager_singletons(true)
        .build();

    let loader = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("RIVET_TEST_SAVE");
    loader.save_to_file(&original, &path).unwrap();

    assert_eq!(loader.config_path(), Some(path.as_path()));
    assert_eq!(loader.load().unwrap(), original);
}

#[test]
fn test_sections_convert_to_runtime_options() {
    let sse = SseConfig {
        channel_capacity: 4,
        send_timeout_ms: 250,
        reconnect_delay_ms: 1500,
    };
    let options = sse.options();
    assert_eq!(options.channel_capacity, 4);
    assert_eq!(options.send_timeout, Duration::from_millis(250));
    assert_eq!(options.reconnect_delay, Duration::from_millis(1500));

    let remote = RemoteConfig {
        timeout_secs: 7,
        connect_timeout_secs: 2,
        user_agent: "orders/1.0".to_string(),
    };
    let provider_config = remote.provider_config();
    assert_eq!(provider_config.timeout_secs, 7);
    assert_eq!(provider_config.connect_timeout_secs, 2);
    assert_eq!(provider_config.user_agent, "orders/1.0");
}
