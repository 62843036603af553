//! Integration tests for warmer-config

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use temp_env::with_vars;
use warmer_config::domains::logging::{LogFormat, LogLevel};
use warmer_config::*;

#[test]
fn test_default_config_validation() {
    let config = WarmerConfig::default();
    assert!(config.validate_all().is_ok());
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("WARMER_CONCURRENCY", Some("12")),
        ("WARMER_REQUEST_TIMEOUT", Some("3")),
        ("WARMER_LOG_LEVEL", Some("debug")),
        ("WARMER_LOG_FORMAT", Some("json")),
        ("WARMER_ERROR_LOG", Some("errors.log")),
    ];

    with_vars(vars, || {
        let loader = ConfigLoader::new();
        let config = loader.from_env().unwrap();

        assert_eq!(config.engine.concurrency, 12);
        assert_eq!(config.engine.request_timeout, Duration::from_secs(3));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.error_log, Some(PathBuf::from("errors.log")));
    });
}

#[test]
fn test_invalid_env_override_is_rejected() {
    with_vars(vec![("WARMER_CONCURRENCY", Some("many"))], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    });

    with_vars(vec![("WARMER_CONCURRENCY", Some("0"))], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(result, Err(ConfigError::DomainError { .. })));
    });
}

#[test]
fn test_custom_prefix() {
    with_vars(vec![("WARMUP_CONCURRENCY", Some("2"))], || {
        let config = ConfigLoader::with_prefix("WARMUP").from_env().unwrap();
        assert_eq!(config.engine.concurrency, 2);
    });
}

#[test]
fn test_yaml_config_serialization() {
    let yaml = WarmerConfig::generate_sample();
    let parsed: WarmerConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.validate_all().is_ok());
    assert_eq!(parsed.engine, EngineConfig::default());
}

#[test]
fn test_comprehensive_config_file() {
    let yaml = r#"
engine:
  concurrency: 20
  request_timeout: 4

http:
  max_redirects: 3
  user_agent: "Warmup Bot"
  verify_ssl: false

cache:
  indicators:
    - header: x-cache
      hit_tokens: [HIT]
    - header: cf-cache-status
      hit_tokens: [HIT, STALE]

logging:
  level: warn
  format: compact
"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    with_vars(vec![("WARMER_CONCURRENCY", None::<&str>)], || {
        let config = ConfigLoader::new().from_file(file.path()).unwrap();

        assert_eq!(config.engine.concurrency, 20);
        assert_eq!(config.engine.request_timeout, Duration::from_secs(4));
        assert_eq!(config.http.user_agent, "Warmup Bot");
        assert!(!config.http.verify_ssl);
        assert_eq!(config.cache.indicators.len(), 2);
        assert_eq!(config.cache.indicators[1].hit_tokens, vec!["HIT", "STALE"]);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.logging.format, LogFormat::Compact);
    });
}

#[test]
fn test_env_overrides_file_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "engine:\n  concurrency: 20").unwrap();

    with_vars(vec![("WARMER_CONCURRENCY", Some("7"))], || {
        let config = ConfigLoader::new().load(Some(file.path())).unwrap();
        assert_eq!(config.engine.concurrency, 7);
    });
}

#[test]
fn test_missing_file_is_read_error() {
    let result = ConfigLoader::new().from_file("/definitely/not/here.yaml");
    assert!(matches!(result, Err(ConfigError::FileReadError(_))));
}

#[test]
fn test_invalid_file_contents() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "engine:\n  concurrency: 0").unwrap();

    with_vars(vec![("WARMER_CONCURRENCY", None::<&str>)], || {
        let result = ConfigLoader::new().from_file(file.path());
        assert!(result.is_err());
    });
}
