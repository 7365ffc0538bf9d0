#![cfg(feature = "logging")]

use load_data_stream::config::Config;
use load_data_stream::logging::{
    LogConfig, init_default_logging, init_logging, parse_level,
};
use tracing::Level;

/// 测试默认日志初始化
#[test]
fn test_init_default_logging() {
    let result = init_default_logging();
    assert!(result.is_ok());
}

/// 重复初始化不算错误
#[test]
fn test_init_logging_twice() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config = LogConfig::new()
        .level(Level::DEBUG)
        .enable_stdout(false)
        .log_dir(temp_dir.path().to_string_lossy().to_string());
    assert!(init_logging(config.clone()).is_ok());
    assert!(init_logging(config).is_ok());
}

/// 测试日志配置默认值
#[test]
fn test_log_config_default() {
    let config = LogConfig::default();
    assert_eq!(config.level, Level::INFO);
    assert!(config.enable_stdout);
    assert_eq!(config.log_dir, "logs");
}

/// 测试从配置文件转换
#[test]
fn test_logging_config_from_config() {
    let mut config = Config::default();
    config.log.level = "trace".to_string();
    config.log.enable_stdout = false;

    let log_config = config.logging_config().unwrap();
    assert_eq!(log_config.level, Level::TRACE);
    assert!(!log_config.enable_stdout);

    config.log.level = "noisy".to_string();
    assert!(config.logging_config().is_err());
}

/// 测试所有级别字符串
#[test]
fn test_parse_all_levels() {
    let levels = [
        ("trace", Level::TRACE),
        ("debug", Level::DEBUG),
        ("info", Level::INFO),
        ("warn", Level::WARN),
        ("error", Level::ERROR),
    ];
    for (s, level) in levels {
        assert_eq!(parse_level(s).unwrap(), level);
    }
}
