//! 日志初始化和配置模块
//!
//! 这个模块提供了统一的日志初始化功能，使用 tracing 库。
//! 默认配置：控制台输出 + 日志目录按天滚动的文件输出。

use std::io;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// 日志文件名前缀
pub const LOG_FILE_PREFIX: &str = "load-data";

/// 日志配置结构体
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别
    pub level: Level,
    /// 是否输出到控制台
    pub enable_stdout: bool,
    /// 日志文件目录
    pub log_dir: String,
}

impl LogConfig {
    /// 创建新的日志配置，使用默认级别
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置日志级别
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// 设置是否输出到控制台
    pub fn enable_stdout(mut self, enable: bool) -> Self {
        self.enable_stdout = enable;
        self
    }

    /// 设置日志文件目录
    pub fn log_dir<S: Into<String>>(mut self, dir: S) -> Self {
        self.log_dir = dir.into();
        self
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            enable_stdout: true,
            log_dir: "logs".to_string(),
        }
    }
}

/// 自动初始化日志系统（仅初始化一次）
static INIT_LOGGER: Once = Once::new();

/// 确保日志系统已初始化
///
/// 首次调用时初始化日志系统，后续调用不会重复初始化。
/// 如果初始化失败（比如已经被其他地方初始化过），会安静地忽略错误。
pub(crate) fn ensure_logger_initialized() {
    INIT_LOGGER.call_once(|| {
        let _ = init_default_logging();
    });
}

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),
    #[error("日志配置错误: {0}")]
    Config(String),
}

/// 日志初始化结果
pub type LogResult<T> = Result<T, LogError>;

/// 解析日志级别字符串 (trace, debug, info, warn, error)
pub fn parse_level(level: &str) -> LogResult<Level> {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(LogError::Config(format!("无效的日志级别: {other}"))),
    }
}

/// 初始化日志系统
///
/// - 控制台输出（可通过 `enable_stdout` 关闭）
/// - `log_dir` 目录下按天滚动的日志文件
/// - `RUST_LOG` 环境变量优先于配置的级别
///
/// # Examples
///
/// ```no_run
/// use load_data_stream::logging::{init_logging, LogConfig};
/// use tracing::Level;
///
/// let config = LogConfig::new().level(Level::DEBUG);
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> LogResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let file_appender =
        tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(SystemTime)
        .with_target(true)
        .with_thread_ids(true)
        .with_ansi(false);

    let console_layer = config.enable_stdout.then(|| {
        fmt::layer()
            .with_timer(SystemTime)
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(true)
    });

    let subscriber = Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer);

    // 已经初始化过不算错误
    if subscriber.try_init().is_ok() {
        // 保持 guard 防止退出时丢失日志
        std::mem::forget(guard);
        tracing::info!(
            "日志系统初始化完成 - 级别: {}, 目录: {}",
            config.level,
            config.log_dir
        );
    }
    Ok(())
}

/// 使用默认配置初始化日志系统
pub fn init_default_logging() -> LogResult<()> {
    init_logging(LogConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_level("WARN").unwrap(), Level::WARN);
        assert!(parse_level("verbose").is_err());
    }

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new()
            .level(Level::ERROR)
            .enable_stdout(false)
            .log_dir("target/test-logs");
        assert_eq!(config.level, Level::ERROR);
        assert!(!config.enable_stdout);
        assert_eq!(config.log_dir, "target/test-logs");
    }
}
