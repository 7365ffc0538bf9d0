//! 配置管理模块
//!
//! 提供统一的配置文件读取和管理功能

use crate::error::{LoadDataError, Result};
use crate::loaddata::types::{Field, DEFAULT_MAX_ROWS_IN_BATCH};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 默认每次读取的块大小（字节）
pub const DEFAULT_READ_CHUNK_SIZE: usize = 16 * 1024;

/// 主配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 日志配置
    pub log: LogConfig,
    /// LOAD DATA 配置
    pub load: LoadConfig,
    /// 静态表元数据（可选）
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 是否启用控制台输出
    pub enable_stdout: bool,
    /// 日志输出目录
    pub log_dir: String,
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// LOAD DATA 语句相关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    /// 目标表名
    pub table: String,
    /// 声明的导入列，为空表示不输出列清单
    #[serde(default)]
    pub columns: Vec<String>,
    /// 每条 INSERT 的最大行数，0 表示只在流结束时写入
    #[serde(default = "default_max_rows_in_batch")]
    pub max_rows_in_batch: usize,
    /// 每次从输入读取的块大小（字节）
    #[serde(default = "default_read_chunk_size")]
    pub read_chunk_size: usize,
    /// LINES 子句
    #[serde(default)]
    pub lines: LinesConfig,
    /// FIELDS 子句
    #[serde(default)]
    pub fields: FieldsConfig,
}

/// LINES STARTING BY / TERMINATED BY
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinesConfig {
    #[serde(default)]
    pub starting: String,
    pub terminated: String,
}

/// FIELDS TERMINATED BY / ENCLOSED BY
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldsConfig {
    pub terminated: String,
    /// 为空或单个字节
    #[serde(default)]
    pub enclosed: String,
}

/// 静态表元数据配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// 表名
    pub name: String,
    /// 是否为分片表
    #[serde(default)]
    pub sharded: bool,
    /// 分片列（按 vindex 顺序）
    #[serde(default)]
    pub sharding_columns: Vec<String>,
    /// 列类型信息
    #[serde(default)]
    pub fields: Vec<Field>,
}

fn default_max_rows_in_batch() -> usize {
    DEFAULT_MAX_ROWS_IN_BATCH
}

fn default_read_chunk_size() -> usize {
    DEFAULT_READ_CHUNK_SIZE
}

impl Config {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// 从字符串加载配置
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        match self.log.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(LoadDataError::config_error(format!(
                    "无效的日志级别: {}",
                    self.log.level
                )));
            }
        }

        self.load.validate()?;

        for table in &self.tables {
            if table.sharded && table.sharding_columns.is_empty() {
                return Err(LoadDataError::config_error(format!(
                    "分片表 {} 未配置分片列",
                    table.name
                )));
            }
        }

        Ok(())
    }

    /// 转换为日志模块的初始化配置
    #[cfg(feature = "logging")]
    pub fn logging_config(&self) -> Result<crate::logging::LogConfig> {
        let level = crate::logging::parse_level(&self.log.level)?;
        Ok(crate::logging::LogConfig::new()
            .level(level)
            .enable_stdout(self.log.enable_stdout)
            .log_dir(self.log.log_dir.clone()))
    }
}

impl LoadConfig {
    /// 验证 LOAD DATA 配置
    pub fn validate(&self) -> Result<()> {
        if self.table.is_empty() {
            return Err(LoadDataError::config_error("目标表名不能为空"));
        }
        if self.lines.terminated.is_empty() {
            return Err(LoadDataError::config_error(
                "LINES TERMINATED BY 不能为空",
            ));
        }
        if self.fields.terminated.is_empty() {
            return Err(LoadDataError::config_error(
                "FIELDS TERMINATED BY 不能为空",
            ));
        }
        if self.fields.enclosed.len() > 1 {
            return Err(LoadDataError::config_error(format!(
                "ENCLOSED BY 只能是单个字节: {:?}",
                self.fields.enclosed
            )));
        }
        if self.read_chunk_size == 0 {
            return Err(LoadDataError::config_error("读取块大小不能为0"));
        }
        Ok(())
    }

    /// 包围符字节，0 表示未配置
    pub fn enclosed_byte(&self) -> u8 {
        self.fields.enclosed.as_bytes().first().copied().unwrap_or(0)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enable_stdout: true,
            log_dir: "logs".to_string(),
            level: "info".to_string(),
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            table: "t".to_string(),
            columns: Vec::new(),
            max_rows_in_batch: DEFAULT_MAX_ROWS_IN_BATCH,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            lines: LinesConfig::default(),
            fields: FieldsConfig::default(),
        }
    }
}

impl Default for LinesConfig {
    fn default() -> Self {
        Self { starting: String::new(), terminated: "\n".to_string() }
    }
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self { terminated: "\t".to_string(), enclosed: String::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        // 测试无效日志级别
        config.log.level = "invalid".to_string();
        assert!(config.validate().is_err());

        // 测试空的行终止符
        config.log.level = "info".to_string();
        config.load.lines.terminated.clear();
        assert!(config.validate().is_err());

        // 测试多字节包围符
        config.load.lines.terminated = "\n".to_string();
        config.load.fields.enclosed = "\"\"".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed_config: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.log.level, parsed_config.log.level);
        assert_eq!(
            config.load.max_rows_in_batch,
            parsed_config.load.max_rows_in_batch
        );
    }

    #[test]
    fn test_enclosed_byte() {
        let mut load = LoadConfig::default();
        assert_eq!(load.enclosed_byte(), 0);
        load.fields.enclosed = "\"".to_string();
        assert_eq!(load.enclosed_byte(), b'"');
    }
}
