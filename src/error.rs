//! 错误类型定义
//!
//! 这个模块定义了库中使用的所有错误类型，使用 thiserror 提供丰富的错误信息。
//! 注意：“尚未找到行起始符/终止符”不是错误，而是需要更多数据的正常信号。

/// LOAD DATA 流式处理的结果类型
pub type Result<T> = std::result::Result<T, LoadDataError>;

/// LOAD DATA 流式处理错误类型
#[derive(Debug, thiserror::Error)]
pub enum LoadDataError {
    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// 记录未按包围符包裹
    #[error("记录格式错误: 行 {line} 应以 {enclosed} 开始并以其结束")]
    MalformedRecord { line: String, enclosed: char },

    /// 转义函数收到空输入
    #[error("输入为空: 没有可处理的数据")]
    EmptyInput,

    /// 输出端（执行层）报告失败
    #[error("输出端 {sink} 执行失败: {message}")]
    SinkFailure { sink: String, message: String },

    /// 表元数据中找不到目标表
    #[error("未找到表: {table}")]
    TableNotFound { table: String },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// TOML 解析错误
    #[error("TOML解析错误: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("TOML序列化错误: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON 序列化错误
    #[cfg(feature = "sink-json")]
    #[error("JSON序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 日志错误（仅在启用 logging feature 时可用）
    #[cfg(feature = "logging")]
    #[error("日志错误: {0}")]
    Log(#[from] crate::logging::LogError),

    /// 其他错误
    #[error("未知错误: {0}")]
    Other(String),
}

impl LoadDataError {
    /// 创建一个记录格式错误
    pub fn malformed_record(line: &[u8], enclosed: u8) -> Self {
        let line = String::from_utf8_lossy(line).into_owned();
        let enclosed = char::from(enclosed);
        #[cfg(feature = "logging")]
        {
            crate::logging::ensure_logger_initialized();
            tracing::error!("记录格式错误: {} 未以 {} 包裹", line, enclosed);
        }
        Self::MalformedRecord { line, enclosed }
    }

    /// 创建一个输出端失败错误
    pub fn sink_failure<S: Into<String>, M: Into<String>>(
        sink: S,
        message: M,
    ) -> Self {
        let sink = sink.into();
        let message = message.into();
        #[cfg(feature = "logging")]
        {
            crate::logging::ensure_logger_initialized();
            tracing::error!("输出端 {} 执行失败: {}", sink, message);
        }
        Self::SinkFailure { sink, message }
    }

    /// 创建一个表不存在错误
    pub fn table_not_found<S: Into<String>>(table: S) -> Self {
        let table = table.into();
        #[cfg(feature = "logging")]
        {
            crate::logging::ensure_logger_initialized();
            tracing::error!("未找到表: {}", table);
        }
        Self::TableNotFound { table }
    }

    /// 创建一个配置错误
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        #[cfg(feature = "logging")]
        {
            crate::logging::ensure_logger_initialized();
            tracing::error!("配置错误: {}", message);
        }
        Self::Config(message)
    }

    /// 创建一个其他类型错误
    pub fn other<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        #[cfg(feature = "logging")]
        {
            crate::logging::ensure_logger_initialized();
            tracing::error!("未知错误: {}", message);
        }
        Self::Other(message)
    }

    /// 检查是否为 IO 错误
    pub fn is_io_error(&self) -> bool {
        matches!(self, LoadDataError::Io(_))
    }

    /// 检查是否为记录格式错误
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, LoadDataError::MalformedRecord { .. })
    }

    /// 检查是否为空输入错误
    pub fn is_empty_input(&self) -> bool {
        matches!(self, LoadDataError::EmptyInput)
    }

    /// 检查是否为输出端失败
    pub fn is_sink_failure(&self) -> bool {
        matches!(self, LoadDataError::SinkFailure { .. })
    }

    /// 检查是否为表不存在错误
    pub fn is_table_not_found(&self) -> bool {
        matches!(self, LoadDataError::TableNotFound { .. })
    }

    /// 检查是否为配置错误
    pub fn is_config_error(&self) -> bool {
        matches!(self, LoadDataError::Config(_))
    }

    /// 检查是否为其他错误
    pub fn is_other_error(&self) -> bool {
        matches!(self, LoadDataError::Other(_))
    }
}
