//! # load-data-stream
//!
//! 分片 SQL 路由层中 `LOAD DATA LOCAL INFILE` 的流式处理库：把客户端任意切分的
//! 字节流切成记录、拆分字段并解码转义，按批次生成多行 `INSERT IGNORE` 语句，
//! 交给执行层（`InsertSink`）。
//!
//! ```no_run
//! use load_data_stream::{
//!     FieldsInfo, LinesInfo, LoadDataInfo, LoadSession, MemorySink, TableInfo,
//! };
//!
//! let info = LoadDataInfo::new(
//!     "t1",
//!     vec!["id".into(), "name".into()],
//!     LinesInfo::default(),
//!     FieldsInfo::new(",", b'"'),
//! )?;
//! let mut session = LoadSession::new(info, TableInfo::unsharded("t1"), vec![]);
//! let mut sink = MemorySink::new();
//! session.load_from_reader(&b"\"1\",\"a\"\n"[..], &mut sink)?;
//! # Ok::<(), load_data_stream::LoadDataError>(())
//! ```

// 核心模块 - 始终可用
pub mod config;
pub mod error;
pub mod loaddata;

// 日志模块 - 需要 logging 功能
#[cfg(feature = "logging")]
pub mod logging;

// 输出端模块
pub mod sink;

pub use error::{LoadDataError, Result};
pub use loaddata::{
    Field, FieldsInfo, LinesInfo, LoadDataInfo, LoadSession, Row, SqlType,
    StaticCatalog, TableCatalog, TableInfo,
};
pub use sink::{FnSink, InsertSink, LoadStats, MemorySink, MultiSink};
