//! LOAD DATA 流式处理
//!
//! 数据以任意大小的块到达，处理流程为：
//!
//! ```text
//! 数据块 ─► framer (行切分) ─► splitter (字段拆分 + escape) ─► batcher
//!                                                                │
//!                                  达到 max_rows_in_batch ◄──────┘
//!                                           │
//!                               statement (INSERT IGNORE) ─► InsertSink
//! ```
//!
//! 每个阶段都以 `impl LoadDataInfo` 的形式写在各自的子模块中，
//! `LoadSession` 持有一次导入的状态并驱动读取循环。

pub mod batcher;
pub mod catalog;
pub mod escape;
pub mod framer;
pub mod session;
pub mod splitter;
pub mod statement;
pub mod types;
pub mod utils;

#[cfg(feature = "async")]
pub mod async_session;

pub use batcher::{CommitProgress, InsertProgress};
pub use catalog::{StaticCatalog, TableCatalog};
pub use escape::{escape, escape_char, escape_cols, mysql_escape};
pub use framer::LineFrame;
pub use session::LoadSession;
pub use types::{
    DEFAULT_MAX_ROWS_IN_BATCH, Field, FieldsInfo, LinesInfo, LoadDataInfo, Row,
    SqlType, TableInfo,
};
