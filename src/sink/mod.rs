//! 语句输出端模块
//!
//! 批处理器生成的每条 `INSERT IGNORE` 语句都交给一个 `InsertSink`。
//! 执行层（连接池、分片路由等）通过实现这个 trait 接入；库内置了
//! 内存、文件、JSON Lines 与多路分发几种实现。

use crate::error::Result;

pub mod stats;
pub use stats::LoadStats;

pub mod memory;
pub use memory::MemorySink;

pub mod multi;
pub use multi::MultiSink;

#[cfg(feature = "sink-file")]
pub mod file;
#[cfg(feature = "sink-file")]
pub use file::FileSink;

#[cfg(feature = "sink-json")]
pub mod json;
#[cfg(feature = "sink-json")]
pub use json::JsonlSink;

#[cfg(feature = "async")]
pub mod async_impl;
#[cfg(feature = "async")]
pub use async_impl::{AsyncFileSink, AsyncInsertSink};

/// 语句输出端的统一接口
pub trait InsertSink {
    /// 输出端名称
    fn name(&self) -> &str;

    /// 执行一条语句。返回的错误原样传播给调用方
    fn insert(&mut self, statement: &str) -> Result<()>;

    /// 完成输出，清理资源
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }

    /// 获取输出统计信息
    fn get_stats(&self) -> LoadStats {
        LoadStats::default()
    }
}

impl<S: InsertSink + ?Sized> InsertSink for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn insert(&mut self, statement: &str) -> Result<()> {
        (**self).insert(statement)
    }

    fn finalize(&mut self) -> Result<()> {
        (**self).finalize()
    }

    fn get_stats(&self) -> LoadStats {
        (**self).get_stats()
    }
}

/// 以闭包作为输出端
pub struct FnSink<F> {
    func: F,
    stats: LoadStats,
}

impl<F> FnSink<F>
where
    F: FnMut(&str) -> Result<()>,
{
    pub fn new(func: F) -> Self {
        Self { func, stats: LoadStats::new() }
    }
}

impl<F> InsertSink for FnSink<F>
where
    F: FnMut(&str) -> Result<()>,
{
    fn name(&self) -> &str {
        "fn"
    }

    fn insert(&mut self, statement: &str) -> Result<()> {
        (self.func)(statement)?;
        self.stats.statements_flushed += 1;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.stats.finish();
        Ok(())
    }

    fn get_stats(&self) -> LoadStats {
        self.stats.clone()
    }
}
