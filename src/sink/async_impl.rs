//! 异步输出端

use super::{LoadStats, MemorySink};
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter as AsyncBufWriter};

/// 语句输出端的统一接口 (异步版本)
#[async_trait]
pub trait AsyncInsertSink: Send {
    /// 输出端名称
    fn name(&self) -> &str;

    /// 执行一条语句
    async fn insert(&mut self, statement: &str) -> Result<()>;

    /// 完成输出，清理资源
    async fn finalize(&mut self) -> Result<()> {
        Ok(())
    }

    /// 获取输出统计信息
    fn get_stats(&self) -> LoadStats {
        LoadStats::default()
    }
}

#[async_trait]
impl AsyncInsertSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert(&mut self, statement: &str) -> Result<()> {
        crate::sink::InsertSink::insert(self, statement)
    }

    async fn finalize(&mut self) -> Result<()> {
        crate::sink::InsertSink::finalize(self)
    }

    fn get_stats(&self) -> LoadStats {
        crate::sink::InsertSink::get_stats(self)
    }
}

/// SQL 文件输出端 (异步版本)
#[derive(Debug)]
pub struct AsyncFileSink {
    writer: AsyncBufWriter<File>,
    stats: LoadStats,
}

impl AsyncFileSink {
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path).await?;
        Ok(Self { writer: AsyncBufWriter::new(file), stats: LoadStats::new() })
    }
}

#[async_trait]
impl AsyncInsertSink for AsyncFileSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn insert(&mut self, statement: &str) -> Result<()> {
        self.writer.write_all(statement.as_bytes()).await?;
        self.writer.write_all(b";\n").await?;
        self.stats.statements_flushed += 1;
        Ok(())
    }

    async fn finalize(&mut self) -> Result<()> {
        self.writer.flush().await?;
        self.stats.finish();

        #[cfg(feature = "logging")]
        tracing::info!(
            "SQL 文件写入完成 (异步): {} 条语句",
            self.stats.statements_flushed
        );

        Ok(())
    }

    fn get_stats(&self) -> LoadStats {
        self.stats.clone()
    }
}
