//! SQL 文件输出端

use super::{InsertSink, LoadStats};
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 每条语句写成一行 `statement;`
#[derive(Debug)]
pub struct FileSink {
    writer: BufWriter<File>,
    stats: LoadStats,
}

impl FileSink {
    /// 创建输出文件，已存在时覆盖
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref())?;

        #[cfg(feature = "logging")]
        tracing::debug!("SQL 输出文件: {}", path.as_ref().display());

        Ok(Self { writer: BufWriter::new(file), stats: LoadStats::new() })
    }
}

impl InsertSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn insert(&mut self, statement: &str) -> Result<()> {
        self.writer.write_all(statement.as_bytes())?;
        self.writer.write_all(b";\n")?;
        self.stats.statements_flushed += 1;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.stats.finish();

        #[cfg(feature = "logging")]
        tracing::info!("SQL 文件写入完成: {} 条语句", self.stats.statements_flushed);

        Ok(())
    }

    fn get_stats(&self) -> LoadStats {
        self.stats.clone()
    }
}
