//! JSON Lines 输出端

use super::{InsertSink, LoadStats};
use crate::error::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct StatementLine<'a> {
    seq: usize,
    statement: &'a str,
}

/// 每条语句写成一行 JSON 对象 `{"seq":1,"statement":"..."}`
#[derive(Debug)]
pub struct JsonlSink {
    writer: BufWriter<File>,
    stats: LoadStats,
}

impl JsonlSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { writer: BufWriter::new(file), stats: LoadStats::new() })
    }
}

impl InsertSink for JsonlSink {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn insert(&mut self, statement: &str) -> Result<()> {
        let line =
            StatementLine { seq: self.stats.statements_flushed + 1, statement };
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")?;
        self.stats.statements_flushed += 1;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.stats.finish();
        Ok(())
    }

    fn get_stats(&self) -> LoadStats {
        self.stats.clone()
    }
}
