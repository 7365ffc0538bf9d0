//! 内存输出端

use super::{InsertSink, LoadStats};
use crate::error::Result;

/// 按顺序收集所有语句，主要用于测试与异步驱动的中转
#[derive(Debug, Default)]
pub struct MemorySink {
    statements: Vec<String>,
    stats: LoadStats,
}

impl MemorySink {
    pub fn new() -> Self {
        Self { statements: Vec::new(), stats: LoadStats::new() }
    }

    /// 已收集的语句
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// 取出已收集的语句，统计信息保持不变
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.statements)
    }

    pub fn into_statements(self) -> Vec<String> {
        self.statements
    }
}

impl InsertSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    fn insert(&mut self, statement: &str) -> Result<()> {
        self.statements.push(statement.to_string());
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
