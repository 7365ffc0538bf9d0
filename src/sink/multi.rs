//! 多路输出端

use super::{InsertSink, LoadStats};
use crate::error::Result;

/// 把每条语句依次发送给所有输出端，第一个错误立即返回
pub struct MultiSink {
    sinks: Vec<Box<dyn InsertSink>>,
}

impl MultiSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// 添加输出端
    pub fn add_sink<S>(&mut self, sink: S)
    where
        S: InsertSink + 'static,
    {
        self.sinks.push(Box::new(sink));
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// 获取所有输出端的统计信息
    pub fn get_all_stats(&self) -> Vec<(String, LoadStats)> {
        self.sinks
            .iter()
            .map(|sink| (sink.name().to_string(), sink.get_stats()))
            .collect()
    }
}

impl Default for MultiSink {
    fn default() -> Self {
        Self::new()
    }
}

impl InsertSink for MultiSink {
    fn name(&self) -> &str {
        "multi"
    }

    fn insert(&mut self, statement: &str) -> Result<()> {
        for sink in &mut self.sinks {
            sink.insert(statement)?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        for sink in &mut self.sinks {
            sink.finalize()?;
            #[cfg(feature = "logging")]
            tracing::debug!("输出端 {} 完成: {}", sink.name(), sink.get_stats());
        }
        Ok(())
    }

    fn get_stats(&self) -> LoadStats {
        let mut total = LoadStats::default();
        for sink in &self.sinks {
            total.merge(&sink.get_stats());
        }
        total
    }
}
