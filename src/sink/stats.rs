//! 导入统计信息模块

/// 导入统计信息
#[derive(Debug, Default, Clone)]
pub struct LoadStats {
    /// 已接收的字节数
    pub bytes_received: u64,
    /// 已解析的记录数
    pub rows_parsed: usize,
    /// 已写入输出端的记录数
    pub rows_flushed: usize,
    /// 已写入输出端的语句数
    pub statements_flushed: usize,
    /// 开始时间
    pub start_time: Option<std::time::Instant>,
    /// 完成时间
    pub end_time: Option<std::time::Instant>,
}

impl LoadStats {
    /// 创建新的统计信息，记录开始时间
    pub fn new() -> Self {
        Self {
            start_time: Some(std::time::Instant::now()),
            ..Default::default()
        }
    }

    /// 标记导入完成，记录结束时间
    pub fn finish(&mut self) {
        self.end_time = Some(std::time::Instant::now());
    }

    /// 计算持续时间
    pub fn duration(&self) -> Option<std::time::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    /// 计算每秒写入的记录数
    pub fn rows_per_second(&self) -> Option<f64> {
        self.duration().map(|d| {
            if d.as_secs_f64() > 0.0 {
                self.rows_flushed as f64 / d.as_secs_f64()
            } else {
                0.0
            }
        })
    }

    /// 已解析但尚未写入的记录数
    pub fn pending_rows(&self) -> usize {
        self.rows_parsed.saturating_sub(self.rows_flushed)
    }

    /// 记录一次成功的写入
    pub fn record_flush(&mut self, rows: usize) {
        self.rows_flushed += rows;
        self.statements_flushed += 1;
    }

    /// 重置统计信息
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 合并其他统计信息
    pub fn merge(&mut self, other: &LoadStats) {
        self.bytes_received += other.bytes_received;
        self.rows_parsed += other.rows_parsed;
        self.rows_flushed += other.rows_flushed;
        self.statements_flushed += other.statements_flushed;

        // 保持最早的开始时间
        if let Some(other_start) = other.start_time {
            match self.start_time {
                Some(self_start) if self_start <= other_start => {}
                _ => self.start_time = Some(other_start),
            }
        }

        // 保持最晚的结束时间
        if let Some(other_end) = other.end_time {
            match self.end_time {
                Some(self_end) if self_end >= other_end => {}
                _ => self.end_time = Some(other_end),
            }
        }
    }
}

impl std::fmt::Display for LoadStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "接收: {} 字节, 解析: {} 行, 写入: {} 行 / {} 条语句",
            self.bytes_received,
            self.rows_parsed,
            self.rows_flushed,
            self.statements_flushed
        )?;

        if let Some(duration) = self.duration() {
            write!(f, ", 耗时: {:.2}s", duration.as_secs_f64())?;

            if let Some(rps) = self.rows_per_second() {
                write!(f, ", 速度: {:.2} 行/秒", rps)?;
            }
        }

        Ok(())
    }
}
