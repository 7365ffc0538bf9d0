//! 导入会话 - 持有一次 LOAD DATA 的全部状态并驱动读取循环

use crate::config::DEFAULT_READ_CHUNK_SIZE;
use crate::error::Result;
use crate::loaddata::catalog::TableCatalog;
use crate::loaddata::types::{Field, LoadDataInfo, Row, TableInfo};
use crate::sink::{InsertSink, LoadStats};
use std::io::{ErrorKind, Read};

/// 一次 LOAD DATA 会话
///
/// 数据块按到达顺序交给 `feed`，空数据块或 `finish` 表示流结束。
/// 会话只被一个读取循环驱动，语句严格按流顺序交给输出端。
#[derive(Debug)]
pub struct LoadSession {
    info: LoadDataInfo,
    table: TableInfo,
    fields: Vec<Field>,
    leftover: Vec<u8>,
    rows: Vec<Row>,
    stats: LoadStats,
    read_chunk_size: usize,
}

impl LoadSession {
    pub fn new(info: LoadDataInfo, table: TableInfo, fields: Vec<Field>) -> Self {
        Self {
            info,
            table,
            fields,
            leftover: Vec::new(),
            rows: Vec::new(),
            stats: LoadStats::new(),
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
        }
    }

    /// 从表元数据创建会话，只有分片表才需要列类型
    pub fn from_catalog<C: TableCatalog + ?Sized>(
        info: LoadDataInfo,
        catalog: &C,
    ) -> Result<Self> {
        let table = catalog.find_table(&info.table)?;
        let fields = if table.sharded {
            catalog.table_fields(&info.table)?
        } else {
            Vec::new()
        };

        #[cfg(feature = "logging")]
        tracing::debug!(
            "目标表 {}: sharded = {}, {} 个列类型",
            table.name,
            table.sharded,
            fields.len()
        );

        Ok(Self::new(info, table, fields))
    }

    /// 设置 `load_from_reader` 每次读取的字节数
    pub fn with_read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size.max(1);
        self
    }

    pub fn read_chunk_size(&self) -> usize {
        self.read_chunk_size
    }

    pub fn info(&self) -> &LoadDataInfo {
        &self.info
    }

    pub fn table(&self) -> &TableInfo {
        &self.table
    }

    /// 已解析但尚未写入输出端的行
    pub fn pending_rows(&self) -> &[Row] {
        &self.rows
    }

    /// 尚未切分成行的字节
    pub fn leftover(&self) -> &[u8] {
        &self.leftover
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    /// 处理一个数据块，空数据块表示流结束
    ///
    /// 出错时已累积的行保持不变，出错位置之后尚未处理的字节留在 `leftover` 中，
    /// 出错前已经写入的批次计入统计。输出端失败后可以先调用 `flush_pending`
    /// 重试，再继续 `feed`；解析失败的那一行被跳过。
    pub fn feed<S: InsertSink + ?Sized>(
        &mut self,
        chunk: &[u8],
        sink: &mut S,
    ) -> Result<()> {
        self.stats.bytes_received += chunk.len() as u64;
        let before = self.rows.len();
        let prev = std::mem::take(&mut self.leftover);

        let (commit, result) = self.info.commit_resumable(
            &prev,
            chunk,
            &mut self.rows,
            &self.table,
            &self.fields,
            sink,
        );

        self.stats.rows_parsed += commit.flushed_rows + self.rows.len() - before;
        self.stats.rows_flushed += commit.flushed_rows;
        self.stats.statements_flushed += commit.statements;
        self.leftover = commit.rest;
        result?;

        #[cfg(feature = "logging")]
        tracing::trace!(
            chunk = chunk.len(),
            leftover = self.leftover.len(),
            pending = self.rows.len(),
            "处理数据块"
        );

        Ok(())
    }

    /// 把尚未写入的行生成一条语句交给输出端，返回写入的行数
    ///
    /// 输出端失败时行保持不变，调用方可以重试。
    pub fn flush_pending<S: InsertSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<usize> {
        if self.rows.is_empty() {
            return Ok(0);
        }

        let sql = self.info.make_insert(&self.rows, &self.table, &self.fields);
        sink.insert(&sql)?;

        let flushed = self.rows.len();
        self.rows.clear();
        self.stats.record_flush(flushed);

        #[cfg(feature = "logging")]
        tracing::debug!("写入剩余 {} 行到输出端 {}", flushed, sink.name());

        Ok(flushed)
    }

    /// 结束会话：处理剩余数据、写入剩余行并返回统计信息
    pub fn finish<S: InsertSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<LoadStats> {
        if !self.leftover.is_empty() {
            self.feed(&[], sink)?;
        }
        self.flush_pending(sink)?;
        self.stats.finish();

        #[cfg(feature = "logging")]
        tracing::info!("表 {} 导入完成: {}", self.info.table, self.stats);

        Ok(self.stats.clone())
    }

    /// 从任意 `Read` 读取全部数据并完成会话
    pub fn load_from_reader<R: Read, S: InsertSink + ?Sized>(
        &mut self,
        mut reader: R,
        sink: &mut S,
    ) -> Result<LoadStats> {
        #[cfg(feature = "logging")]
        tracing::debug!(
            "开始导入表 {}, read_chunk_size = {}",
            self.info.table,
            self.read_chunk_size
        );

        let mut buf = vec![0u8; self.read_chunk_size];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => self.feed(&buf[..n], sink)?,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        let stats = self.finish(sink)?;
        sink.finalize()?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadDataError;
    use crate::loaddata::catalog::StaticCatalog;
    use crate::loaddata::types::{FieldsInfo, LinesInfo, SqlType};
    use crate::sink::{FnSink, MemorySink};
    use std::io::Cursor;

    fn info(batch: usize) -> LoadDataInfo {
        let mut info = LoadDataInfo::new(
            "t1",
            vec!["id".to_string(), "name".to_string()],
            LinesInfo::default(),
            FieldsInfo::new(",", 0),
        )
        .unwrap();
        info.set_max_rows_in_batch(batch);
        info
    }

    #[test]
    fn test_feed_and_finish() {
        let mut session = LoadSession::new(info(2), TableInfo::unsharded("t1"), vec![]);
        let mut sink = MemorySink::new();

        session.feed(b"1,a\n2,", &mut sink).unwrap();
        session.feed(b"b\n3,c", &mut sink).unwrap();
        assert_eq!(sink.statements().len(), 1);
        assert_eq!(session.leftover(), b"3,c");

        let stats = session.finish(&mut sink).unwrap();
        assert_eq!(stats.rows_parsed, 3);
        assert_eq!(stats.rows_flushed, 3);
        assert_eq!(stats.statements_flushed, 2);
        assert_eq!(stats.bytes_received, 11);
        assert!(session.pending_rows().is_empty());
        assert_eq!(
            sink.statements()[1],
            "INSERT IGNORE INTO t1 (id,name) values ('3','c')"
        );
    }

    #[test]
    fn test_flush_pending_keeps_rows_on_error() {
        let mut session = LoadSession::new(info(0), TableInfo::unsharded("t1"), vec![]);
        let mut ok = MemorySink::new();
        session.feed(b"1,a\n", &mut ok).unwrap();

        let mut failing =
            FnSink::new(|_: &str| Err(LoadDataError::sink_failure("fn", "down")));
        assert!(session.flush_pending(&mut failing).unwrap_err().is_sink_failure());
        assert_eq!(session.pending_rows().len(), 1);

        assert_eq!(session.flush_pending(&mut ok).unwrap(), 1);
        assert!(session.pending_rows().is_empty());
        assert_eq!(session.flush_pending(&mut ok).unwrap(), 0);
    }

    #[test]
    fn test_load_from_reader_small_chunks() {
        let data = b"1,a\n2,b\n3,c\n4,d\n5,e";
        let mut session = LoadSession::new(info(2), TableInfo::unsharded("t1"), vec![])
            .with_read_chunk_size(3);
        let mut sink = MemorySink::new();

        let stats = session.load_from_reader(Cursor::new(&data[..]), &mut sink).unwrap();
        assert_eq!(stats.rows_flushed, 5);
        assert_eq!(
            sink.statements(),
            [
                "INSERT IGNORE INTO t1 (id,name) values ('1','a'),('2','b')",
                "INSERT IGNORE INTO t1 (id,name) values ('3','c'),('4','d')",
                "INSERT IGNORE INTO t1 (id,name) values ('5','e')",
            ]
        );
    }

    #[test]
    fn test_from_catalog() {
        let mut catalog = StaticCatalog::new();
        catalog.add_table(
            TableInfo::sharded("t1", ["id"]),
            vec![Field::new("id", SqlType::Int32)],
        );

        let mut session = LoadSession::from_catalog(info(0), &catalog).unwrap();
        let mut sink = MemorySink::new();
        session.load_from_reader(&b"7,x\n8,y\n"[..], &mut sink).unwrap();
        assert_eq!(
            sink.statements(),
            ["INSERT IGNORE INTO t1 (id,name) values (7,'x'),(8,'y')"]
        );

        let err = LoadSession::from_catalog(info(0), &StaticCatalog::new()).unwrap_err();
        assert!(err.is_table_not_found());
    }
}
