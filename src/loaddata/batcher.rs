//! 批处理 - 驱动行切分与字段拆分，累积到阈值后生成语句并交给输出端

use crate::error::Result;
use crate::loaddata::types::{Field, LoadDataInfo, Row, TableInfo};
use crate::sink::InsertSink;
use std::borrow::Cow;

/// 一次 `insert_data` 的结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InsertProgress {
    /// 尚未消费的字节，作为下一次调用的 `prev`
    pub rest: Vec<u8>,
    /// 是否因为达到批次阈值而提前返回
    pub reach_limit: bool,
    /// 本次写入输出端的行数
    pub flushed_rows: usize,
}

/// 一次 `insert_data_with_commit` 的结果
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommitProgress {
    pub rest: Vec<u8>,
    /// 写入输出端的语句数
    pub statements: usize,
    /// 写入输出端的行数
    pub flushed_rows: usize,
}

impl LoadDataInfo {
    /// 处理一个数据块。
    ///
    /// `prev` 是上一次返回的 `rest`，`cur` 是新到达的数据。`cur` 为空表示流结束：
    /// 剩余数据会再切分一次，最后一条没有终止符的记录也会被解析。
    ///
    /// 行数达到 `max_rows_in_batch` 时生成一条语句交给 `sink`，成功后清空 `rows`
    /// 并立即返回（`reach_limit = true`），剩余数据由调用方继续处理。
    /// 出错时 `rows` 保持原样。
    pub fn insert_data<S: InsertSink + ?Sized>(
        &self,
        prev: &[u8],
        cur: &[u8],
        rows: &mut Vec<Row>,
        table: &TableInfo,
        fields: &[Field],
        sink: &mut S,
    ) -> Result<InsertProgress> {
        let (progress, result) = self.insert_resumable(prev, cur, rows, table, fields, sink);
        result.map(|()| progress)
    }

    /// 与 `insert_data` 相同，但出错时也返回进度：`rest` 是出错位置之后尚未
    /// 消费的字节，解析失败的那一行不在其中。
    fn insert_resumable<S: InsertSink + ?Sized>(
        &self,
        prev: &[u8],
        cur: &[u8],
        rows: &mut Vec<Row>,
        table: &TableInfo,
        fields: &[Field],
        sink: &mut S,
    ) -> (InsertProgress, Result<()>) {
        let mut progress = InsertProgress::default();
        if prev.is_empty() && cur.is_empty() {
            return (progress, Ok(()));
        }

        let is_eof = cur.is_empty();
        let (mut prev, mut cur) = if is_eof { (cur, prev) } else { (prev, cur) };
        let mut result = Ok(());

        while !(prev.is_empty() && cur.is_empty()) {
            let frame = self.get_line(prev, cur);
            (prev, cur) = (frame.carry, frame.rest);

            let line = match frame.line {
                Some(line) => line,
                None if !is_eof => break,
                None => {
                    let tail = [prev, cur].concat();
                    prev = &[];
                    cur = &[];
                    match self.final_record(tail, frame.has_starting) {
                        Some(body) => Cow::Owned(body),
                        None => break,
                    }
                }
            };

            match self.row_from_line(&line) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }

            if self.reach_limit(rows.len()) {
                let sql = self.make_insert(&rows[..], table, fields);
                if let Err(e) = sink.insert(&sql) {
                    result = Err(e);
                    break;
                }

                #[cfg(feature = "logging")]
                tracing::debug!(
                    sink = sink.name(),
                    rows = rows.len(),
                    "达到批次阈值，写入输出端"
                );

                progress.flushed_rows = rows.len();
                progress.reach_limit = true;
                rows.clear();
                break;
            }
        }

        progress.rest = [prev, cur].concat();
        (progress, result)
    }

    /// 流结束时剩余数据中的最后一条记录（去掉行起始符），没有行起始符时丢弃
    fn final_record(&self, tail: Vec<u8>, has_starting: bool) -> Option<Vec<u8>> {
        let starting = self.lines_info.starting.as_slice();
        match tail.strip_prefix(starting) {
            Some(body) if has_starting => Some(body.to_vec()),
            _ => {
                #[cfg(feature = "logging")]
                tracing::warn!(
                    discarded = tail.len(),
                    "流结束时剩余数据不含行起始符，已丢弃"
                );
                None
            }
        }
    }

    /// 反复调用 `insert_data`，直到不再因批次阈值提前返回。
    ///
    /// 流结束模式下重新调用时仍保持流结束模式，所以最后一条没有终止符的记录
    /// 不会丢失。
    pub fn insert_data_with_commit<S: InsertSink + ?Sized>(
        &self,
        prev: &[u8],
        cur: &[u8],
        rows: &mut Vec<Row>,
        table: &TableInfo,
        fields: &[Field],
        sink: &mut S,
    ) -> Result<CommitProgress> {
        let (commit, result) = self.commit_resumable(prev, cur, rows, table, fields, sink);
        result.map(|()| commit)
    }

    /// 与 `insert_data_with_commit` 相同，但出错时也返回进度：
    /// 出错前已经写入的语句数、行数，以及尚未消费的字节。
    pub(crate) fn commit_resumable<S: InsertSink + ?Sized>(
        &self,
        prev: &[u8],
        cur: &[u8],
        rows: &mut Vec<Row>,
        table: &TableInfo,
        fields: &[Field],
        sink: &mut S,
    ) -> (CommitProgress, Result<()>) {
        let is_eof = cur.is_empty();
        let (mut progress, mut result) =
            self.insert_resumable(prev, cur, rows, table, fields, sink);
        let mut commit = CommitProgress::default();

        while result.is_ok() && progress.reach_limit {
            commit.statements += 1;
            commit.flushed_rows += progress.flushed_rows;

            let rest = std::mem::take(&mut progress.rest);
            (progress, result) = if is_eof {
                self.insert_resumable(&rest, &[], rows, table, fields, sink)
            } else {
                self.insert_resumable(&[], &rest, rows, table, fields, sink)
            };
        }

        commit.rest = progress.rest;
        (commit, result)
    }
}
