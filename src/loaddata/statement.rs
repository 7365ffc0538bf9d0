//! INSERT IGNORE 语句生成

use crate::loaddata::types::{Field, LoadDataInfo, Row, SqlType, TableInfo};
use crate::loaddata::utils::equal_fold;

impl LoadDataInfo {
    /// 把已累积的行渲染为一条多行 `INSERT IGNORE` 语句。
    ///
    /// 分片表的第一个分片列如果在导入列中、并且声明类型是数值类型，该列的值不加
    /// 引号，其余值一律用单引号包裹。行字段不足时补空字面量，超出导入列的字段被丢弃；
    /// 未声明导入列时输出行内全部字段。没有行时返回空字符串。
    pub fn make_insert(
        &self,
        rows: &[Row],
        table: &TableInfo,
        fields: &[Field],
    ) -> String {
        if rows.is_empty() {
            return String::new();
        }

        let mut sql = String::with_capacity(64 + rows.len() * 32);
        sql.push_str("INSERT IGNORE INTO ");
        sql.push_str(&self.table);
        if !self.columns.is_empty() {
            sql.push_str(" (");
            sql.push_str(&self.columns.join(","));
            sql.push(')');
        }
        sql.push_str(" values ");

        let numeric_idx = self
            .vindex_column(table, fields)
            .filter(|(_, sql_type)| sql_type.is_numeric())
            .map(|(idx, _)| idx);

        for (k, record) in rows.iter().enumerate() {
            if k > 0 {
                sql.push(',');
            }
            sql.push('(');
            let width = if self.columns.is_empty() {
                record.len()
            } else {
                self.columns.len()
            };
            for j in 0..width {
                if j > 0 {
                    sql.push(',');
                }
                let column = record.get(j).map_or("", String::as_str);
                // 空值即使在数值分片列上也输出 ''，避免生成 (,...) 这样的非法语句
                if numeric_idx == Some(j) && !column.is_empty() {
                    sql.push_str(column);
                } else {
                    sql.push('\'');
                    sql.push_str(column);
                    sql.push('\'');
                }
            }
            sql.push(')');
        }

        #[cfg(feature = "logging")]
        tracing::trace!(
            rows = rows.len(),
            len = sql.len(),
            numeric_vindex = numeric_idx.is_some(),
            "生成 INSERT 语句"
        );

        sql
    }

    /// 分片列在导入列中的位置及其声明类型，找不到类型时为 `SqlType::Null`
    fn vindex_column(
        &self,
        table: &TableInfo,
        fields: &[Field],
    ) -> Option<(usize, SqlType)> {
        let vindex = table.primary_sharding_column()?;
        let idx = self.columns.iter().position(|c| equal_fold(c, vindex))?;
        let sql_type = fields
            .iter()
            .find(|f| equal_fold(&f.name, vindex))
            .map(|f| f.sql_type)
            .unwrap_or_default();
        Some((idx, sql_type))
    }
}
