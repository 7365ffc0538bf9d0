//! 表元数据边界

use crate::config::TableConfig;
use crate::error::{LoadDataError, Result};
use crate::loaddata::types::{Field, TableInfo};
use std::collections::HashMap;

/// 目标表元数据来源（如 schema 缓存、路由表）
pub trait TableCatalog {
    /// 查找目标表
    fn find_table(&self, name: &str) -> Result<TableInfo>;

    /// 目标表的列描述
    fn table_fields(&self, name: &str) -> Result<Vec<Field>>;
}

/// 内存中的表元数据
#[derive(Debug, Default, Clone)]
pub struct StaticCatalog {
    tables: HashMap<String, (TableInfo, Vec<Field>)>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加或替换一张表
    pub fn add_table(&mut self, table: TableInfo, fields: Vec<Field>) {
        self.tables.insert(table.name.clone(), (table, fields));
    }

    /// 从配置文件中的 `[[tables]]` 构建
    pub fn from_config(tables: &[TableConfig]) -> Self {
        let mut catalog = Self::new();
        for t in tables {
            let info = if t.sharded {
                TableInfo::sharded(t.name.clone(), t.sharding_columns.clone())
            } else {
                TableInfo::unsharded(t.name.clone())
            };
            catalog.add_table(info, t.fields.clone());
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableCatalog for StaticCatalog {
    fn find_table(&self, name: &str) -> Result<TableInfo> {
        self.tables
            .get(name)
            .map(|(table, _)| table.clone())
            .ok_or_else(|| LoadDataError::table_not_found(name))
    }

    fn table_fields(&self, name: &str) -> Result<Vec<Field>> {
        self.tables
            .get(name)
            .map(|(_, fields)| fields.clone())
            .ok_or_else(|| LoadDataError::table_not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaddata::types::SqlType;

    #[test]
    fn test_lookup() {
        let mut catalog = StaticCatalog::new();
        catalog.add_table(
            TableInfo::sharded("t1", ["id"]),
            vec![Field::new("id", SqlType::Int64)],
        );

        let table = catalog.find_table("t1").unwrap();
        assert!(table.sharded);
        assert_eq!(catalog.table_fields("t1").unwrap().len(), 1);
        assert!(catalog.find_table("t2").unwrap_err().is_table_not_found());
        assert!(catalog.table_fields("t2").unwrap_err().is_table_not_found());
    }

    #[test]
    fn test_from_config() {
        let tables = vec![
            TableConfig {
                name: "t1".to_string(),
                sharded: true,
                sharding_columns: vec!["id".to_string()],
                fields: vec![Field::new("id", SqlType::Int32)],
            },
            TableConfig {
                name: "t2".to_string(),
                sharded: false,
                sharding_columns: vec!["ignored".to_string()],
                fields: vec![],
            },
        ];
        let catalog = StaticCatalog::from_config(&tables);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.find_table("t1").unwrap().primary_sharding_column(),
            Some("id")
        );
        assert!(!catalog.find_table("t2").unwrap().sharded);
    }
}
