use crate::config::LoadConfig;
use crate::error::{LoadDataError, Result};
use serde::{Deserialize, Serialize};

/// 每条 INSERT 默认包含的最大行数
pub const DEFAULT_MAX_ROWS_IN_BATCH: usize = 1000;

/// 一条记录拆分后的字段，按导入列顺序排列
pub type Row = Vec<String>;

/// 列的标量类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlType {
    #[default]
    Null,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int24,
    Uint24,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
    Decimal,
    Timestamp,
    Date,
    Time,
    Datetime,
    Year,
    Text,
    Blob,
    Varchar,
    Varbinary,
    Char,
    Binary,
    Bit,
    Enum,
    Set,
    Json,
}

impl SqlType {
    /// 分片列为这些类型时值不加引号
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            SqlType::Int8
                | SqlType::Uint8
                | SqlType::Int16
                | SqlType::Uint16
                | SqlType::Int24
                | SqlType::Uint24
                | SqlType::Int32
                | SqlType::Uint32
                | SqlType::Int64
                | SqlType::Uint64
                | SqlType::Float32
                | SqlType::Float64
                | SqlType::Decimal
        )
    }
}

/// 目标表的列描述（列名 + 声明类型）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub sql_type: SqlType,
}

impl Field {
    pub fn new<S: Into<String>>(name: S, sql_type: SqlType) -> Self {
        Self { name: name.into(), sql_type }
    }
}

/// 目标表描述：是否分片以及按 vindex 顺序排列的分片列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub sharded: bool,
    pub sharding_columns: Vec<String>,
}

impl TableInfo {
    /// 非分片表
    pub fn unsharded<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), sharded: false, sharding_columns: Vec::new() }
    }

    /// 分片表
    pub fn sharded<S, I, C>(name: S, sharding_columns: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            name: name.into(),
            sharded: true,
            sharding_columns: sharding_columns
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }

    /// 第一个分片列（决定数值类型是否需要加引号）
    pub fn primary_sharding_column(&self) -> Option<&str> {
        if !self.sharded {
            return None;
        }
        self.sharding_columns.first().map(String::as_str)
    }
}

/// LINES 子句：行起始符与行终止符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinesInfo {
    /// 可为空，为空时任意位置都是合法的行首
    pub starting: Vec<u8>,
    /// 不可为空
    pub terminated: Vec<u8>,
}

impl LinesInfo {
    pub fn new<S: Into<Vec<u8>>, T: Into<Vec<u8>>>(
        starting: S,
        terminated: T,
    ) -> Self {
        Self { starting: starting.into(), terminated: terminated.into() }
    }
}

impl Default for LinesInfo {
    /// MySQL 默认值: STARTING BY '' TERMINATED BY '\n'
    fn default() -> Self {
        Self::new(Vec::new(), b"\n".to_vec())
    }
}

/// FIELDS 子句：字段分隔符与可选的包围符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldsInfo {
    pub terminated: Vec<u8>,
    /// `None` 表示未启用包围符
    pub enclosed: Option<u8>,
}

impl FieldsInfo {
    /// `enclosed` 为 0 或空格时视为未启用包围符
    pub fn new<T: Into<Vec<u8>>>(terminated: T, enclosed: u8) -> Self {
        let enclosed = match enclosed {
            0 | b' ' => None,
            b => Some(b),
        };
        Self { terminated: terminated.into(), enclosed }
    }
}

impl Default for FieldsInfo {
    /// MySQL 默认值: TERMINATED BY '\t' ENCLOSED BY ''
    fn default() -> Self {
        Self::new(b"\t".to_vec(), 0)
    }
}

/// 一次 LOAD DATA 会话的语句参数
///
/// 帧切分、字段拆分、INSERT 生成和批处理都以 `impl LoadDataInfo`
/// 的形式分布在 `loaddata` 的各个子模块中。
#[derive(Debug, Clone)]
pub struct LoadDataInfo {
    pub(crate) max_rows_in_batch: usize,
    pub lines_info: LinesInfo,
    pub fields_info: FieldsInfo,
    pub columns: Vec<String>,
    pub table: String,
}

impl LoadDataInfo {
    /// 创建会话参数，行终止符和字段分隔符不能为空
    pub fn new<S: Into<String>>(
        table: S,
        columns: Vec<String>,
        lines_info: LinesInfo,
        fields_info: FieldsInfo,
    ) -> Result<Self> {
        if lines_info.terminated.is_empty() {
            return Err(LoadDataError::config_error(
                "LINES TERMINATED BY 不能为空",
            ));
        }
        if fields_info.terminated.is_empty() {
            return Err(LoadDataError::config_error(
                "FIELDS TERMINATED BY 不能为空",
            ));
        }
        Ok(Self {
            max_rows_in_batch: DEFAULT_MAX_ROWS_IN_BATCH,
            lines_info,
            fields_info,
            columns,
            table: table.into(),
        })
    }

    /// 从配置构建
    pub fn from_config(config: &LoadConfig) -> Result<Self> {
        config.validate()?;
        let lines = LinesInfo::new(
            config.lines.starting.as_bytes(),
            config.lines.terminated.as_bytes(),
        );
        let fields = FieldsInfo::new(
            config.fields.terminated.as_bytes(),
            config.enclosed_byte(),
        );
        let mut info =
            Self::new(config.table.clone(), config.columns.clone(), lines, fields)?;
        info.set_max_rows_in_batch(config.max_rows_in_batch);
        Ok(info)
    }

    /// 设置每条 INSERT 的最大行数，0 表示不分批
    pub fn set_max_rows_in_batch(&mut self, limit: usize) {
        self.max_rows_in_batch = limit;
    }

    pub fn max_rows_in_batch(&self) -> usize {
        self.max_rows_in_batch
    }

    /// 是否达到批次阈值
    pub(crate) fn reach_limit(&self, rows: usize) -> bool {
        self.max_rows_in_batch != 0 && rows >= self.max_rows_in_batch
    }
}
