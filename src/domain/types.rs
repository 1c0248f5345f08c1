// ==========================================
// 游戏数据表导入工具 - 领域类型定义
// ==========================================
// 列的规范类型与存储位置枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 列规范类型 (Column Type)
// ==========================================
// 多个类型关键字可归一到同一规范类型
// ("int"/"int32"/"integer" → Int)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    Bool,
    Int,
    Long,
    Float,
    Double,
    Text,
    IntList,
    FloatList,
    TextList,
}

impl ColumnType {
    /// 生成代码中对应的 Rust 类型名
    pub fn rust_type(&self) -> &'static str {
        match self {
            ColumnType::Bool => "bool",
            ColumnType::Int => "i32",
            ColumnType::Long => "i64",
            ColumnType::Float => "f32",
            ColumnType::Double => "f64",
            ColumnType::Text => "String",
            ColumnType::IntList => "Vec<i32>",
            ColumnType::FloatList => "Vec<f32>",
            ColumnType::TextList => "Vec<String>",
        }
    }

    /// 存储段中对应的 SQLite 列亲和性
    ///
    /// 列表类型以 JSON 文本落库
    pub fn sqlite_affinity(&self) -> &'static str {
        match self {
            ColumnType::Bool | ColumnType::Int | ColumnType::Long => "INTEGER",
            ColumnType::Float | ColumnType::Double => "REAL",
            ColumnType::Text
            | ColumnType::IntList
            | ColumnType::FloatList
            | ColumnType::TextList => "TEXT",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Bool => write!(f, "BOOL"),
            ColumnType::Int => write!(f, "INT"),
            ColumnType::Long => write!(f, "LONG"),
            ColumnType::Float => write!(f, "FLOAT"),
            ColumnType::Double => write!(f, "DOUBLE"),
            ColumnType::Text => write!(f, "TEXT"),
            ColumnType::IntList => write!(f, "INT_LIST"),
            ColumnType::FloatList => write!(f, "FLOAT_LIST"),
            ColumnType::TextList => write!(f, "TEXT_LIST"),
        }
    }
}

// ==========================================
// 存储位置 (Storage Location)
// ==========================================
// 数据库文件的三个可配置根位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageLocation {
    PersistentDataPath, // 平台可写数据目录
    ResourcesPath,      // 项目打包资源目录
    StreamingAssetsPath, // 项目流式资源目录
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageLocation::PersistentDataPath => write!(f, "PERSISTENT_DATA_PATH"),
            StorageLocation::ResourcesPath => write!(f, "RESOURCES_PATH"),
            StorageLocation::StreamingAssetsPath => write!(f, "STREAMING_ASSETS_PATH"),
        }
    }
}
