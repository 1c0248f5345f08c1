// ==========================================
// 游戏数据表导入工具 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 传播策略: 单文件/单记录失败隔离并记录,
//           仅模板/偏好设置缺失阻断整次运行
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xls/.xlsx/.csv）")]
    UnsupportedFormat(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 表头/模式错误 =====
    #[error("表头不完整 (表 {table}): 仅 {rows} 行，至少需要 3 行表头")]
    MalformedSchema { table: String, rows: usize },

    // ===== 类型解析错误 =====
    #[error("类型关键字不支持: {0}")]
    UnresolvedType(String),

    // ===== 运行前置条件错误 =====
    #[error("找不到行类型脚本模板: {0}")]
    TemplateMissing(String),

    #[error("偏好设置无效 (字段 {field}): {message}")]
    PreferencesInvalid { field: String, message: String },

    // ===== 存储错误 =====
    #[error("地址映射写入失败 (表 {table}): {message}")]
    AddressInsertFailure { table: String, message: String },

    #[error("记录写入失败 (表 {table}, 行 {row}): {message}")]
    RecordInsertFailure {
        table: String,
        row: usize,
        message: String,
    },

    #[error("数据库操作失败: {0}")]
    DatabaseError(String),

    // ===== IO 错误 =====
    #[error("IO 操作失败: {0}")]
    IoFailure(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::IoFailure(err.to_string())
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        ImportError::DatabaseError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
