// ==========================================
// 游戏数据表导入工具 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 流程: 表格解析 → 模式提取 → 代码生成 → 行实例化 → 分区存储
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 模式/记录/地址映射
pub mod domain;

// 导入层 - 表格解析与行实例化
pub mod importer;

// 代码生成层 - 行类型源码生成
pub mod codegen;

// 存储层 - 分区键值数据库
pub mod store;

// 引擎层 - 导入流程编排
pub mod engine;

// 配置层 - 导入偏好设置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ColumnType, StorageLocation};

// 领域实体
pub use domain::{AddressMapEntry, ColumnDescriptor, DataRecord, FieldValue, TableSchema};

// 导入层
pub use importer::{
    extract_schema, materialize, CsvSheetReader, ExcelSheetReader, ImportError, ImportIssue,
    ImportReport, ImportResult, IssueKind, SheetGrid, SheetReader, TableOutcome,
    TypeParserRegistry, UniversalSheetReader,
};

// 代码生成
pub use codegen::{RowScriptGenerator, ScriptTemplate};

// 存储层
pub use store::{AddressMapRepository, StoreSegmentWriter, TableStoreWriter, TableWriteOutcome};

// 引擎
pub use engine::{ImportOrchestrator, RunState, TableImportPipeline};

// 配置
pub use config::ImportPreferences;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "游戏数据表导入工具";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
