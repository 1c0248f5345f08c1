// ==========================================
// 游戏数据表导入工具 - 领域层
// ==========================================
// 职责: 模式/记录/地址映射的核心数据结构
// ==========================================

// 模块声明
pub mod address_map;
pub mod record;
pub mod schema;
pub mod types;

// 重导出核心类型
pub use address_map::AddressMapEntry;
pub use record::{DataRecord, FieldValue};
pub use schema::{ColumnDescriptor, TableSchema};
pub use types::{ColumnType, StorageLocation};
