// ==========================================
// 游戏数据表导入工具 - 存储层
// ==========================================
// 职责: 地址计算 / 地址映射 / 分区段写入 / 目录维护
// 物理形态: 单个 SQLite 文件, 段 = 以地址命名的表
// ==========================================

// 模块声明
pub mod address;
pub mod address_map_repo;
pub mod maintenance;
pub mod segment_writer;
pub mod table_writer;

// 重导出核心类型
pub use address::{compute_local_address, segment_table_name};
pub use address_map_repo::{AddressMapRepository, ADDRESS_MAP_TABLE};
pub use maintenance::{
    purge_storage_dir, remove_journal_files, rename_to_packaged_assets, DB_FILE_EXTENSION,
    DB_FILE_NAME, PACKAGED_ASSET_EXTENSION,
};
pub use segment_writer::StoreSegmentWriter;
pub use table_writer::{TableStoreWriter, TableWriteOutcome};
