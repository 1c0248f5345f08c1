// ==========================================
// 游戏数据表导入工具 - 地址映射条目
// ==========================================
// 每张导入表一条; 先写入共享地址映射表,
// 再按 local_address 定位该表的数据段
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 地址映射条目
///
/// 不变式: local_address 由 (table_name, row_offset) 确定性计算,
/// 且在同一次导入内唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressMapEntry {
    /// 表名（地址映射表主键）
    pub table_name: String,

    /// 数据起始行偏移（1-based，表头之后）
    pub row_offset: u32,

    /// 数据段主键列名
    pub primary_key: String,

    /// 计算出的本地地址
    pub local_address: u32,

    /// 写入时间
    pub created_at: DateTime<Utc>,
}

impl AddressMapEntry {
    pub fn new(table_name: &str, row_offset: u32, primary_key: &str, local_address: u32) -> Self {
        Self {
            table_name: table_name.to_string(),
            row_offset,
            primary_key: primary_key.to_string(),
            local_address,
            created_at: Utc::now(),
        }
    }
}
