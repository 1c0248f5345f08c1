// ==========================================
// 游戏数据表导入工具 - 分区表写入器
// ==========================================
// 流程: 计算地址 → 登记地址映射 → 确保存储段 →
//       顺序写入记录 → 释放句柄
// 地址登记失败中止本表, 其余表继续
// ==========================================

use crate::domain::address_map::AddressMapEntry;
use crate::domain::record::DataRecord;
use crate::domain::schema::TableSchema;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::report::ImportReport;
use crate::store::address::compute_local_address;
use crate::store::address_map_repo::AddressMapRepository;
use crate::store::segment_writer::StoreSegmentWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 单表写入结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableWriteOutcome {
    pub local_address: u32,
    pub rows_written: usize,
    pub rows_skipped: usize,
}

// ==========================================
// TableStoreWriter
// ==========================================
pub struct TableStoreWriter {
    db_path: PathBuf,
}

impl TableStoreWriter {
    pub fn new(db_path: &Path) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// 将一张表的记录写入分区存储
    ///
    /// 步骤逐级前置: 任一前置失败即中止本表;
    /// 单条记录失败仅跳过该条。
    /// 地址映射与存储段句柄在本函数作用域内获取,
    /// 无论成败在返回时释放
    pub fn write_table(
        &self,
        schema: &TableSchema,
        row_offset: u32,
        records: &[DataRecord],
        report: &mut ImportReport,
    ) -> ImportResult<TableWriteOutcome> {
        let primary_column = schema
            .primary_column()
            .ok_or_else(|| ImportError::InternalError(format!(
                "表 {} 的模式为空，无法确定主键列",
                schema.table_name
            )))?;

        // 步骤 1: 计算本地地址
        let local_address = compute_local_address(&schema.table_name, row_offset);
        debug!(
            table = %schema.table_name,
            local_address = format!("{:#010x}", local_address),
            "本地地址已计算"
        );

        // 步骤 2: 登记地址映射（失败中止本表）
        let address_map = AddressMapRepository::new(&self.db_path)?;
        let entry = AddressMapEntry::new(&schema.table_name, row_offset, primary_column, local_address);
        address_map.insert(&entry)?;

        // 步骤 3: 确保存储段存在且形状与模式一致
        let segment_writer = StoreSegmentWriter::new(&self.db_path)?;
        let segment = segment_writer.ensure_segment(local_address, schema, primary_column)?;

        // 步骤 4: 按实例化顺序写入记录
        let written = segment_writer.insert_records(&segment, schema, records, report)?;
        let skipped = records.len() - written;

        info!(
            table = %schema.table_name,
            segment = %segment,
            written = written,
            skipped = skipped,
            "数据段写入完成"
        );

        // 步骤 5: 句柄随作用域释放
        Ok(TableWriteOutcome {
            local_address,
            rows_written: written,
            rows_skipped: skipped,
        })
    }
}
