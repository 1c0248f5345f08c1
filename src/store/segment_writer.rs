// ==========================================
// 游戏数据表导入工具 - 存储段写入器
// ==========================================
// 存储段 = 以本地地址命名的 SQLite 表;
// 每列按规范类型映射亲和性, 主键取模式第一列
// 单条写入失败仅跳过该条, 不中止本表
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::record::DataRecord;
use crate::domain::schema::TableSchema;
use crate::domain::types::ColumnType;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::report::{ImportReport, IssueKind};
use crate::importer::type_parser::TypeParserRegistry;
use crate::store::address::segment_table_name;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// StoreSegmentWriter
// ==========================================
pub struct StoreSegmentWriter {
    conn: Arc<Mutex<Connection>>,
}

impl StoreSegmentWriter {
    /// 打开数据库连接
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &Path) -> ImportResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 确保本地地址处存在与模式匹配的存储段
    ///
    /// # 返回
    /// 存储段表名
    pub fn ensure_segment(
        &self,
        local_address: u32,
        schema: &TableSchema,
        primary_column: &str,
    ) -> ImportResult<String> {
        let segment = segment_table_name(local_address);

        let mut column_defs: Vec<String> = schema
            .columns
            .iter()
            .map(|c| {
                let affinity = TypeParserRegistry::canonical_type(&c.type_keyword)
                    .unwrap_or(ColumnType::Text)
                    .sqlite_affinity();
                format!("{} {}", quote_identifier(&c.property_name), affinity)
            })
            .collect();
        column_defs.push(format!("PRIMARY KEY ({})", quote_identifier(primary_column)));

        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_identifier(&segment),
            column_defs.join(", ")
        );

        let conn = self.lock_conn()?;
        conn.execute_batch(&sql)?;

        Ok(segment)
    }

    /// 按实例化顺序写入记录
    ///
    /// 单条失败（如主键重复）记录到报告并跳过；
    /// 返回成功写入的条数
    pub fn insert_records(
        &self,
        segment: &str,
        schema: &TableSchema,
        records: &[DataRecord],
        report: &mut ImportReport,
    ) -> ImportResult<usize> {
        let conn = self.lock_conn()?;

        let column_list = schema
            .columns
            .iter()
            .map(|c| quote_identifier(&c.property_name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=schema.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");

        let mut stmt = conn.prepare(&format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(segment),
            column_list,
            placeholders
        ))?;

        let mut written = 0;
        for (i, record) in records.iter().enumerate() {
            let sql_values: Vec<rusqlite::types::Value> =
                record.values.iter().map(|v| v.to_sql_value()).collect();

            match stmt.execute(rusqlite::params_from_iter(sql_values)) {
                Ok(_) => written += 1,
                Err(e) => {
                    // 单条失败不中止本表
                    let row = i + 1;
                    warn!(
                        table = %schema.table_name,
                        row = row,
                        error = %e,
                        "记录写入失败，已跳过"
                    );
                    report.add_issue(
                        IssueKind::RecordInsertFailure,
                        Some(&schema.table_name),
                        Some(row),
                        None,
                        format!("记录写入失败: {}", e),
                    );
                }
            }
        }

        Ok(written)
    }

    /// 统计某存储段的记录数
    pub fn count_records(&self, segment: &str) -> ImportResult<usize> {
        let conn = self.lock_conn()?;

        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_identifier(segment)),
            [],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }

    fn lock_conn(&self) -> ImportResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ImportError::InternalError(format!("锁获取失败: {}", e)))
    }
}

/// SQL 标识符加引号（内部引号翻倍转义）
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
