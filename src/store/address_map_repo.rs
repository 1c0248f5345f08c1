// ==========================================
// 游戏数据表导入工具 - 地址映射仓储
// ==========================================
// 共享地址映射表: 主键为表名, 本地地址唯一;
// 每张表的数据段写入前必须先登记地址
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::address_map::AddressMapEntry;
use crate::importer::error::{ImportError, ImportResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// 地址映射表名
pub const ADDRESS_MAP_TABLE: &str = "address_map";

// ==========================================
// AddressMapRepository
// ==========================================
pub struct AddressMapRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AddressMapRepository {
    /// 打开数据库并确保地址映射表存在
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &Path) -> ImportResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn ensure_table(&self) -> ImportResult<()> {
        let conn = self.lock_conn()?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS address_map (
                table_name    TEXT PRIMARY KEY,
                row_offset    INTEGER NOT NULL,
                primary_key   TEXT NOT NULL,
                local_address INTEGER NOT NULL UNIQUE,
                created_at    TEXT NOT NULL
            );
            "#,
        )?;

        Ok(())
    }

    /// 插入一条地址映射
    ///
    /// 表名重复或地址碰撞 → AddressInsertFailure，
    /// 该表整体中止，其余表继续
    pub fn insert(&self, entry: &AddressMapEntry) -> ImportResult<()> {
        let conn = self.lock_conn()?;

        conn.execute(
            r#"
            INSERT INTO address_map (
                table_name, row_offset, primary_key, local_address, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                entry.table_name,
                entry.row_offset as i64,
                entry.primary_key,
                entry.local_address as i64,
                entry.created_at,
            ],
        )
        .map_err(|e| ImportError::AddressInsertFailure {
            table: entry.table_name.clone(),
            message: e.to_string(),
        })?;

        Ok(())
    }

    /// 读回全部地址映射条目（按表名排序）
    pub fn read_all(&self) -> ImportResult<Vec<AddressMapEntry>> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT table_name, row_offset, primary_key, local_address, created_at
            FROM address_map
            ORDER BY table_name
            "#,
        )?;

        let entries = stmt
            .query_map([], |row| {
                Ok(AddressMapEntry {
                    table_name: row.get(0)?,
                    row_offset: row.get::<_, i64>(1)? as u32,
                    primary_key: row.get(2)?,
                    local_address: row.get::<_, i64>(3)? as u32,
                    created_at: row.get::<_, DateTime<Utc>>(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn lock_conn(&self) -> ImportResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ImportError::InternalError(format!("锁获取失败: {}", e)))
    }
}
