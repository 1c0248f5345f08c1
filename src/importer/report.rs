// ==========================================
// 游戏数据表导入工具 - 导入报告
// ==========================================
// 宽松降级必须可观测: 未解析类型/单元格回退/
// 单条写入失败等事件进入结构化报告而非仅打日志
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

// ==========================================
// 事件类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    FileReadFailure,     // 文件读取失败，跳过该文件
    MalformedSchema,     // 表头不足 3 行，跳过该文件
    EmptySchema,         // 所有列均被丢弃，跳过该文件
    ScriptWriteFailure,  // 脚本生成失败，该文件无产物
    UnresolvedType,      // 类型关键字不支持（每关键字一条）
    CellParseFailure,    // 单元格解析失败，字段保持默认值
    AddressInsertFailure, // 地址映射写入失败，该表中止
    RecordInsertFailure, // 单条记录写入失败，跳过该条
}

/// 导入事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportIssue {
    pub kind: IssueKind,

    /// 关联表名（运行级事件为 None）
    pub table_name: Option<String>,

    /// 关联数据行号（1-based，表内事件为 None）
    pub row: Option<usize>,

    /// 关联列属性名
    pub column: Option<String>,

    pub message: String,
}

// ==========================================
// 单表结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableOutcome {
    pub table_name: String,

    /// 模式列数
    pub schema_columns: usize,

    /// 实例化的记录数
    pub rows_materialized: usize,

    /// 成功写入存储的记录数
    pub rows_written: usize,

    /// 写入失败被跳过的记录数
    pub rows_skipped: usize,

    /// 计算出的本地地址（该表写入中止时为 None）
    pub local_address: Option<u32>,

    /// 生成的脚本文件路径
    pub script_file: Option<String>,
}

impl TableOutcome {
    pub fn new(table_name: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            schema_columns: 0,
            rows_materialized: 0,
            rows_written: 0,
            rows_skipped: 0,
            local_address: None,
            script_file: None,
        }
    }
}

// ==========================================
// 导入报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub tables: Vec<TableOutcome>,
    pub issues: Vec<ImportIssue>,
}

impl ImportReport {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            finished_at: None,
            tables: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// 获取（必要时创建）某表的结果条目
    pub fn table_mut(&mut self, table_name: &str) -> &mut TableOutcome {
        if let Some(idx) = self.tables.iter().position(|t| t.table_name == table_name) {
            return &mut self.tables[idx];
        }

        self.tables.push(TableOutcome::new(table_name));
        self.tables.last_mut().unwrap()
    }

    pub fn add_issue(
        &mut self,
        kind: IssueKind,
        table_name: Option<&str>,
        row: Option<usize>,
        column: Option<&str>,
        message: String,
    ) {
        self.issues.push(ImportIssue {
            kind,
            table_name: table_name.map(|s| s.to_string()),
            row,
            column: column.map(|s| s.to_string()),
            message,
        });
    }

    /// 收尾并输出汇总日志
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());

        let total_written: usize = self.tables.iter().map(|t| t.rows_written).sum();
        info!(
            run_id = %self.run_id,
            tables = self.tables.len(),
            rows_written = total_written,
            issues = self.issues.len(),
            "导入运行结束"
        );
    }

    /// 将报告写为 JSON 文件
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}

impl Default for ImportReport {
    fn default() -> Self {
        Self::new()
    }
}
