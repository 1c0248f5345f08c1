// ==========================================
// 游戏数据表导入工具 - 运行状态机
// ==========================================
// Idle → SchemaExtraction → CodeGeneration →
// DataMaterialization → StorageWrite → Done
// 前置检查失败直接进入 Aborted, 不产生任何存储变更
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    Idle,                // 等待启动
    SchemaExtraction,    // 逐文件提取表模式
    CodeGeneration,      // 生成行类型脚本
    DataMaterialization, // 数据行实例化
    StorageWrite,        // 分区存储写入
    Done,                // 正常结束
    Aborted,             // 前置检查失败
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "IDLE"),
            RunState::SchemaExtraction => write!(f, "SCHEMA_EXTRACTION"),
            RunState::CodeGeneration => write!(f, "CODE_GENERATION"),
            RunState::DataMaterialization => write!(f, "DATA_MATERIALIZATION"),
            RunState::StorageWrite => write!(f, "STORAGE_WRITE"),
            RunState::Done => write!(f, "DONE"),
            RunState::Aborted => write!(f, "ABORTED"),
        }
    }
}
