// ==========================================
// 游戏数据表导入工具 - 引擎层
// ==========================================
// 职责: 导入流程编排与运行状态机
// ==========================================

// 模块声明
pub mod orchestrator;
pub mod run_state;

// 重导出核心类型
pub use orchestrator::{ImportOrchestrator, TableImportPipeline, REPORT_FILE_NAME};
pub use run_state::RunState;
