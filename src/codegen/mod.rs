// ==========================================
// 游戏数据表导入工具 - 代码生成层
// ==========================================
// 职责: 表模式 → 行类型源码文件
// ==========================================

// 模块声明
pub mod generator;
pub mod template;

// 重导出核心类型
pub use generator::{
    properties_block, resolve_namespace, to_pascal_case, to_snake_case, RowScriptGenerator,
    SCRIPT_FILE_EXTENSION,
};
pub use template::{specifiers, ScriptTemplate};
