// ==========================================
// 游戏数据表导入工具 - 脚本模板
// ==========================================
// 三个替换占位符: 命名空间 / 类型名 / 属性块
// 模板缺失在任何文件 IO 之前阻断整次运行
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::path::Path;

// ==========================================
// 模板占位符
// ==========================================
pub mod specifiers {
    /// 命名空间占位符
    pub const NAMESPACE: &str = "#NAMESPACE#";

    /// 类型名占位符
    pub const SCRIPT_NAME: &str = "#SCRIPTNAME#";

    /// 属性块占位符
    pub const PROPERTIES: &str = "#PROPERTIES#";
}

// ==========================================
// ScriptTemplate - 行类型脚本模板
// ==========================================
#[derive(Debug, Clone)]
pub struct ScriptTemplate {
    text: String,
}

impl ScriptTemplate {
    /// 加载模板文件
    ///
    /// 文件缺失或不可读 → TemplateMissing（运行级阻断）
    pub fn load(path: &Path) -> ImportResult<Self> {
        if !path.exists() {
            return Err(ImportError::TemplateMissing(path.display().to_string()));
        }

        let text = std::fs::read_to_string(path)
            .map_err(|e| ImportError::TemplateMissing(format!("{}: {}", path.display(), e)))?;

        Ok(Self { text })
    }

    /// 从内存文本构造（测试用）
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    /// 渲染模板，替换三个占位符
    pub fn render(&self, namespace: &str, script_name: &str, properties: &str) -> String {
        self.text
            .replace(specifiers::NAMESPACE, namespace)
            .replace(specifiers::SCRIPT_NAME, script_name)
            .replace(specifiers::PROPERTIES, properties)
    }
}
