// ==========================================
// 游戏数据表导入工具 - 行类型脚本生成器
// ==========================================
// 职责: 表模式 → 属性块 → 渲染模板 → 写出 .rs 文件
// 每张工作表一个生成文件; 未解析类型的列按 String 生成
// ==========================================

use crate::config::preferences::{ImportPreferences, DEFAULT_NAMESPACE};
use crate::domain::schema::TableSchema;
use crate::domain::types::ColumnType;
use crate::importer::error::ImportResult;
use crate::importer::type_parser::TypeParserRegistry;
use crate::codegen::template::ScriptTemplate;
use std::path::PathBuf;
use tracing::debug;

/// 生成脚本文件的扩展名
pub const SCRIPT_FILE_EXTENSION: &str = "rs";

// ==========================================
// RowScriptGenerator - 行类型脚本生成器
// ==========================================
pub struct RowScriptGenerator<'a> {
    template: &'a ScriptTemplate,
    namespace: String,
    output_dir: PathBuf,
}

impl<'a> RowScriptGenerator<'a> {
    pub fn new(template: &'a ScriptTemplate, prefs: &ImportPreferences) -> Self {
        Self {
            template,
            namespace: resolve_namespace(prefs),
            output_dir: prefs.script_output_dir.clone(),
        }
    }

    /// 为一张表生成行类型脚本并写入输出目录
    ///
    /// # 返回
    /// 生成文件的路径
    pub fn generate(&self, schema: &TableSchema) -> ImportResult<PathBuf> {
        let struct_name = to_pascal_case(&schema.table_name);
        let properties = properties_block(schema);
        let rendered = self.template.render(&self.namespace, &struct_name, &properties);

        std::fs::create_dir_all(&self.output_dir)?;

        let file_path = self
            .output_dir
            .join(format!("{}.{}", struct_name, SCRIPT_FILE_EXTENSION));
        std::fs::write(&file_path, rendered)?;

        debug!(table = %schema.table_name, file = %file_path.display(), "行类型脚本已生成");
        Ok(file_path)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// 生成属性块: 每列一段 doc 注释 + 字段声明
///
/// 多行注释被重排为连续的 /// 行
pub fn properties_block(schema: &TableSchema) -> String {
    let mut block = String::new();

    for (i, column) in schema.columns.iter().enumerate() {
        if !column.comment.is_empty() {
            for line in column.comment.split('\n') {
                block.push_str("    /// ");
                block.push_str(line);
                block.push('\n');
            }
        }

        let rust_type = TypeParserRegistry::canonical_type(&column.type_keyword)
            .unwrap_or(ColumnType::Text)
            .rust_type();

        block.push_str("    pub ");
        block.push_str(&to_snake_case(&column.property_name));
        block.push_str(": ");
        block.push_str(rust_type);
        block.push(',');

        if i < schema.columns.len() - 1 {
            block.push_str("\n\n");
        }
    }

    block
}

/// 解析生成脚本使用的命名空间
///
/// 自动模式: 从脚本输出目录推导（src/assets 标记之后的路径段，
/// 以 :: 连接）；推导为空时回退默认命名空间
pub fn resolve_namespace(prefs: &ImportPreferences) -> String {
    if !prefs.auto_generate_namespace {
        let explicit = prefs.namespace.trim();
        if !explicit.is_empty() {
            return explicit.to_string();
        }
        return DEFAULT_NAMESPACE.to_string();
    }

    let segments: Vec<String> = prefs
        .script_output_dir
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(|s| s.to_string())
        .collect();

    let marker_idx = segments
        .iter()
        .position(|s| s.eq_ignore_ascii_case("src") || s.eq_ignore_ascii_case("assets"));

    let namespace = match marker_idx {
        Some(idx) => segments[idx + 1..]
            .iter()
            .map(|s| to_snake_case(s))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("::"),
        None => String::new(),
    };

    if namespace.is_empty() {
        DEFAULT_NAMESPACE.to_string()
    } else {
        namespace
    }
}

/// PascalCase/camelCase/空白分隔 → snake_case
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::new();
    let mut prev_lower = false;

    for ch in name.chars() {
        if ch.is_whitespace() || ch == '-' || ch == '.' {
            if !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        } else if ch.is_uppercase() {
            if prev_lower && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }

    out.trim_matches('_').to_string()
}

/// snake_case/空白分隔 → PascalCase（已是 PascalCase 的输入保持不变）
pub fn to_pascal_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c.is_whitespace() || c == '.')
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
