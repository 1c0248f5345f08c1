// ==========================================
// 游戏数据表导入工具 - 类型解析器注册表
// ==========================================
// 职责: 类型关键字 → 规范类型 → 解析器实例
// 缓存: 每个规范类型至多一个实例，按需惰性构造
// 归属: 注册表由单次导入运行持有，非全局状态
// ==========================================

use crate::domain::record::FieldValue;
use crate::domain::types::ColumnType;
use std::collections::{HashMap, HashSet};
use tracing::warn;

// ==========================================
// 类型解析器接口
// ==========================================
pub trait TypeParser: Send + Sync {
    /// 本解析器产出值的规范类型
    fn column_type(&self) -> ColumnType;

    /// 解析单元格文本；格式非法时返回 None，
    /// 调用方保持字段默认值并记录事件
    fn parse(&self, text: &str) -> Option<FieldValue>;
}

// ==========================================
// 标量解析器实现
// ==========================================
pub struct BoolParser;

impl TypeParser for BoolParser {
    fn column_type(&self) -> ColumnType {
        ColumnType::Bool
    }

    fn parse(&self, text: &str) -> Option<FieldValue> {
        match text.to_lowercase().as_str() {
            "1" | "true" | "yes" | "y" | "是" => Some(FieldValue::Bool(true)),
            "0" | "false" | "no" | "n" | "否" => Some(FieldValue::Bool(false)),
            _ => None,
        }
    }
}

pub struct IntParser;

impl TypeParser for IntParser {
    fn column_type(&self) -> ColumnType {
        ColumnType::Int
    }

    fn parse(&self, text: &str) -> Option<FieldValue> {
        text.parse::<i32>().ok().map(FieldValue::Int)
    }
}

pub struct LongParser;

impl TypeParser for LongParser {
    fn column_type(&self) -> ColumnType {
        ColumnType::Long
    }

    fn parse(&self, text: &str) -> Option<FieldValue> {
        text.parse::<i64>().ok().map(FieldValue::Long)
    }
}

pub struct FloatParser;

impl TypeParser for FloatParser {
    fn column_type(&self) -> ColumnType {
        ColumnType::Float
    }

    fn parse(&self, text: &str) -> Option<FieldValue> {
        text.parse::<f32>().ok().map(FieldValue::Float)
    }
}

pub struct DoubleParser;

impl TypeParser for DoubleParser {
    fn column_type(&self) -> ColumnType {
        ColumnType::Double
    }

    fn parse(&self, text: &str) -> Option<FieldValue> {
        text.parse::<f64>().ok().map(FieldValue::Double)
    }
}

pub struct TextParser;

impl TypeParser for TextParser {
    fn column_type(&self) -> ColumnType {
        ColumnType::Text
    }

    fn parse(&self, text: &str) -> Option<FieldValue> {
        Some(FieldValue::Text(text.to_string()))
    }
}

// ==========================================
// 列表解析器实现
// ==========================================
// 元素以逗号分隔，逐元素去除空白；
// 任一元素非法则整个单元格视为非法
pub struct IntListParser;

impl TypeParser for IntListParser {
    fn column_type(&self) -> ColumnType {
        ColumnType::IntList
    }

    fn parse(&self, text: &str) -> Option<FieldValue> {
        split_elements(text)
            .map(|e| e.parse::<i32>().ok())
            .collect::<Option<Vec<_>>>()
            .map(FieldValue::IntList)
    }
}

pub struct FloatListParser;

impl TypeParser for FloatListParser {
    fn column_type(&self) -> ColumnType {
        ColumnType::FloatList
    }

    fn parse(&self, text: &str) -> Option<FieldValue> {
        split_elements(text)
            .map(|e| e.parse::<f32>().ok())
            .collect::<Option<Vec<_>>>()
            .map(FieldValue::FloatList)
    }
}

pub struct TextListParser;

impl TypeParser for TextListParser {
    fn column_type(&self) -> ColumnType {
        ColumnType::TextList
    }

    fn parse(&self, text: &str) -> Option<FieldValue> {
        Some(FieldValue::TextList(
            split_elements(text).map(|e| e.to_string()).collect(),
        ))
    }
}

fn split_elements(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(|e| e.trim()).filter(|e| !e.is_empty())
}

// ==========================================
// 类型解析器注册表
// ==========================================
pub struct TypeParserRegistry {
    // 规范类型 → 缓存的解析器实例
    cached_parsers: HashMap<ColumnType, Box<dyn TypeParser>>,

    // 已警告过的未知关键字（每个关键字每次运行只警告一次）
    warned_keywords: HashSet<String>,
}

impl TypeParserRegistry {
    pub fn new() -> Self {
        Self {
            cached_parsers: HashMap::new(),
            warned_keywords: HashSet::new(),
        }
    }

    /// 类型关键字 → 规范类型（静态工厂，大小写不敏感）
    ///
    /// 列表形式支持 `list<元素>` 与 `元素[]` 两种写法
    pub fn canonical_type(keyword: &str) -> Option<ColumnType> {
        let kw = keyword.trim().to_lowercase();

        // 列表形式
        if let Some(element) = kw
            .strip_prefix("list<")
            .and_then(|rest| rest.strip_suffix('>'))
            .or_else(|| kw.strip_suffix("[]"))
        {
            return match element.trim() {
                "int" | "int32" | "integer" => Some(ColumnType::IntList),
                "float" | "single" => Some(ColumnType::FloatList),
                "string" | "str" | "text" => Some(ColumnType::TextList),
                _ => None,
            };
        }

        match kw.as_str() {
            "bool" | "boolean" => Some(ColumnType::Bool),
            "int" | "int32" | "integer" => Some(ColumnType::Int),
            "long" | "int64" => Some(ColumnType::Long),
            "float" | "single" => Some(ColumnType::Float),
            "double" | "float64" => Some(ColumnType::Double),
            "string" | "str" | "text" => Some(ColumnType::Text),
            _ => None,
        }
    }

    /// 解析关键字对应的解析器
    ///
    /// 同一规范类型的多个关键字共享同一个缓存实例；
    /// 未知关键字返回 None（调用方保持字段默认值，不中止导入）
    pub fn resolve(&mut self, keyword: &str) -> Option<&dyn TypeParser> {
        let column_type = Self::canonical_type(keyword)?;

        let parser = self
            .cached_parsers
            .entry(column_type)
            .or_insert_with(|| Self::create_parser(column_type));

        Some(&**parser)
    }

    /// 未知关键字首次出现时返回 true 并记录警告
    pub fn warn_unresolved(&mut self, keyword: &str) -> bool {
        if self.warned_keywords.insert(keyword.to_string()) {
            warn!(type_keyword = %keyword, "类型关键字不支持，相关字段保持默认值");
            true
        } else {
            false
        }
    }

    fn create_parser(column_type: ColumnType) -> Box<dyn TypeParser> {
        match column_type {
            ColumnType::Bool => Box::new(BoolParser),
            ColumnType::Int => Box::new(IntParser),
            ColumnType::Long => Box::new(LongParser),
            ColumnType::Float => Box::new(FloatParser),
            ColumnType::Double => Box::new(DoubleParser),
            ColumnType::Text => Box::new(TextParser),
            ColumnType::IntList => Box::new(IntListParser),
            ColumnType::FloatList => Box::new(FloatListParser),
            ColumnType::TextList => Box::new(TextListParser),
        }
    }
}

impl Default for TypeParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
