// ==========================================
// 游戏数据表导入工具 - 动态记录
// ==========================================
// 记录 = 与模式列序对齐的带标签值序列
// 空单元格保持类型默认值
// ==========================================

use crate::domain::schema::TableSchema;
use crate::domain::types::ColumnType;
use serde::{Deserialize, Serialize};

// ==========================================
// 字段值 (Field Value)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
    IntList(Vec<i32>),
    FloatList(Vec<f32>),
    TextList(Vec<String>),
}

impl FieldValue {
    /// 规范类型对应的默认值
    pub fn default_for(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Bool => FieldValue::Bool(false),
            ColumnType::Int => FieldValue::Int(0),
            ColumnType::Long => FieldValue::Long(0),
            ColumnType::Float => FieldValue::Float(0.0),
            ColumnType::Double => FieldValue::Double(0.0),
            ColumnType::Text => FieldValue::Text(String::new()),
            ColumnType::IntList => FieldValue::IntList(Vec::new()),
            ColumnType::FloatList => FieldValue::FloatList(Vec::new()),
            ColumnType::TextList => FieldValue::TextList(Vec::new()),
        }
    }

    /// 转换为 SQLite 存储值
    ///
    /// 列表类型序列化为 JSON 文本
    pub fn to_sql_value(&self) -> rusqlite::types::Value {
        use rusqlite::types::Value;

        match self {
            FieldValue::Bool(b) => Value::Integer(*b as i64),
            FieldValue::Int(i) => Value::Integer(*i as i64),
            FieldValue::Long(l) => Value::Integer(*l),
            FieldValue::Float(f) => Value::Real(*f as f64),
            FieldValue::Double(d) => Value::Real(*d),
            FieldValue::Text(s) => Value::Text(s.clone()),
            FieldValue::IntList(v) => {
                Value::Text(serde_json::to_string(v).unwrap_or_else(|_| "[]".to_string()))
            }
            FieldValue::FloatList(v) => {
                Value::Text(serde_json::to_string(v).unwrap_or_else(|_| "[]".to_string()))
            }
            FieldValue::TextList(v) => {
                Value::Text(serde_json::to_string(v).unwrap_or_else(|_| "[]".to_string()))
            }
        }
    }
}

// ==========================================
// 数据记录 (Data Record)
// ==========================================
// 一行数据；values 与 schema.columns 顺序一一对应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    pub values: Vec<FieldValue>,
}

impl DataRecord {
    /// 按模式分配一条全默认值记录
    ///
    /// 未知类型关键字的列以 Text 默认值占位，
    /// 与“未解析类型字段保持默认”的约定一致
    pub fn with_defaults(schema: &TableSchema, type_of: impl Fn(&str) -> Option<ColumnType>) -> Self {
        let values = schema
            .columns
            .iter()
            .map(|c| {
                let ct = type_of(&c.type_keyword).unwrap_or(ColumnType::Text);
                FieldValue::default_for(ct)
            })
            .collect();

        Self { values }
    }

    /// 按属性名赋值；属性不存在时返回 false
    pub fn set_field(&mut self, schema: &TableSchema, property_name: &str, value: FieldValue) -> bool {
        match schema.column_index(property_name) {
            Some(idx) => {
                self.values[idx] = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, idx: usize) -> Option<&FieldValue> {
        self.values.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::ColumnDescriptor;
    use crate::importer::type_parser::TypeParserRegistry;

    fn sample_schema() -> TableSchema {
        TableSchema::new(
            "Items",
            vec![
                ColumnDescriptor::new("Id", "int", ""),
                ColumnDescriptor::new("Name", "string", ""),
            ],
        )
    }

    #[test]
    fn test_with_defaults() {
        let schema = sample_schema();
        let record = DataRecord::with_defaults(&schema, TypeParserRegistry::canonical_type);

        assert_eq!(record.get(0), Some(&FieldValue::Int(0)));
        assert_eq!(record.get(1), Some(&FieldValue::Text(String::new())));
    }

    #[test]
    fn test_set_field_by_name() {
        let schema = sample_schema();
        let mut record = DataRecord::with_defaults(&schema, TypeParserRegistry::canonical_type);

        assert!(record.set_field(&schema, "Name", FieldValue::Text("Hero".to_string())));
        assert_eq!(record.get(1), Some(&FieldValue::Text("Hero".to_string())));

        // 不存在的属性名
        assert!(!record.set_field(&schema, "Missing", FieldValue::Int(1)));
    }

    #[test]
    fn test_to_sql_value_list_as_json() {
        let value = FieldValue::IntList(vec![1, 2, 3]);
        match value.to_sql_value() {
            rusqlite::types::Value::Text(s) => assert_eq!(s, "[1,2,3]"),
            other => panic!("expected TEXT, got {:?}", other),
        }
    }
}
