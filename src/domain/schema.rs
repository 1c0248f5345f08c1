// ==========================================
// 游戏数据表导入工具 - 表模式定义
// ==========================================
// 表头三行契约: 第 0 行属性名 / 第 1 行类型关键字 / 第 2 行注释
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// 列描述符 (Column Descriptor)
// ==========================================
// 提取后不可变; 属性名与类型关键字均非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// 属性名（表头第 0 行，已去除首尾空白）
    pub property_name: String,

    /// 类型关键字（表头第 1 行，已去除首尾空白）
    pub type_keyword: String,

    /// 注释（表头第 2 行，换行已归一为 \n；可为空）
    pub comment: String,
}

impl ColumnDescriptor {
    pub fn new(property_name: &str, type_keyword: &str, comment: &str) -> Self {
        Self {
            property_name: property_name.to_string(),
            type_keyword: type_keyword.to_string(),
            comment: comment.to_string(),
        }
    }
}

// ==========================================
// 表模式 (Table Schema)
// ==========================================
// 列顺序 = 工作表列顺序; 与行实例化的列索引严格一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// 表名（来自文件名，不含扩展名）
    pub table_name: String,

    /// 有序列描述符
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    pub fn new(table_name: &str, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            table_name: table_name.to_string(),
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 主键列 = 第一列的属性名
    pub fn primary_column(&self) -> Option<&str> {
        self.columns.first().map(|c| c.property_name.as_str())
    }

    /// 按属性名查找列索引
    pub fn column_index(&self, property_name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.property_name == property_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> TableSchema {
        TableSchema::new(
            "Items",
            vec![
                ColumnDescriptor::new("Id", "int", "编号"),
                ColumnDescriptor::new("Name", "string", "显示名"),
            ],
        )
    }

    #[test]
    fn test_primary_column_is_first() {
        let schema = sample_schema();
        assert_eq!(schema.primary_column(), Some("Id"));
    }

    #[test]
    fn test_column_index_lookup() {
        let schema = sample_schema();
        assert_eq!(schema.column_index("Name"), Some(1));
        assert_eq!(schema.column_index("Missing"), None);
    }

    #[test]
    fn test_empty_schema() {
        let schema = TableSchema::new("Empty", vec![]);
        assert!(schema.is_empty());
        assert_eq!(schema.primary_column(), None);
    }
}
