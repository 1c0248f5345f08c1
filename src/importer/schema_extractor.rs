// ==========================================
// 游戏数据表导入工具 - 模式提取器
// ==========================================
// 表头契约: 第 0 行属性名 / 第 1 行类型关键字 / 第 2 行注释
// 属性名或类型关键字为空的列被丢弃
// ==========================================

use crate::domain::schema::{ColumnDescriptor, TableSchema};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::sheet_reader::SheetGrid;

/// 表头保留行数
pub const HEADER_ROW_COUNT: usize = 3;

/// 从工作表网格提取表模式
///
/// # 参数
/// - table_name: 表名（来自文件名）
/// - grid: 工作表网格
///
/// # 返回
/// - Ok(TableSchema): 按列序排列的模式
/// - Err(MalformedSchema): 表头不足 3 行；调用方应跳过该文件
pub fn extract_schema(table_name: &str, grid: &SheetGrid) -> ImportResult<TableSchema> {
    if grid.row_count() < HEADER_ROW_COUNT {
        return Err(ImportError::MalformedSchema {
            table: table_name.to_string(),
            rows: grid.row_count(),
        });
    }

    let column_count = grid.column_count();
    let mut columns = Vec::new();

    for i in 0..column_count {
        let property_name = grid.cell(0, i).trim();
        let type_keyword = grid.cell(1, i).trim();
        let comment = grid.cell(2, i).trim();

        if !property_name.is_empty() && !type_keyword.is_empty() {
            columns.push(ColumnDescriptor::new(
                property_name,
                type_keyword,
                &normalize_newlines(comment),
            ));
        }
    }

    Ok(TableSchema::new(table_name, columns))
}

/// 归一注释中的换行（\r\n / \r → \n）
fn normalize_newlines(comment: &str) -> String {
    comment.replace("\r\n", "\n").replace('\r', "\n")
}
