// ==========================================
// 游戏数据表导入工具 - 行实例化器
// ==========================================
// 职责: 数据行 → 模式对齐的动态记录
// 空单元格保持默认值; 未解析类型降级并记录
// ==========================================

use crate::domain::record::DataRecord;
use crate::domain::schema::TableSchema;
use crate::importer::report::{ImportReport, IssueKind};
use crate::importer::schema_extractor::HEADER_ROW_COUNT;
use crate::importer::sheet_reader::SheetGrid;
use crate::importer::type_parser::TypeParserRegistry;
use tracing::warn;

/// 将数据行实例化为记录序列
///
/// # 参数
/// - grid: 工作表网格（含表头）
/// - schema: 提取出的表模式
/// - data_start_row: 数据起始行（1-based，从表头之后数起）
/// - registry: 本次运行持有的类型解析器注册表
/// - report: 结构化事件收集
///
/// # 返回
/// 按行序排列的记录，每个数据行一条；
/// 全空白行被跳过
pub fn materialize(
    grid: &SheetGrid,
    schema: &TableSchema,
    data_start_row: u32,
    registry: &mut TypeParserRegistry,
    report: &mut ImportReport,
) -> Vec<DataRecord> {
    let mut records = Vec::new();

    // 1-based 配置起始行 → 0-based 网格行索引
    let first_row = HEADER_ROW_COUNT + (data_start_row.max(1) as usize - 1);

    for row_idx in first_row..grid.row_count() {
        if grid.row_is_blank(row_idx) {
            continue;
        }

        // 数据区内的 1-based 行号，用于事件定位
        let data_row_number = row_idx - first_row + 1;

        let mut record = DataRecord::with_defaults(schema, TypeParserRegistry::canonical_type);

        for (col_idx, column) in schema.columns.iter().enumerate() {
            let cell_text = grid.cell(row_idx, col_idx).trim();

            if cell_text.is_empty() {
                // 空单元格: 字段保持类型默认值
                continue;
            }

            match registry.resolve(&column.type_keyword) {
                Some(parser) => match parser.parse(cell_text) {
                    Some(value) => {
                        record.set_field(schema, &column.property_name, value);
                    }
                    None => {
                        // 已知类型但文本非法: 回退默认值，逐格记录
                        warn!(
                            table = %schema.table_name,
                            row = data_row_number,
                            column = %column.property_name,
                            cell = %cell_text,
                            "单元格解析失败，字段保持默认值"
                        );
                        report.add_issue(
                            IssueKind::CellParseFailure,
                            Some(&schema.table_name),
                            Some(data_row_number),
                            Some(&column.property_name),
                            format!(
                                "无法按类型 {} 解析: {}",
                                column.type_keyword, cell_text
                            ),
                        );
                    }
                },
                None => {
                    // 未知类型关键字: 每个关键字每次运行仅记录一次
                    if registry.warn_unresolved(&column.type_keyword) {
                        report.add_issue(
                            IssueKind::UnresolvedType,
                            Some(&schema.table_name),
                            None,
                            Some(&column.property_name),
                            format!("类型关键字不支持: {}", column.type_keyword),
                        );
                    }
                }
            }
        }

        records.push(record);
    }

    records
}
