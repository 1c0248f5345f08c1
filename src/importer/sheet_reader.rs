// ==========================================
// 游戏数据表导入工具 - 表格读取器实现
// ==========================================
// 支持: Excel (.xls/.xlsx) / CSV (.csv)
// 输出: 矩形字符串网格（表头契约由上层解释）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

// ==========================================
// 表格网格 (Sheet Grid)
// ==========================================
// 行可以参差不齐; 越界单元格视为空串
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    pub rows: Vec<Vec<String>>,
}

impl SheetGrid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 所有行中的最大列数
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// 读取单元格文本; 越界返回空串
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// 某行是否全空（仅含空白）
    pub fn row_is_blank(&self, row: usize) -> bool {
        match self.rows.get(row) {
            Some(cells) => cells.iter().all(|c| c.trim().is_empty()),
            None => true,
        }
    }
}

// ==========================================
// 表格读取器接口
// ==========================================
pub trait SheetReader: Send + Sync {
    /// 读取文件中的第一张工作表为字符串网格
    fn read_grid(&self, file_path: &Path) -> ImportResult<SheetGrid>;
}

// ==========================================
// CSV 读取器实现
// ==========================================
pub struct CsvSheetReader;

impl SheetReader for CsvSheetReader {
    fn read_grid(&self, file_path: &Path) -> ImportResult<SheetGrid> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 打开 CSV 文件（表头三行也是数据的一部分，不跳过）
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|v| v.to_string()).collect());
        }

        Ok(SheetGrid::new(rows))
    }
}

// ==========================================
// Excel 读取器实现
// ==========================================
pub struct ExcelSheetReader;

impl SheetReader for ExcelSheetReader {
    fn read_grid(&self, file_path: &Path) -> ImportResult<SheetGrid> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 自动识别 '97-2003 二进制格式与 2007 OpenXML 格式
        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet（每个文件仅一张关注的工作表）
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        Ok(SheetGrid::new(rows))
    }
}

// ==========================================
// 通用表格读取器（根据扩展名自动选择）
// ==========================================
pub struct UniversalSheetReader;

impl SheetReader for UniversalSheetReader {
    fn read_grid(&self, file_path: &Path) -> ImportResult<SheetGrid> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvSheetReader.read_grid(file_path),
            "xlsx" | "xls" => ExcelSheetReader.read_grid(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

/// 扩展名是否为受支持的表格格式
pub fn is_sheet_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref(),
        Some("csv") | Some("xlsx") | Some("xls")
    )
}
