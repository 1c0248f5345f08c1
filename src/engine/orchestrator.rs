// ==========================================
// 游戏数据表导入工具 - 导入流程编排器
// ==========================================
// 流程: 前置检查 → 模式提取 → 代码生成 →
//       行实例化 → 分区存储写入 → 收尾维护
// 隔离: 单文件/单表失败仅记录并跳过, 其余继续;
//       文件严格逐个处理, 无跨表并行
// ==========================================

use crate::codegen::{RowScriptGenerator, ScriptTemplate};
use crate::config::ImportPreferences;
use crate::domain::record::DataRecord;
use crate::domain::schema::TableSchema;
use crate::domain::types::StorageLocation;
use crate::engine::run_state::RunState;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::report::{ImportReport, IssueKind};
use crate::importer::row_materializer::materialize;
use crate::importer::schema_extractor::extract_schema;
use crate::importer::sheet_reader::{is_sheet_file, SheetReader, UniversalSheetReader};
use crate::importer::type_parser::TypeParserRegistry;
use crate::store::maintenance::{
    purge_storage_dir, remove_journal_files, rename_to_packaged_assets, DB_FILE_NAME,
};
use crate::store::table_writer::TableStoreWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// 导入报告文件名（写在存储目录下）
pub const REPORT_FILE_NAME: &str = "import_report.json";

// ==========================================
// 导入流水线接口
// ==========================================
#[async_trait::async_trait]
pub trait TableImportPipeline {
    /// 导入文件夹下的所有数据表
    ///
    /// # 参数
    /// - folder: 表格文件所在文件夹（递归搜索）
    ///
    /// # 返回
    /// - Ok(ImportReport): 结构化导入报告
    /// - Err: 运行级前置条件失败
    async fn run(&mut self, folder: &Path) -> ImportResult<ImportReport>;
}

// ==========================================
// ImportOrchestrator - 导入流程编排器
// ==========================================
pub struct ImportOrchestrator {
    prefs: ImportPreferences,
    reader: Box<dyn SheetReader>,
    state: RunState,
}

/// 模式提取阶段的单文件产出
struct SheetEntry {
    path: PathBuf,
    schema: TableSchema,
}

impl ImportOrchestrator {
    pub fn new(prefs: ImportPreferences) -> Self {
        Self {
            prefs,
            reader: Box::new(UniversalSheetReader),
            state: RunState::Idle,
        }
    }

    /// 注入自定义读取器（测试用）
    pub fn with_reader(prefs: ImportPreferences, reader: Box<dyn SheetReader>) -> Self {
        Self {
            prefs,
            reader,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn set_state(&mut self, next: RunState) {
        debug!(from = %self.state, to = %next, "导入状态切换");
        self.state = next;
    }
}

#[async_trait::async_trait]
impl TableImportPipeline for ImportOrchestrator {
    async fn run(&mut self, folder: &Path) -> ImportResult<ImportReport> {
        info!(folder = %folder.display(), "开始数据表导入");

        // === 前置检查（失败则整次运行中止，不触碰任何输入/存储文件）===
        if let Err(e) = self.prefs.validate() {
            error!(error = %e, "偏好设置校验失败，导入中止");
            self.set_state(RunState::Aborted);
            return Err(e);
        }

        let template = match ScriptTemplate::load(&self.prefs.template_path) {
            Ok(t) => t,
            Err(e) => {
                error!(error = %e, "模板缺失，导入中止");
                self.set_state(RunState::Aborted);
                return Err(e);
            }
        };

        let mut report = ImportReport::new();

        // 收集表格文件（排序保证逐次运行的确定性顺序）
        let files = collect_sheet_files(folder)?;
        info!(count = files.len(), "表格文件收集完成");

        // === 阶段 1: 模式提取 ===
        self.set_state(RunState::SchemaExtraction);
        let mut entries: Vec<SheetEntry> = Vec::new();

        for path in &files {
            let table_name = table_name_of(path);

            let grid = match self.reader.read_grid(path) {
                Ok(grid) => grid,
                Err(e) => {
                    // 单文件读取失败: 跳过该文件，其余继续
                    warn!(file = %path.display(), error = %e, "文件读取失败，已跳过");
                    report.add_issue(
                        IssueKind::FileReadFailure,
                        Some(&table_name),
                        None,
                        None,
                        e.to_string(),
                    );
                    continue;
                }
            };

            let schema = match extract_schema(&table_name, &grid) {
                Ok(schema) => schema,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "表头不完整，已跳过");
                    report.add_issue(
                        IssueKind::MalformedSchema,
                        Some(&table_name),
                        None,
                        None,
                        e.to_string(),
                    );
                    continue;
                }
            };

            if schema.is_empty() {
                warn!(file = %path.display(), "所有列均被丢弃，已跳过");
                report.add_issue(
                    IssueKind::EmptySchema,
                    Some(&table_name),
                    None,
                    None,
                    "表头中没有名字与类型均非空的列".to_string(),
                );
                continue;
            }

            report.table_mut(&table_name).schema_columns = schema.len();
            entries.push(SheetEntry {
                path: path.clone(),
                schema,
            });
        }
        info!(tables = entries.len(), "模式提取完成");

        // === 阶段 2: 代码生成 ===
        self.set_state(RunState::CodeGeneration);
        let generator = RowScriptGenerator::new(&template, &self.prefs);
        debug!(namespace = %generator.namespace(), "命名空间已解析");

        for entry in &entries {
            match generator.generate(&entry.schema) {
                Ok(file_path) => {
                    report.table_mut(&entry.schema.table_name).script_file =
                        Some(file_path.display().to_string());
                }
                Err(e) => {
                    // 脚本生成失败: 该表无产物，数据导入仍继续
                    warn!(table = %entry.schema.table_name, error = %e, "脚本生成失败");
                    report.add_issue(
                        IssueKind::ScriptWriteFailure,
                        Some(&entry.schema.table_name),
                        None,
                        None,
                        e.to_string(),
                    );
                }
            }
        }
        info!("行类型脚本生成完成");

        // === 阶段 3: 行实例化 ===
        self.set_state(RunState::DataMaterialization);

        // 旧数据库文件先清空（无增量更新语义）
        let storage_root = self.prefs.storage_root()?;
        purge_storage_dir(&storage_root)?;

        // 类型解析器注册表由本次运行持有，跨表共享缓存
        let mut registry = TypeParserRegistry::new();
        let mut materialized: Vec<(TableSchema, Vec<DataRecord>)> = Vec::new();

        for entry in &entries {
            // 重新读取工作表（行序列仅能通过重读重放）
            let grid = match self.reader.read_grid(&entry.path) {
                Ok(grid) => grid,
                Err(e) => {
                    warn!(file = %entry.path.display(), error = %e, "文件重读失败，已跳过");
                    report.add_issue(
                        IssueKind::FileReadFailure,
                        Some(&entry.schema.table_name),
                        None,
                        None,
                        e.to_string(),
                    );
                    continue;
                }
            };

            let records = materialize(
                &grid,
                &entry.schema,
                self.prefs.data_start_row,
                &mut registry,
                &mut report,
            );
            report.table_mut(&entry.schema.table_name).rows_materialized = records.len();
            materialized.push((entry.schema.clone(), records));
        }
        info!(tables = materialized.len(), "行实例化完成");

        // === 阶段 4: 分区存储写入 ===
        self.set_state(RunState::StorageWrite);
        let db_path = storage_root.join(DB_FILE_NAME);
        let writer = TableStoreWriter::new(&db_path);

        for (schema, records) in &materialized {
            match writer.write_table(schema, self.prefs.data_start_row, records, &mut report) {
                Ok(outcome) => {
                    let table = report.table_mut(&schema.table_name);
                    table.local_address = Some(outcome.local_address);
                    table.rows_written = outcome.rows_written;
                    table.rows_skipped = outcome.rows_skipped;
                }
                Err(e) => {
                    // 单表写入中止: 其余表继续
                    warn!(table = %schema.table_name, error = %e, "表写入中止");
                    report.add_issue(
                        IssueKind::AddressInsertFailure,
                        Some(&schema.table_name),
                        None,
                        None,
                        e.to_string(),
                    );
                }
            }
        }

        // === 收尾维护 ===
        remove_journal_files(&storage_root);

        if self.prefs.storage_location == StorageLocation::ResourcesPath {
            match rename_to_packaged_assets(&storage_root) {
                Ok(renamed) => info!(renamed = renamed, "数据库文件已重命名为打包资源"),
                Err(e) => warn!(error = %e, "打包资源重命名失败"),
            }
        }

        report.finish();
        if let Err(e) = report.save(&storage_root.join(REPORT_FILE_NAME)) {
            warn!(error = %e, "导入报告写入失败");
        }

        self.set_state(RunState::Done);
        Ok(report)
    }
}

/// 表名 = 文件名去掉扩展名
fn table_name_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// 递归收集文件夹下的表格文件，按路径排序
fn collect_sheet_files(folder: &Path) -> ImportResult<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(ImportError::FileNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();
    collect_into(folder, &mut files);
    files.sort();
    Ok(files)
}

fn collect_into(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "目录读取失败，已跳过");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_into(&path, files);
        } else if is_sheet_file(&path) {
            files.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_of() {
        assert_eq!(table_name_of(Path::new("data/Items.xlsx")), "Items");
        assert_eq!(table_name_of(Path::new("Monsters.csv")), "Monsters");
    }

    #[test]
    fn test_collect_sheet_files_missing_folder() {
        let result = collect_sheet_files(Path::new("non_existent_folder"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_run_aborts_on_invalid_preferences() {
        // script_output_dir 为空 → 前置检查失败
        let mut orchestrator = ImportOrchestrator::new(ImportPreferences::default());

        let result = orchestrator.run(Path::new(".")).await;

        assert!(matches!(
            result,
            Err(ImportError::PreferencesInvalid { .. })
        ));
        assert_eq!(orchestrator.state(), RunState::Aborted);
    }

    #[tokio::test]
    async fn test_run_aborts_on_missing_template() {
        let dir = tempfile::TempDir::new().unwrap();
        let prefs = ImportPreferences {
            script_output_dir: dir.path().join("generated"),
            template_path: dir.path().join("missing.tpl"),
            project_root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let mut orchestrator = ImportOrchestrator::new(prefs);

        let result = orchestrator.run(dir.path()).await;

        assert!(matches!(result, Err(ImportError::TemplateMissing(_))));
        assert_eq!(orchestrator.state(), RunState::Aborted);
    }
}
