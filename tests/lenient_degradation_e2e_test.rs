// ==========================================
// 宽松降级行为端到端测试
// ==========================================
// 测试目标: 未解析类型 / 主键重复 / 存储位置重命名
// 降级必须可观测（结构化报告），且不中止其余导入
// ==========================================


use datatable_importer::engine::{ImportOrchestrator, TableImportPipeline};
use datatable_importer::store::{
    segment_table_name, AddressMapRepository, DB_FILE_NAME, PACKAGED_ASSET_EXTENSION,
};
use datatable_importer::{logging, IssueKind, StorageLocation};
use test_helpers::{storage_dir, test_prefs, write_csv};

#[tokio::test]
async fn test_unresolved_type_defaults_fields_and_warns_once() {
    logging::init_test();

    let dir = tempfile::TempDir::new().unwrap();
    write_csv(
        dir.path(),
        "Skills",
        &[
            "Id,Name,Element",
            "int,string,unknown_type",
            ",,",
            "1,Fireball,fire",
            "2,IceSpike,ice",
            "3,Heal,light",
        ],
    );

    let mut orchestrator = ImportOrchestrator::new(test_prefs(dir.path()));
    let report = orchestrator
        .run(&dir.path().join("sheets"))
        .await
        .expect("Import should still complete");

    // 未解析列产生模式条目，导入仍完成
    assert_eq!(report.tables.len(), 1);
    assert_eq!(report.tables[0].schema_columns, 3);
    assert_eq!(report.tables[0].rows_written, 3);

    // 每个关键字一条事件，而非每行一条
    let unresolved: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::UnresolvedType)
        .collect();
    assert_eq!(unresolved.len(), 1);
    assert!(unresolved[0].message.contains("unknown_type"));

    // 对应字段全部保持默认值
    let db_path = storage_dir(dir.path()).join(DB_FILE_NAME);
    let entries = AddressMapRepository::new(&db_path)
        .unwrap()
        .read_all()
        .unwrap();
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let distinct_elements: i64 = conn
        .query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE \"Element\" = ''",
                segment_table_name(entries[0].local_address)
            ),
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(distinct_elements, 3);
}

#[tokio::test]
async fn test_duplicate_primary_key_skips_record_not_table() {
    logging::init_test();

    let dir = tempfile::TempDir::new().unwrap();
    write_csv(
        dir.path(),
        "Items",
        &[
            "Id,Name",
            "int,string",
            ",",
            "1,Sword",
            "1,DuplicateSword",
            "2,Shield",
        ],
    );

    let mut orchestrator = ImportOrchestrator::new(test_prefs(dir.path()));
    let report = orchestrator
        .run(&dir.path().join("sheets"))
        .await
        .expect("Import should succeed");

    assert_eq!(report.tables[0].rows_materialized, 3);
    assert_eq!(report.tables[0].rows_written, 2);
    assert_eq!(report.tables[0].rows_skipped, 1);

    let failures: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::RecordInsertFailure)
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].row, Some(2));
}

#[tokio::test]
async fn test_resources_location_renames_db_to_packaged_asset() {
    logging::init_test();

    let dir = tempfile::TempDir::new().unwrap();
    write_csv(
        dir.path(),
        "Items",
        &["Id,Name", "int,string", ",", "1,Sword"],
    );

    let prefs = datatable_importer::ImportPreferences {
        storage_location: StorageLocation::ResourcesPath,
        ..test_prefs(dir.path())
    };
    let mut orchestrator = ImportOrchestrator::new(prefs);
    orchestrator
        .run(&dir.path().join("sheets"))
        .await
        .expect("Import should succeed");

    let resources_storage = dir
        .path()
        .join("assets")
        .join("resources")
        .join("DataTables");

    // .db 已重命名为打包资源扩展名
    assert!(!resources_storage.join(DB_FILE_NAME).exists());
    let renamed = resources_storage.join(format!("data_tables.{}", PACKAGED_ASSET_EXTENSION));
    assert!(renamed.exists());
}
