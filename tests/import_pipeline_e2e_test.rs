// ==========================================
// 导入流水线端到端测试
// ==========================================
// 测试目标: 文件夹 → 脚本生成 + 分区存储的完整链路
// ==========================================


use datatable_importer::engine::{ImportOrchestrator, TableImportPipeline, REPORT_FILE_NAME};
use datatable_importer::store::{
    compute_local_address, segment_table_name, AddressMapRepository, DB_FILE_NAME,
};
use datatable_importer::{logging, IssueKind, RunState};
use test_helpers::{storage_dir, test_prefs, write_csv};

fn write_sample_tables(root: &std::path::Path) {
    write_csv(
        root,
        "Items",
        &[
            "Id,Name,Price,Tags",
            "int,string,float,list<int>",
            "编号,名称,价格,标签",
            "1,Sword,12.5,\"1,2\"",
            "2,Shield,30,",
            "3,Potion,,5",
        ],
    );
    write_csv(
        root,
        "Monsters",
        &[
            "Id,Name,Hp",
            "int,string,int",
            ",,",
            "1,Slime,10",
            "2,Goblin,25",
        ],
    );
}

#[tokio::test]
async fn test_full_pipeline_generates_scripts_and_storage() {
    logging::init_test();

    let dir = tempfile::TempDir::new().unwrap();
    write_sample_tables(dir.path());

    let prefs = test_prefs(dir.path());
    let mut orchestrator = ImportOrchestrator::new(prefs);

    let report = orchestrator
        .run(&dir.path().join("sheets"))
        .await
        .expect("Import should succeed");

    assert_eq!(orchestrator.state(), RunState::Done);
    assert_eq!(report.tables.len(), 2);

    // 脚本生成: 每张表一个文件，字段按列序出现
    let items_script = dir
        .path()
        .join("src")
        .join("game_data")
        .join("Items.rs");
    let script_text = std::fs::read_to_string(&items_script).expect("Items.rs should exist");
    assert!(script_text.contains("pub struct Items"));
    assert!(script_text.contains("/// 编号"));
    assert!(script_text.contains("pub id: i32,"));
    assert!(script_text.contains("pub price: f32,"));
    assert!(script_text.contains("pub tags: Vec<i32>,"));
    // 自动命名空间: src 标记之后的路径段
    assert!(script_text.contains("namespace: game_data"));

    // 存储: 地址映射每表一条，地址互不相同
    let db_path = storage_dir(dir.path()).join(DB_FILE_NAME);
    assert!(db_path.exists());

    let address_map = AddressMapRepository::new(&db_path).unwrap();
    let entries = address_map.read_all().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].table_name, "Items");
    assert_eq!(entries[0].row_offset, 1);
    assert_eq!(entries[0].primary_key, "Id");
    assert_eq!(entries[1].table_name, "Monsters");
    assert_ne!(entries[0].local_address, entries[1].local_address);

    // 地址是 (表名, 行偏移) 的确定性函数
    assert_eq!(entries[0].local_address, compute_local_address("Items", 1));

    // 记录数: Items 3 条 / Monsters 2 条
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let items_count: i64 = conn
        .query_row(
            &format!(
                "SELECT COUNT(*) FROM {}",
                segment_table_name(entries[0].local_address)
            ),
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(items_count, 3);

    let monsters_count: i64 = conn
        .query_row(
            &format!(
                "SELECT COUNT(*) FROM {}",
                segment_table_name(entries[1].local_address)
            ),
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(monsters_count, 2);

    // 空单元格保持默认值: Potion 的 Price 为 0
    let potion_price: f64 = conn
        .query_row(
            &format!(
                "SELECT \"Price\" FROM {} WHERE \"Id\" = 3",
                segment_table_name(entries[0].local_address)
            ),
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(potion_price, 0.0);

    // 列表以 JSON 文本落库
    let sword_tags: String = conn
        .query_row(
            &format!(
                "SELECT \"Tags\" FROM {} WHERE \"Id\" = 1",
                segment_table_name(entries[0].local_address)
            ),
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(sword_tags, "[1,2]");

    // 报告落盘
    assert!(storage_dir(dir.path()).join(REPORT_FILE_NAME).exists());
    assert!(report.issues.is_empty());
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    logging::init_test();

    let dir = tempfile::TempDir::new().unwrap();
    write_sample_tables(dir.path());
    let sheets = dir.path().join("sheets");

    let mut first = ImportOrchestrator::new(test_prefs(dir.path()));
    first.run(&sheets).await.expect("First run should succeed");

    let items_script = dir.path().join("src").join("game_data").join("Items.rs");
    let first_script = std::fs::read(&items_script).unwrap();

    let db_path = storage_dir(dir.path()).join(DB_FILE_NAME);
    let first_entries = AddressMapRepository::new(&db_path)
        .unwrap()
        .read_all()
        .unwrap();

    // 第二次运行: 旧存储清空后重建
    let mut second = ImportOrchestrator::new(test_prefs(dir.path()));
    let report = second.run(&sheets).await.expect("Second run should succeed");

    // 生成脚本逐字节一致
    let second_script = std::fs::read(&items_script).unwrap();
    assert_eq!(first_script, second_script);

    // 地址与记录数一致
    let second_entries = AddressMapRepository::new(&db_path)
        .unwrap()
        .read_all()
        .unwrap();
    assert_eq!(first_entries.len(), second_entries.len());
    for (a, b) in first_entries.iter().zip(&second_entries) {
        assert_eq!(a.table_name, b.table_name);
        assert_eq!(a.local_address, b.local_address);
    }

    let written: Vec<usize> = report.tables.iter().map(|t| t.rows_written).collect();
    assert_eq!(written, vec![3, 2]);
}

#[tokio::test]
async fn test_purge_removes_stale_storage_files() {
    logging::init_test();

    let dir = tempfile::TempDir::new().unwrap();
    write_sample_tables(dir.path());

    // 预置一个过期文件
    let storage = storage_dir(dir.path());
    std::fs::create_dir_all(&storage).unwrap();
    let stale = storage.join("stale.db");
    std::fs::write(&stale, b"stale").unwrap();

    let mut orchestrator = ImportOrchestrator::new(test_prefs(dir.path()));
    orchestrator
        .run(&dir.path().join("sheets"))
        .await
        .expect("Import should succeed");

    assert!(!stale.exists());
    assert!(storage.join(DB_FILE_NAME).exists());
}

#[tokio::test]
async fn test_malformed_sheet_skipped_others_continue() {
    logging::init_test();

    let dir = tempfile::TempDir::new().unwrap();
    write_sample_tables(dir.path());
    // 表头只有 2 行
    write_csv(dir.path(), "Broken", &["Id", "int"]);

    let mut orchestrator = ImportOrchestrator::new(test_prefs(dir.path()));
    let report = orchestrator
        .run(&dir.path().join("sheets"))
        .await
        .expect("Import should succeed");

    // Broken 被跳过并记录，其余两张表正常导入
    assert_eq!(report.tables.len(), 2);
    let malformed: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::MalformedSchema)
        .collect();
    assert_eq!(malformed.len(), 1);
    assert_eq!(malformed[0].table_name.as_deref(), Some("Broken"));

    let db_path = storage_dir(dir.path()).join(DB_FILE_NAME);
    let entries = AddressMapRepository::new(&db_path)
        .unwrap()
        .read_all()
        .unwrap();
    assert_eq!(entries.len(), 2);
}
