// Command-line entry for the data table import pipeline.
//
// Usage:
//   table-import <sheets_folder> [prefs.json]
//
// Reads preferences from prefs.json (defaults when absent), imports every
// spreadsheet under the folder, then prints a one-line summary per table.

use datatable_importer::engine::{ImportOrchestrator, TableImportPipeline};
use datatable_importer::{logging, ImportPreferences};
use std::path::PathBuf;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", datatable_importer::APP_NAME);
    tracing::info!("系统版本: {}", datatable_importer::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let folder = match args.next() {
        Some(f) => PathBuf::from(f),
        None => {
            eprintln!("用法: table-import <sheets_folder> [prefs.json]");
            std::process::exit(2);
        }
    };
    let prefs_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("import_prefs.json"));

    let prefs = ImportPreferences::load_or_default(&prefs_path)?;
    let mut orchestrator = ImportOrchestrator::new(prefs);

    let report = orchestrator.run(&folder).await?;

    for table in &report.tables {
        println!(
            "{}: columns={} materialized={} written={} skipped={} address={}",
            table.table_name,
            table.schema_columns,
            table.rows_materialized,
            table.rows_written,
            table.rows_skipped,
            table
                .local_address
                .map(|a| format!("{:#010x}", a))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    if !report.issues.is_empty() {
        println!("issues={}", report.issues.len());
    }

    Ok(())
}
