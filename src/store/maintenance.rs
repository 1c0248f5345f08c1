// ==========================================
// 游戏数据表导入工具 - 存储目录维护
// ==========================================
// 运行开始时清空旧数据库文件（无增量更新语义）;
// 运行结束后清理日志文件, 并按需重命名为打包资源
// ==========================================

use crate::importer::error::ImportResult;
use std::path::Path;
use tracing::{debug, warn};

/// 数据库主文件扩展名
pub const DB_FILE_EXTENSION: &str = "db";

/// 引擎打包资源扩展名（ResourcesPath 位置下使用）
pub const PACKAGED_ASSET_EXTENSION: &str = "bytes";

/// 数据库主文件名
pub const DB_FILE_NAME: &str = "data_tables.db";

/// 清空存储目录中的旧数据库文件
///
/// 目录不存在时创建; 单个文件删除失败记录日志后继续
pub fn purge_storage_dir(dir: &Path) -> ImportResult<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        return Ok(());
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "目录项读取失败，已跳过");
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(file = %path.display(), error = %e, "旧文件删除失败，已跳过");
            }
        }
    }

    Ok(())
}

/// 删除 SQLite 日志文件（-wal / -shm / -journal）
pub fn remove_journal_files(dir: &Path) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "存储目录读取失败，跳过日志清理");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };

        if name.ends_with("-wal") || name.ends_with("-shm") || name.ends_with("-journal") {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(file = %path.display(), error = %e, "日志文件删除失败，已跳过");
            } else {
                debug!(file = %path.display(), "日志文件已清理");
            }
        }
    }
}

/// 将目录下的 .db 文件重命名为打包资源扩展名
///
/// 仅在 ResourcesPath 存储位置下调用;
/// 返回成功重命名的文件数
pub fn rename_to_packaged_assets(dir: &Path) -> ImportResult<usize> {
    let mut renamed = 0;

    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "目录项读取失败，已跳过");
                continue;
            }
        };

        let path = entry.path();
        let is_db = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(DB_FILE_EXTENSION))
            .unwrap_or(false);

        if !is_db {
            continue;
        }

        let new_path = path.with_extension(PACKAGED_ASSET_EXTENSION);
        match std::fs::rename(&path, &new_path) {
            Ok(()) => {
                debug!(
                    from = %path.display(),
                    to = %new_path.display(),
                    "数据库文件已重命名为打包资源"
                );
                renamed += 1;
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "文件重命名失败，已跳过");
            }
        }
    }

    Ok(renamed)
}
