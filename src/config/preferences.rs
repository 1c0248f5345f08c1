// ==========================================
// 游戏数据表导入工具 - 导入偏好设置
// ==========================================
// 职责: 脚本输出/模板/命名空间/数据起始行/存储位置
// 存储: JSON 文件; 运行前置校验失败阻断整次导入
// ==========================================

use crate::domain::types::StorageLocation;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 数据表存储文件夹名（三个根位置下共用）
pub const DATA_TABLES_FOLDER_NAME: &str = "DataTables";

/// 命名空间为空时的兜底值
pub const DEFAULT_NAMESPACE: &str = "game_data";

// ==========================================
// ImportPreferences - 导入偏好设置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportPreferences {
    /// 行类型脚本的输出目录
    pub script_output_dir: PathBuf,

    /// 行类型脚本模板路径
    pub template_path: PathBuf,

    /// 是否从脚本输出目录自动推导命名空间
    pub auto_generate_namespace: bool,

    /// 显式命名空间（auto_generate_namespace = false 时使用）
    pub namespace: String,

    /// 数据起始行（1-based，从表头三行之后数起）
    pub data_start_row: u32,

    /// 数据库文件的存储位置
    pub storage_location: StorageLocation,

    /// 项目根目录（Resources/StreamingAssets 位置的根）
    pub project_root: PathBuf,
}

impl Default for ImportPreferences {
    fn default() -> Self {
        Self {
            script_output_dir: PathBuf::new(),
            template_path: PathBuf::from("templates/row_script.tpl"),
            auto_generate_namespace: true,
            namespace: DEFAULT_NAMESPACE.to_string(),
            data_start_row: 1,
            storage_location: StorageLocation::PersistentDataPath,
            project_root: PathBuf::new(),
        }
    }
}

impl ImportPreferences {
    /// 从 JSON 文件加载偏好设置；文件不存在时返回默认值
    ///
    /// 默认值中 script_output_dir 为空，会在 validate 阶段
    /// 被拦截并提示配置，与“先配置后导入”的流程一致
    pub fn load_or_default(path: &Path) -> ImportResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let prefs: ImportPreferences =
            serde_json::from_str(&text).map_err(|e| ImportError::PreferencesInvalid {
                field: "(file)".to_string(),
                message: format!("JSON 解析失败: {}", e),
            })?;

        Ok(prefs)
    }

    /// 保存偏好设置为 JSON 文件
    pub fn save(&self, path: &Path) -> ImportResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImportError::InternalError(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// 运行前置校验
    ///
    /// 任一失败都会阻断整次导入（不触碰任何文件）
    pub fn validate(&self) -> ImportResult<()> {
        if self.script_output_dir.as_os_str().is_empty() {
            return Err(ImportError::PreferencesInvalid {
                field: "script_output_dir".to_string(),
                message: "请先设置行类型脚本的输出目录".to_string(),
            });
        }

        if self.data_start_row < 1 {
            return Err(ImportError::PreferencesInvalid {
                field: "data_start_row".to_string(),
                message: "数据起始行必须 >= 1".to_string(),
            });
        }

        if !self.auto_generate_namespace && self.namespace.trim().is_empty() {
            return Err(ImportError::PreferencesInvalid {
                field: "namespace".to_string(),
                message: "关闭自动命名空间时必须显式指定命名空间".to_string(),
            });
        }

        if self.storage_location != StorageLocation::PersistentDataPath
            && self.project_root.as_os_str().is_empty()
        {
            return Err(ImportError::PreferencesInvalid {
                field: "project_root".to_string(),
                message: format!("存储位置 {} 需要配置项目根目录", self.storage_location),
            });
        }

        Ok(())
    }

    /// 解析当前存储位置对应的数据表根目录
    pub fn storage_root(&self) -> ImportResult<PathBuf> {
        let root = match self.storage_location {
            StorageLocation::PersistentDataPath => dirs::data_dir()
                .ok_or_else(|| ImportError::InternalError("无法定位平台数据目录".to_string()))?
                .join("datatable-importer"),
            StorageLocation::ResourcesPath => {
                self.project_root.join("assets").join("resources")
            }
            StorageLocation::StreamingAssetsPath => {
                self.project_root.join("assets").join("streaming_assets")
            }
        };

        Ok(root.join(DATA_TABLES_FOLDER_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn valid_prefs(dir: &Path) -> ImportPreferences {
        ImportPreferences {
            script_output_dir: dir.join("generated"),
            template_path: dir.join("row_script.tpl"),
            project_root: dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_rejects_empty_script_output_dir() {
        let prefs = ImportPreferences::default();
        let result = prefs.validate();

        assert!(matches!(
            result,
            Err(ImportError::PreferencesInvalid { ref field, .. }) if field == "script_output_dir"
        ));
    }

    #[test]
    fn test_validate_rejects_empty_explicit_namespace() {
        let dir = TempDir::new().unwrap();
        let prefs = ImportPreferences {
            auto_generate_namespace: false,
            namespace: "  ".to_string(),
            ..valid_prefs(dir.path())
        };

        assert!(matches!(
            prefs.validate(),
            Err(ImportError::PreferencesInvalid { ref field, .. }) if field == "namespace"
        ));
    }

    #[test]
    fn test_validate_requires_project_root_for_resources() {
        let dir = TempDir::new().unwrap();
        let prefs = ImportPreferences {
            storage_location: StorageLocation::ResourcesPath,
            project_root: PathBuf::new(),
            ..valid_prefs(dir.path())
        };

        assert!(matches!(
            prefs.validate(),
            Err(ImportError::PreferencesInvalid { ref field, .. }) if field == "project_root"
        ));
    }

    #[test]
    fn test_storage_root_resources_path() {
        let dir = TempDir::new().unwrap();
        let prefs = ImportPreferences {
            storage_location: StorageLocation::ResourcesPath,
            ..valid_prefs(dir.path())
        };

        let root = prefs.storage_root().unwrap();
        assert_eq!(
            root,
            dir.path()
                .join("assets")
                .join("resources")
                .join(DATA_TABLES_FOLDER_NAME)
        );
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let prefs =
            ImportPreferences::load_or_default(Path::new("non_existent_prefs.json")).unwrap();
        assert_eq!(prefs, ImportPreferences::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");

        let prefs = ImportPreferences {
            data_start_row: 2,
            storage_location: StorageLocation::StreamingAssetsPath,
            ..valid_prefs(dir.path())
        };
        prefs.save(&path).unwrap();

        let loaded = ImportPreferences::load_or_default(&path).unwrap();
        assert_eq!(loaded, prefs);
    }
}
