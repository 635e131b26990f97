// ==========================================
// 纸机日成本核算系统 - 配置管理器
// ==========================================
// 职责: 配置加载、快照、快照恢复
// 存储: JSON 文件（缺省时使用内置默认值）
// ==========================================
// 路径解析顺序:
// 1. 显式指定路径
// 2. 环境变量 TISSUE_COSTING_CONFIG
// 3. <系统配置目录>/tissue-costing/config.json（存在时）
// 4. 内置默认值
// ==========================================

use crate::config::costing_config::CostingConfig;
use crate::importer::error::{ImportError, ImportResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ==========================================
// 配置来源
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    BuiltinDefaults,
    File(PathBuf),
    Snapshot,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: Arc<CostingConfig>,
    source: ConfigSource,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// 使用内置默认配置
    pub fn new() -> Self {
        Self {
            config: Arc::new(CostingConfig::default()),
            source: ConfigSource::BuiltinDefaults,
        }
    }

    /// 使用给定配置（测试或调用方自行组装时使用）
    pub fn with_config(config: CostingConfig) -> ImportResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            source: ConfigSource::BuiltinDefaults,
        })
    }

    /// 从 JSON 文件加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径
    ///
    /// # 返回
    /// - Ok(ConfigManager): 加载并校验通过
    /// - Err: 文件不存在 / JSON 格式错误 / 取值非法
    pub fn from_file(path: &Path) -> ImportResult<Self> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: CostingConfig =
            serde_json::from_str(&raw).map_err(|e| ImportError::ConfigReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;

        tracing::info!(path = %path.display(), "已加载成本核算配置");

        Ok(Self {
            config: Arc::new(config),
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    /// 按解析顺序加载配置
    ///
    /// 显式路径或环境变量指向的文件必须存在;
    /// 系统配置目录下的默认文件不存在时回退到内置默认值
    pub fn load(explicit: Option<&Path>) -> ImportResult<Self> {
        let env_value = std::env::var(config_keys::CONFIG_PATH_ENV).ok();
        match resolve_config_path(explicit, env_value.as_deref(), default_config_path()) {
            Some(ResolvedPath::Required(path)) => Self::from_file(&path),
            Some(ResolvedPath::Optional(path)) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("未找到配置文件，使用内置默认配置");
                Ok(Self::new())
            }
        }
    }

    /// 获取只读配置（注入汇总引擎）
    pub fn config(&self) -> Arc<CostingConfig> {
        Arc::clone(&self.config)
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// 获取配置快照（JSON格式）
    ///
    /// # 用途
    /// - 随核算结果一起归档,保证结果可复算
    pub fn get_config_snapshot(&self) -> ImportResult<String> {
        Ok(serde_json::to_string_pretty(self.config.as_ref())?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 参数
    /// - snapshot_json: 配置快照的JSON字符串
    pub fn restore_config_from_snapshot(&mut self, snapshot_json: &str) -> ImportResult<()> {
        let config: CostingConfig =
            serde_json::from_str(snapshot_json).map_err(|e| ImportError::ConfigValueError {
                key: "snapshot".to_string(),
                value: snapshot_json.chars().take(64).collect(),
                message: e.to_string(),
            })?;
        config.validate()?;

        self.config = Arc::new(config);
        self.source = ConfigSource::Snapshot;
        tracing::info!("已从快照恢复成本核算配置");
        Ok(())
    }
}

// ==========================================
// 路径解析
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    Required(PathBuf), // 显式/环境变量指定,必须存在
    Optional(PathBuf), // 系统默认位置,可缺省
}

/// 系统默认配置路径: <config_dir>/tissue-costing/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(config_keys::APP_DIR).join(config_keys::CONFIG_FILE))
}

/// 按优先级解析配置文件路径
pub fn resolve_config_path(
    explicit: Option<&Path>,
    env_value: Option<&str>,
    default_path: Option<PathBuf>,
) -> Option<ResolvedPath> {
    if let Some(path) = explicit {
        return Some(ResolvedPath::Required(path.to_path_buf()));
    }
    if let Some(v) = env_value.map(str::trim).filter(|v| !v.is_empty()) {
        return Some(ResolvedPath::Required(PathBuf::from(v)));
    }
    default_path.map(ResolvedPath::Optional)
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 配置文件路径环境变量
    pub const CONFIG_PATH_ENV: &str = "TISSUE_COSTING_CONFIG";

    // 系统配置目录下的应用目录与文件名
    pub const APP_DIR: &str = "tissue-costing";
    pub const CONFIG_FILE: &str = "config.json";
}
