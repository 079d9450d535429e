// ==========================================
// ESG 评估与项目地图 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写
// 加载顺序: 默认值 → JSON 文件 → 环境变量
// ==========================================

use crate::config::atlas_config::AtlasConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

// ==========================================
// 配置键（环境变量名）
// ==========================================
pub mod config_keys {
    pub const DATASET_PATH: &str = "ESG_ATLAS_DATASET";
    pub const DATASET_DELIMITER: &str = "ESG_ATLAS_DELIMITER";
    pub const FETCH_TIMEOUT_SECS: &str = "ESG_ATLAS_FETCH_TIMEOUT_SECS";
    pub const COORDINATE_POLICY: &str = "ESG_ATLAS_COORDINATE_POLICY";
    pub const SYNC_STRATEGY: &str = "ESG_ATLAS_SYNC_STRATEGY";
    pub const LOCALE: &str = "ESG_ATLAS_LOCALE";

    /// 用户配置目录下的子目录与文件名
    pub const CONFIG_DIR_NAME: &str = "esg-atlas";
    pub const CONFIG_FILE_NAME: &str = "config.json";
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AtlasConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - explicit_path: 显式指定的配置文件（必须存在）; None 时尝试用户配置目录
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut manager = match explicit_path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("未找到配置文件,使用默认配置");
                    Self::with_config(AtlasConfig::default())
                }
            },
        };

        manager.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(manager)
    }

    /// 从 JSON 文件读取配置
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let path_text = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path_text.clone(),
            message: e.to_string(),
        })?;
        let config: AtlasConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path_text.clone(),
                message: e.to_string(),
            })?;

        info!(path = %path_text, "配置文件已加载");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn with_config(config: AtlasConfig) -> Self {
        Self {
            config,
            source: None,
        }
    }

    /// 应用环境变量覆写
    ///
    /// `lookup` 按键名返回变量值,便于测试注入
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        use config_keys::*;

        if let Some(v) = lookup(DATASET_PATH) {
            self.config.dataset.path = PathBuf::from(v);
        }

        if let Some(v) = lookup(DATASET_DELIMITER) {
            let mut chars = v.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => self.config.dataset.delimiter = c,
                _ => {
                    return Err(invalid(DATASET_DELIMITER, &v, "分隔符必须是单个 ASCII 字符"));
                }
            }
        }

        if let Some(v) = lookup(FETCH_TIMEOUT_SECS) {
            let secs = v
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid(FETCH_TIMEOUT_SECS, &v, &e.to_string()))?;
            self.config.dataset.fetch_timeout_secs = if secs == 0 { None } else { Some(secs) };
        }

        if let Some(v) = lookup(COORDINATE_POLICY) {
            self.config.assessment.coordinate_policy =
                v.parse().map_err(|e: String| invalid(COORDINATE_POLICY, &v, &e))?;
        }

        if let Some(v) = lookup(SYNC_STRATEGY) {
            self.config.map.sync_strategy =
                v.parse().map_err(|e: String| invalid(SYNC_STRATEGY, &v, &e))?;
        }

        if let Some(v) = lookup(LOCALE) {
            self.config.assessment.locale = v.trim().to_string();
        }

        Ok(())
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn into_config(self) -> AtlasConfig {
        self.config
    }

    /// 配置来源文件（默认配置时为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

fn invalid(key: &str, value: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

/// 用户配置目录下的默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(config_keys::CONFIG_DIR_NAME)
            .join(config_keys::CONFIG_FILE_NAME)
    })
}
