// ==========================================
// ESG 评估与项目地图 - 配置层
// ==========================================
// 职责: 系统配置管理,支持文件 + 环境变量覆写
// 存储: 无持久化,进程内只读
// ==========================================

pub mod atlas_config;
pub mod config_manager;

// 重导出核心配置类型
pub use atlas_config::{
    AssessmentConfig, AtlasConfig, CoordinatePolicy, DatasetConfig, IngestConfig, MapConfig,
    MapViewport, SyncStrategy,
};
pub use config_manager::{config_keys, default_config_path, ConfigError, ConfigManager};
