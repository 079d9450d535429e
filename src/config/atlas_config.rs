// ==========================================
// ESG 评估与项目地图 - 配置结构
// ==========================================
// 职责: 定义配置项及其默认值
// 格式: JSON（缺省字段取默认值）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ==========================================
// 评估路径坐标策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinatePolicy {
    /// 坐标无法解析时拒绝提交（与导入路径一致）
    #[default]
    Reject,
    /// 旧行为: 无法解析的坐标以 NaN 写入记录
    AcceptNan,
}

impl CoordinatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinatePolicy::Reject => "reject",
            CoordinatePolicy::AcceptNan => "accept_nan",
        }
    }
}

impl fmt::Display for CoordinatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CoordinatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(CoordinatePolicy::Reject),
            "accept_nan" => Ok(CoordinatePolicy::AcceptNan),
            other => Err(format!("未知的坐标策略: {}（可选: reject/accept_nan）", other)),
        }
    }
}

// ==========================================
// 地图标记同步策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStrategy {
    /// 每次变更全部拆除后重建
    #[default]
    FullRebuild,
    /// 按记录标识做增量对比
    Diff,
}

impl SyncStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStrategy::FullRebuild => "full_rebuild",
            SyncStrategy::Diff => "diff",
        }
    }
}

impl fmt::Display for SyncStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SyncStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full_rebuild" => Ok(SyncStrategy::FullRebuild),
            "diff" => Ok(SyncStrategy::Diff),
            other => Err(format!("未知的同步策略: {}（可选: full_rebuild/diff）", other)),
        }
    }
}

// ==========================================
// 分节配置
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// 数据文件路径
    pub path: PathBuf,
    /// 分隔符（单个 ASCII 字符）
    pub delimiter: char,
    /// 读取超时（秒）; None 表示不设超时
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("geocode_esg.csv"),
            delimiter: ',',
            fetch_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    pub coordinate_policy: CoordinatePolicy,
    /// 问卷文本语言
    pub locale: String,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            coordinate_policy: CoordinatePolicy::default(),
            locale: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapViewport {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: f64,
}

impl Default for MapViewport {
    fn default() -> Self {
        // 美国本土中心
        Self {
            center_latitude: 39.8283,
            center_longitude: -98.5795,
            zoom: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub sync_strategy: SyncStrategy,
    pub viewport: MapViewport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Total Score 与三维度均值的允许偏差（超出记 DQ 警告）
    pub total_score_tolerance: f64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            total_score_tolerance: 0.5,
        }
    }
}

// ==========================================
// AtlasConfig - 全量配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub dataset: DatasetConfig,
    pub assessment: AssessmentConfig,
    pub map: MapConfig,
    pub ingest: IngestConfig,
}
