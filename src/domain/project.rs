// ==========================================
// ESG 评估与项目地图 - 项目领域模型
// ==========================================
// 职责: ProjectRecord / EsgScores / ProjectId
// 红线: ProjectRecord 创建后不可变; 综合分不可单独设置
// ==========================================

use crate::domain::types::ProjectCategory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

// ==========================================
// 项目标识
// ==========================================
// 创建时随机生成,不复用、不重算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    pub fn new_random() -> Self {
        ProjectId(Uuid::new_v4())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==========================================
// ESG 评分组
// ==========================================

/// 综合分 = 三个维度分的算术平均（不加权）
pub fn composite_score(environmental: f64, social: f64, governance: f64) -> f64 {
    (environmental + social + governance) / 3.0
}

/// 三维度评分 + 综合分
///
/// 只能通过 `from_categories` 构造,综合分在构造时计算一次
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EsgScores {
    environmental: f64,
    social: f64,
    governance: f64,
    composite: f64,
}

impl EsgScores {
    pub fn from_categories(environmental: f64, social: f64, governance: f64) -> Self {
        Self {
            environmental,
            social,
            governance,
            composite: composite_score(environmental, social, governance),
        }
    }

    pub fn environmental(&self) -> f64 {
        self.environmental
    }

    pub fn social(&self) -> f64 {
        self.social
    }

    pub fn governance(&self) -> f64 {
        self.governance
    }

    pub fn composite(&self) -> f64 {
        self.composite
    }
}

/// 展示用百分比（保留一位小数），存储值不受影响
pub fn format_percent(score: f64) -> String {
    format!("{:.1}%", score)
}

// ==========================================
// 记录来源
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordOrigin {
    /// 问卷评估提交
    Assessment,
    /// 批量导入（携带导入批次 ID）
    Import { batch_id: String },
}

// ==========================================
// 坐标
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// 坐标均为有限值
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// 坐标落在地理范围内（纬度 ±90, 经度 ±180）
    pub fn in_geographic_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

// ==========================================
// ProjectRecord - 已评分项目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    id: ProjectId,
    name: String,
    category: ProjectCategory,
    location: String,
    position: GeoPoint,
    scores: EsgScores,
    origin: RecordOrigin,
    created_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// 创建新记录（分配新的随机标识）
    pub fn new(
        name: impl Into<String>,
        category: ProjectCategory,
        location: impl Into<String>,
        position: GeoPoint,
        scores: EsgScores,
        origin: RecordOrigin,
    ) -> Self {
        Self {
            id: ProjectId::new_random(),
            name: name.into(),
            category,
            location: location.into(),
            position,
            scores,
            origin,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> ProjectCategory {
        self.category
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn position(&self) -> GeoPoint {
        self.position
    }

    pub fn latitude(&self) -> f64 {
        self.position.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.position.longitude
    }

    pub fn scores(&self) -> &EsgScores {
        &self.scores
    }

    pub fn composite_score(&self) -> f64 {
        self.scores.composite()
    }

    pub fn origin(&self) -> &RecordOrigin {
        &self.origin
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
