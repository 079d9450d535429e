// ==========================================
// ESG 评估与项目地图 - 领域类型定义
// ==========================================
// 职责: 项目类型、ESG 维度、评估步骤、评分档位
// 红线: 项目类型是封闭集合,不接受任意字符串
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ==========================================
// 项目类型 (Project Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Solar,      // 光伏
    Wind,       // 风电
    Hydro,      // 水电
    Biomass,    // 生物质
    Geothermal, // 地热
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 5] = [
        ProjectCategory::Solar,
        ProjectCategory::Wind,
        ProjectCategory::Hydro,
        ProjectCategory::Biomass,
        ProjectCategory::Geothermal,
    ];

    /// 转换为字符串标识（小写，与数据文件/前端一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Solar => "solar",
            ProjectCategory::Wind => "wind",
            ProjectCategory::Hydro => "hydro",
            ProjectCategory::Biomass => "biomass",
            ProjectCategory::Geothermal => "geothermal",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 项目类型解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("未知的项目类型: {0}（可选: solar/wind/hydro/biomass/geothermal）")]
pub struct ParseCategoryError(pub String);

impl FromStr for ProjectCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_lowercase();
        ProjectCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == folded)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

// ==========================================
// ESG 维度 (ESG Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EsgCategory {
    Environmental,
    Social,
    Governance,
}

impl EsgCategory {
    pub const ALL: [EsgCategory; 3] = [
        EsgCategory::Environmental,
        EsgCategory::Social,
        EsgCategory::Governance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EsgCategory::Environmental => "environmental",
            EsgCategory::Social => "social",
            EsgCategory::Governance => "governance",
        }
    }
}

impl fmt::Display for EsgCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 评估步骤 (Assessment Step)
// ==========================================
// 线性五步: 基本信息 → 环境 → 社会 → 治理 → 汇总
// 不分支、不跳步
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentStep {
    BasicInfo,
    Environmental,
    Social,
    Governance,
    Summary,
}

impl AssessmentStep {
    /// 步骤总数
    pub const TOTAL: u8 = 5;

    /// 步骤序号（1 起）
    pub fn number(&self) -> u8 {
        match self {
            AssessmentStep::BasicInfo => 1,
            AssessmentStep::Environmental => 2,
            AssessmentStep::Social => 3,
            AssessmentStep::Governance => 4,
            AssessmentStep::Summary => 5,
        }
    }

    /// 下一步（汇总步骤无下一步）
    pub fn next(&self) -> Option<AssessmentStep> {
        match self {
            AssessmentStep::BasicInfo => Some(AssessmentStep::Environmental),
            AssessmentStep::Environmental => Some(AssessmentStep::Social),
            AssessmentStep::Social => Some(AssessmentStep::Governance),
            AssessmentStep::Governance => Some(AssessmentStep::Summary),
            AssessmentStep::Summary => None,
        }
    }

    /// 上一步（基本信息步骤无上一步）
    pub fn previous(&self) -> Option<AssessmentStep> {
        match self {
            AssessmentStep::BasicInfo => None,
            AssessmentStep::Environmental => Some(AssessmentStep::BasicInfo),
            AssessmentStep::Social => Some(AssessmentStep::Environmental),
            AssessmentStep::Governance => Some(AssessmentStep::Social),
            AssessmentStep::Summary => Some(AssessmentStep::Governance),
        }
    }

    /// 该步骤对应的问卷维度
    pub fn questionnaire(&self) -> Option<EsgCategory> {
        match self {
            AssessmentStep::Environmental => Some(EsgCategory::Environmental),
            AssessmentStep::Social => Some(EsgCategory::Social),
            AssessmentStep::Governance => Some(EsgCategory::Governance),
            AssessmentStep::BasicInfo | AssessmentStep::Summary => None,
        }
    }

    /// 国际化 key
    pub fn i18n_key(&self) -> &'static str {
        match self {
            AssessmentStep::BasicInfo => "assessment.step.basic_info",
            AssessmentStep::Environmental => "assessment.step.environmental",
            AssessmentStep::Social => "assessment.step.social",
            AssessmentStep::Governance => "assessment.step.governance",
            AssessmentStep::Summary => "assessment.step.summary",
        }
    }
}

impl fmt::Display for AssessmentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentStep::BasicInfo => write!(f, "BASIC_INFO"),
            AssessmentStep::Environmental => write!(f, "ENVIRONMENTAL"),
            AssessmentStep::Social => write!(f, "SOCIAL"),
            AssessmentStep::Governance => write!(f, "GOVERNANCE"),
            AssessmentStep::Summary => write!(f, "SUMMARY"),
        }
    }
}

// ==========================================
// 评分档位 (Score Tier)
// ==========================================
// 阈值: ≥80 / ≥60 / ≥40 / ≥20 / 其余
// NaN 与任何阈值比较均为 false,落入最低档
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreTier {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreTier::Excellent
        } else if score >= 60.0 {
            ScoreTier::Good
        } else if score >= 40.0 {
            ScoreTier::Fair
        } else if score >= 20.0 {
            ScoreTier::Poor
        } else {
            ScoreTier::Critical
        }
    }

    /// 评分条样式类名
    pub fn color_class(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "bg-emerald-500",
            ScoreTier::Good => "bg-green-500",
            ScoreTier::Fair => "bg-yellow-500",
            ScoreTier::Poor => "bg-orange-500",
            ScoreTier::Critical => "bg-red-500",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreTier::Excellent => write!(f, "EXCELLENT"),
            ScoreTier::Good => write!(f, "GOOD"),
            ScoreTier::Fair => write!(f, "FAIR"),
            ScoreTier::Poor => write!(f, "POOR"),
            ScoreTier::Critical => write!(f, "CRITICAL"),
        }
    }
}
