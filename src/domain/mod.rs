// ==========================================
// ESG 评估与项目地图 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod assessment;
pub mod import;
pub mod project;
pub mod types;

// 重导出核心类型
pub use assessment::{AnswerSet, AssessmentDraft, QUESTIONS_PER_CATEGORY};
pub use import::{
    columns, parse_plain_decimal, CellValue, DqLevel, DqViolation, IngestReport, RawProjectRow,
};
pub use project::{
    composite_score, format_percent, EsgScores, GeoPoint, ProjectId, ProjectRecord, RecordOrigin,
};
pub use types::{AssessmentStep, EsgCategory, ParseCategoryError, ProjectCategory, ScoreTier};
