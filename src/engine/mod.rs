// ==========================================
// ESG 评估与项目地图 - 引擎层
// ==========================================
// 职责: 评分、类型推断、坐标校验、评估流程、地图标记同步
// 红线: 引擎不持有记录集合,记录只存在于登记表
// ==========================================

pub mod assessment_flow;
pub mod category_inference;
pub mod coordinates;
pub mod events;
pub mod map_sync;
pub mod scoring;

// 重导出核心引擎
pub use assessment_flow::{AssessmentError, AssessmentFlow, FlowOutcome, Handoff};
pub use category_inference::{infer_category, match_keyword, FALLBACK_CATEGORY};
pub use coordinates::{coordinates_from_cells, parse_coordinate, parse_coordinates, CoordinateError};
pub use events::{RegistryEvent, RegistryEventType, RegistrySubscriber};
pub use map_sync::{
    InMemoryMapSurface, MapSurface, MapSyncController, Marker, MarkerHandle, MarkerIcon,
    MarkerSpec, PopupContent, SyncStats,
};
pub use scoring::{category_score, composite_score, score_answers, score_draft};
