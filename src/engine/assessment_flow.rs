// ==========================================
// ESG 评估与项目地图 - 评估流程控制器
// ==========================================
// 职责: 五步线性状态机,收集答案并在汇总步骤提交
// 流程: 基本信息 → 环境 → 社会 → 治理 → 汇总
// 提交: 评分 → 构造 ProjectRecord → 追加到登记表 → 交给项目地图视图
// ==========================================

use crate::config::CoordinatePolicy;
use crate::domain::assessment::{AssessmentDraft, QUESTIONS_PER_CATEGORY};
use crate::domain::project::{EsgScores, GeoPoint, ProjectRecord, RecordOrigin};
use crate::domain::types::{AssessmentStep, EsgCategory, ProjectCategory};
use crate::engine::category_inference::infer_category;
use crate::engine::coordinates::{
    parse_coordinate, parse_coordinates, CoordinateError, LATITUDE_FIELD, LONGITUDE_FIELD,
};
use crate::engine::events::RegistryEvent;
use crate::engine::scoring::score_draft;
use crate::repository::ProjectRegistry;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssessmentError {
    #[error("题号越界 ({category}): {index}（每个维度共 {total} 题）")]
    QuestionOutOfRange {
        category: EsgCategory,
        index: usize,
        total: usize,
    },

    #[error("评估已提交,请开始新的评估")]
    AlreadySubmitted,

    #[error("坐标无效: {0}")]
    InvalidCoordinates(#[from] CoordinateError),
}

/// 提交后的去向（路由由外部处理）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    ProjectMap,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// 步骤前进
    Moved {
        from: AssessmentStep,
        to: AssessmentStep,
    },
    /// 已提交
    Finalized {
        record: ProjectRecord,
        event: RegistryEvent,
        handoff: Handoff,
    },
}

// ==========================================
// AssessmentFlow
// ==========================================
#[derive(Debug, Clone)]
pub struct AssessmentFlow {
    step: AssessmentStep,
    // 提交后置为 None
    draft: Option<AssessmentDraft>,
    coordinate_policy: CoordinatePolicy,
}

impl AssessmentFlow {
    /// 开始新的评估（空草稿,位于基本信息步骤）
    pub fn new(coordinate_policy: CoordinatePolicy) -> Self {
        Self {
            step: AssessmentStep::BasicInfo,
            draft: Some(AssessmentDraft::new()),
            coordinate_policy,
        }
    }

    pub fn step(&self) -> AssessmentStep {
        self.step
    }

    /// (当前步骤序号, 总步骤数)
    pub fn progress(&self) -> (u8, u8) {
        (self.step.number(), AssessmentStep::TOTAL)
    }

    pub fn is_submitted(&self) -> bool {
        self.draft.is_none()
    }

    pub fn coordinate_policy(&self) -> CoordinatePolicy {
        self.coordinate_policy
    }

    pub fn draft(&self) -> Option<&AssessmentDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Result<&mut AssessmentDraft, AssessmentError> {
        self.draft.as_mut().ok_or(AssessmentError::AlreadySubmitted)
    }

    // ===== 基本信息 =====

    pub fn set_project_name(&mut self, name: impl Into<String>) -> Result<(), AssessmentError> {
        self.draft_mut()?.project_name = name.into();
        Ok(())
    }

    pub fn set_category(&mut self, category: ProjectCategory) -> Result<(), AssessmentError> {
        self.draft_mut()?.category = Some(category);
        Ok(())
    }

    pub fn set_location(&mut self, location: impl Into<String>) -> Result<(), AssessmentError> {
        self.draft_mut()?.location = location.into();
        Ok(())
    }

    /// 记录原始坐标文本（不在此处校验）
    pub fn set_coordinates_text(
        &mut self,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> Result<(), AssessmentError> {
        let draft = self.draft_mut()?;
        draft.latitude_text = latitude.into();
        draft.longitude_text = longitude.into();
        Ok(())
    }

    // ===== 问卷 =====

    pub fn set_answer(
        &mut self,
        category: EsgCategory,
        index: usize,
        value: bool,
    ) -> Result<(), AssessmentError> {
        let answers = self.draft_mut()?.answers_mut(category);
        if !answers.set(index, value) {
            return Err(AssessmentError::QuestionOutOfRange {
                category,
                index,
                total: QUESTIONS_PER_CATEGORY,
            });
        }
        Ok(())
    }

    /// 汇总步骤展示用评分（不提交）
    pub fn preview_scores(&self) -> Option<EsgScores> {
        self.draft.as_ref().map(score_draft)
    }

    // ===== 步骤切换 =====

    /// 后退一步; 位于基本信息步骤时不变
    pub fn previous(&mut self) -> Result<AssessmentStep, AssessmentError> {
        if self.is_submitted() {
            return Err(AssessmentError::AlreadySubmitted);
        }
        if let Some(prev) = self.step.previous() {
            debug!(from = %self.step, to = %prev, "评估后退");
            self.step = prev;
        }
        Ok(self.step)
    }

    /// 前进一步; 位于汇总步骤时提交
    ///
    /// 提交失败（坐标无效）时停留在汇总步骤,登记表不变
    pub fn next(&mut self, registry: &ProjectRegistry) -> Result<FlowOutcome, AssessmentError> {
        let draft = self.draft.as_ref().ok_or(AssessmentError::AlreadySubmitted)?;

        if let Some(to) = self.step.next() {
            let from = self.step;
            debug!(from = %from, to = %to, "评估前进");
            self.step = to;
            return Ok(FlowOutcome::Moved { from, to });
        }

        let record = self.build_record(draft)?;
        let event = registry.append(record.clone());
        self.draft = None;

        info!(
            project_id = %record.id(),
            name = %record.name(),
            composite = record.composite_score(),
            "评估已提交"
        );

        Ok(FlowOutcome::Finalized {
            record,
            event,
            handoff: Handoff::ProjectMap,
        })
    }

    fn build_record(&self, draft: &AssessmentDraft) -> Result<ProjectRecord, AssessmentError> {
        let position = self.resolve_position(draft)?;

        let category = match draft.category {
            Some(category) => category,
            None => {
                let inferred = infer_category(&draft.project_name);
                info!(name = %draft.project_name, category = %inferred, "未选择项目类型,按名称推断");
                inferred
            }
        };

        Ok(ProjectRecord::new(
            draft.project_name.clone(),
            category,
            draft.location.clone(),
            position,
            score_draft(draft),
            RecordOrigin::Assessment,
        ))
    }

    fn resolve_position(&self, draft: &AssessmentDraft) -> Result<GeoPoint, AssessmentError> {
        match self.coordinate_policy {
            CoordinatePolicy::Reject => {
                Ok(parse_coordinates(&draft.latitude_text, &draft.longitude_text)?)
            }
            CoordinatePolicy::AcceptNan => {
                let lat = lenient(LATITUDE_FIELD, &draft.latitude_text);
                let lon = lenient(LONGITUDE_FIELD, &draft.longitude_text);
                Ok(GeoPoint::new(lat, lon))
            }
        }
    }
}

fn lenient(field: &'static str, text: &str) -> f64 {
    parse_coordinate(field, text).unwrap_or_else(|e| {
        warn!(error = %e, "坐标无法解析,按 accept_nan 策略写入 NaN");
        f64::NAN
    })
}
