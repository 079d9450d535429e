// ==========================================
// ESG 评估与项目地图 - 评分引擎
// ==========================================
// 职责: 单维度评分 + 综合评分
// 规则: 维度分 = 是的题数 / 固定题数 × 100
//       综合分 = 三维度分算术平均（不加权）
// 红线: 分母是固定题数常量,不是已作答数量
// ==========================================

use crate::domain::assessment::{AnswerSet, AssessmentDraft};
use crate::domain::project::EsgScores;

pub use crate::domain::project::composite_score;

/// 通用维度评分
///
/// `total_questions` 为 0 时返回 0,不做除零
pub fn score_answers<'a, I>(answers: I, total_questions: usize) -> f64
where
    I: IntoIterator<Item = &'a bool>,
{
    if total_questions == 0 {
        return 0.0;
    }
    let true_count = answers.into_iter().filter(|v| **v).count();
    (true_count as f64 / total_questions as f64) * 100.0
}

/// 单维度评分（使用固定题数）
pub fn category_score(answers: &AnswerSet) -> f64 {
    score_answers(answers.as_map().values(), answers.total_questions())
}

/// 根据草稿计算三维度分与综合分
pub fn score_draft(draft: &AssessmentDraft) -> EsgScores {
    EsgScores::from_categories(
        category_score(&draft.environmental),
        category_score(&draft.social),
        category_score(&draft.governance),
    )
}
