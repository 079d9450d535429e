// ==========================================
// ESG 评估与项目地图 - 评估草稿模型
// ==========================================
// 职责: 问卷进行中的临时数据（AssessmentDraft / AnswerSet）
// 生命周期: 新评估开始时创建 → 逐项修改 → 提交时转换为 ProjectRecord → 丢弃
// ==========================================

use crate::domain::types::{EsgCategory, ProjectCategory};
use serde::Serialize;
use std::collections::BTreeMap;

/// 每个 ESG 维度的固定题目数
pub const QUESTIONS_PER_CATEGORY: usize = 5;

// ==========================================
// AnswerSet - 单维度答案
// ==========================================
// 题号 → 是/否; 未作答的题目不在 map 中
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerSet {
    answers: BTreeMap<usize, bool>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录答案; 题号越界返回 false 且不记录
    pub fn set(&mut self, index: usize, value: bool) -> bool {
        if index >= QUESTIONS_PER_CATEGORY {
            return false;
        }
        self.answers.insert(index, value);
        true
    }

    /// 读取答案（未作答视为否）
    pub fn get(&self, index: usize) -> bool {
        self.answers.get(&index).copied().unwrap_or(false)
    }

    /// 已作答题数
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// 回答"是"的题数
    pub fn true_count(&self) -> usize {
        self.answers.values().filter(|v| **v).count()
    }

    /// 题目总数（固定常量,与已作答数量无关）
    pub fn total_questions(&self) -> usize {
        QUESTIONS_PER_CATEGORY
    }

    pub fn as_map(&self) -> &BTreeMap<usize, bool> {
        &self.answers
    }
}

impl FromIterator<(usize, bool)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (usize, bool)>>(iter: T) -> Self {
        let mut set = AnswerSet::new();
        for (index, value) in iter {
            set.set(index, value);
        }
        set
    }
}

// ==========================================
// AssessmentDraft - 评估草稿
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssessmentDraft {
    pub project_name: String,
    pub category: Option<ProjectCategory>,
    pub location: String,
    /// 原始输入文本（可能无法解析）
    pub latitude_text: String,
    pub longitude_text: String,
    pub environmental: AnswerSet,
    pub social: AnswerSet,
    pub governance: AnswerSet,
}

impl AssessmentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answers(&self, category: EsgCategory) -> &AnswerSet {
        match category {
            EsgCategory::Environmental => &self.environmental,
            EsgCategory::Social => &self.social,
            EsgCategory::Governance => &self.governance,
        }
    }

    pub fn answers_mut(&mut self, category: EsgCategory) -> &mut AnswerSet {
        match category {
            EsgCategory::Environmental => &mut self.environmental,
            EsgCategory::Social => &mut self.social,
            EsgCategory::Governance => &mut self.governance,
        }
    }
}
