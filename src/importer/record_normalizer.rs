// ==========================================
// ESG 评估与项目地图 - 记录规整/过滤
// ==========================================
// 职责: RawProjectRow → ProjectRecord + DQ 违规
// 拒收: 仅坐标无法解析（Error, 整行丢弃）
// 警告: 名称为空 / 分数非数字或越界 / 坐标越界 / Total Score 与均值不一致
// ==========================================

use crate::domain::import::{columns, CellValue, DqLevel, DqViolation, RawProjectRow};
use crate::domain::project::{EsgScores, ProjectRecord, RecordOrigin};
use crate::engine::category_inference::infer_category;
use crate::engine::coordinates::coordinates_from_cells;

/// 单行规整结果
#[derive(Debug, Clone)]
pub struct NormalizedRow {
    pub record: Option<ProjectRecord>,
    pub violations: Vec<DqViolation>,
}

pub struct RecordNormalizer {
    total_score_tolerance: f64, // Total Score 允许偏差
}

impl RecordNormalizer {
    pub fn new(total_score_tolerance: f64) -> Self {
        Self {
            total_score_tolerance,
        }
    }

    /// 规整单行
    ///
    /// # 参数
    /// - row: 字段映射后的行
    /// - batch_id: 导入批次 ID（写入记录来源）
    pub fn normalize(&self, row: &RawProjectRow, batch_id: &str) -> NormalizedRow {
        let name = row.project_name.to_text();
        let name_ref = if name.is_empty() { None } else { Some(name.clone()) };
        let mut violations = Vec::new();

        let violation = |level: DqLevel, field: &str, message: String| DqViolation {
            row_number: row.row_number,
            project_name: name_ref.clone(),
            level,
            field: field.to_string(),
            message,
        };

        // 坐标（唯一拒收条件）
        let position = match coordinates_from_cells(&row.latitude, &row.longitude) {
            Ok(position) => position,
            Err(e) => {
                violations.push(violation(DqLevel::Error, "coordinates", e.to_string()));
                return NormalizedRow {
                    record: None,
                    violations,
                };
            }
        };

        if !position.in_geographic_range() {
            violations.push(violation(
                DqLevel::Warning,
                "coordinates",
                format!(
                    "坐标超出地理范围: ({}, {})",
                    position.latitude, position.longitude
                ),
            ));
        }

        if name.is_empty() {
            violations.push(violation(
                DqLevel::Warning,
                columns::PROJECT_NAME,
                "项目名称为空".to_string(),
            ));
        }

        // 三维度分数
        let mut score = |cell: &CellValue, field: &str| -> f64 {
            match cell.as_number() {
                Some(value) => {
                    if !(0.0..=100.0).contains(&value) {
                        violations.push(violation(
                            DqLevel::Warning,
                            field,
                            format!("分数超出 [0, 100]: {}", value),
                        ));
                    }
                    value
                }
                None => {
                    violations.push(violation(
                        DqLevel::Warning,
                        field,
                        format!("分数非数字,按 NaN 保留: {:?}", cell.to_text()),
                    ));
                    f64::NAN
                }
            }
        };

        let environmental = score(&row.environmental, columns::ENVIRONMENTAL);
        let social = score(&row.social, columns::SOCIAL);
        let governance = score(&row.governance, columns::GOVERNANCE);
        let scores = EsgScores::from_categories(environmental, social, governance);

        // Total Score 只做一致性核对
        if let Some(total) = row.total_score.as_number() {
            let derived = scores.composite();
            if derived.is_finite() && (total - derived).abs() > self.total_score_tolerance {
                violations.push(violation(
                    DqLevel::Warning,
                    columns::TOTAL_SCORE,
                    format!("Total Score {} 与三维度均值 {:.2} 不一致", total, derived),
                ));
            }
        }

        let record = ProjectRecord::new(
            name.clone(),
            infer_category(&name),
            row.project_location.to_text(),
            position,
            scores,
            RecordOrigin::Import {
                batch_id: batch_id.to_string(),
            },
        );

        NormalizedRow {
            record: Some(record),
            violations,
        }
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new(0.5)
    }
}
