// ==========================================
// ESG 评估与项目地图 - 字段映射器实现
// ==========================================
// 职责: 源列 → 弱类型行 + 数值识别
// 说明: 数值识别仅接受普通十进制写法,其余原样保留为文本
//       名称、地点为文本列,不做数值识别（保留 "02134" 这类写法）
// ==========================================

use crate::domain::import::{columns, CellValue, RawProjectRow};
use crate::importer::importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_row(&self, row: &HashMap<String, String>, row_number: usize) -> RawProjectRow {
        RawProjectRow {
            row_number,
            project_name: self.text_cell(row, columns::PROJECT_NAME),
            project_location: self.text_cell(row, columns::PROJECT_LOCATION),
            latitude: self.cell(row, columns::LATITUDE),
            longitude: self.cell(row, columns::LONGITUDE),
            total_score: self.cell(row, columns::TOTAL_SCORE),
            environmental: self.cell(row, columns::ENVIRONMENTAL),
            social: self.cell(row, columns::SOCIAL),
            governance: self.cell(row, columns::GOVERNANCE),
        }
    }
}

impl FieldMapper {
    // 缺列（行比表头短）按空值处理
    fn cell(&self, row: &HashMap<String, String>, key: &str) -> CellValue {
        row.get(key)
            .map(|v| CellValue::coerce(v))
            .unwrap_or(CellValue::Empty)
    }

    fn text_cell(&self, row: &HashMap<String, String>, key: &str) -> CellValue {
        row.get(key)
            .map(|v| CellValue::text(v))
            .unwrap_or(CellValue::Empty)
    }
}
