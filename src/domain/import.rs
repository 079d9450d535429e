// ==========================================
// ESG 评估与项目地图 - 导入领域模型
// ==========================================
// 职责: 解析后的原始行、单元格值、DQ 违规与导入报告
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// 数据文件列名（表头必须包含以下全部列）
// ==========================================
pub mod columns {
    pub const PROJECT_NAME: &str = "Project Name";
    pub const PROJECT_LOCATION: &str = "Project Location";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const TOTAL_SCORE: &str = "Total Score";
    pub const ENVIRONMENTAL: &str = "Environmental Indicators";
    pub const SOCIAL: &str = "Social Indicators";
    pub const GOVERNANCE: &str = "Governance Indicators";

    pub const EXPECTED: [&str; 8] = [
        PROJECT_NAME,
        PROJECT_LOCATION,
        LATITUDE,
        LONGITUDE,
        TOTAL_SCORE,
        ENVIRONMENTAL,
        SOCIAL,
        GOVERNANCE,
    ];
}

// ==========================================
// CellValue - 弱类型单元格
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// 单元格文本 → 弱类型值
    ///
    /// 仅普通十进制写法视为数字（可带符号、小数、指数）; 空白为 Empty; 其余保留文本
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match parse_plain_decimal(trimmed) {
            Some(n) => CellValue::Number(n),
            None => CellValue::Text(trimmed.to_string()),
        }
    }

    /// 文本列（名称、地点）: 不做数值识别,仅去除首尾空白
    pub fn text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// 文本表示（数字按原值格式化,空值为空串）
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// 解析普通十进制数字
///
/// 接受: `12`, `-3.5`, `.5`, `7.`, `+1e3`
/// 拒绝: `NaN`, `inf`, `0x1F`, `1,000`, `12abc`
pub fn parse_plain_decimal(text: &str) -> Option<f64> {
    let s = text.trim();
    let unsigned = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    // 首字符必须是数字或小数点（排除 NaN / inf / infinity）
    match unsigned.as_bytes().first() {
        Some(b) if b.is_ascii_digit() || *b == b'.' => s.parse::<f64>().ok(),
        _ => None,
    }
}

// ==========================================
// RawProjectRow - 解析后的一行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawProjectRow {
    pub row_number: usize, // 源文件行号（表头为第 1 行）
    pub project_name: CellValue,
    pub project_location: CellValue,
    pub latitude: CellValue,
    pub longitude: CellValue,
    pub total_score: CellValue,
    pub environmental: CellValue,
    pub social: CellValue,
    pub governance: CellValue,
}

// ==========================================
// DQ 违规
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Error,   // 错误（该行被丢弃）
    Warning, // 警告（保留该行,仅记录）
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,
    pub project_name: Option<String>,
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// IngestReport - 单次导入报告
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub batch_id: String,
    pub started_at: DateTime<Utc>,
    pub total_rows: usize,
    pub accepted: usize,
    pub dropped: usize,
    pub violations: Vec<DqViolation>,
    pub elapsed_time: std::time::Duration,
}

impl IngestReport {
    pub fn warnings(&self) -> impl Iterator<Item = &DqViolation> {
        self.violations.iter().filter(|v| v.level == DqLevel::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &DqViolation> {
        self.violations.iter().filter(|v| v.level == DqLevel::Error)
    }
}
