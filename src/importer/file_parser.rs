// ==========================================
// ESG 评估与项目地图 - 文件解析器实现
// ==========================================
// 支持: 带表头的分隔文本（CSV）
// 容错: 引号内分隔符 / 引号内换行 / 尾部空白行 / 行长度不一致
// 红线: 表头缺列即整次导入失败,不做部分导入
// ==========================================

use crate::domain::import::columns;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{FileParser, SourceRow};
use csv::ReaderBuilder;
use std::collections::HashMap;
use tracing::debug;

// ==========================================
// CSV Parser 实现
// ==========================================
#[derive(Debug, Clone)]
pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    /// 创建解析器
    ///
    /// 分隔符必须是单个 ASCII 字符
    pub fn new(delimiter: char) -> ImportResult<Self> {
        if !delimiter.is_ascii() {
            return Err(ImportError::InvalidDelimiter(delimiter));
        }
        Ok(Self {
            delimiter: delimiter as u8,
        })
    }

    /// 校验表头,返回缺失列
    fn missing_columns(headers: &[String]) -> Vec<String> {
        columns::EXPECTED
            .iter()
            .filter(|expected| !headers.iter().any(|h| h == *expected))
            .map(|s| s.to_string())
            .collect()
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl FileParser for CsvParser {
    fn parse_text(&self, text: &str) -> ImportResult<Vec<SourceRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .delimiter(self.delimiter)
            .from_reader(text.as_bytes());

        // 读取表头（去 BOM + TRIM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let missing = Self::missing_columns(&headers);
        if !missing.is_empty() {
            return Err(ImportError::HeaderMismatch { missing });
        }

        // 读取所有行
        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // 源行号（跨行引号字段取起始行）
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(SourceRow {
                line,
                fields: row_map,
            });
        }

        debug!(rows = records.len(), columns = headers.len(), "CSV 解析完成");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Project Name,Project Location,latitude,longitude,Total Score,Environmental Indicators,Social Indicators,Governance Indicators";

    #[test]
    fn test_parse_basic() {
        let text = format!("{HEADER}\nSun Farm,\"Austin, TX\",30.2,-97.7,50,40,60,50\n");
        let rows = CsvParser::default().parse_text(&text).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Project Location"), Some(&"Austin, TX".to_string()));
        assert_eq!(rows[0].get("latitude"), Some(&"30.2".to_string()));
    }

    #[test]
    fn test_parse_embedded_newline() {
        let text = format!("{HEADER}\n\"Twin\nPeaks Wind\",Somewhere,1,2,3,4,5,6\n");
        let rows = CsvParser::default().parse_text(&text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Project Name"), Some(&"Twin\nPeaks Wind".to_string()));
    }

    #[test]
    fn test_skip_trailing_blank_rows() {
        let text = format!("{HEADER}\nA,B,1,2,3,4,5,6\n\n,,,,,,,\n");
        let rows = CsvParser::default().parse_text(&text).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_rows_keep_source_line_numbers() {
        let text = format!("{HEADER}\nA,B,1,2,3,4,5,6\n,,,,,,,\n\"C\nD\",E,1,2,3,4,5,6\nF,G,1,2,3,4,5,6\n");
        let rows = CsvParser::default().parse_text(&text).unwrap();
        let lines: Vec<usize> = rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 4, 6]);
    }

    #[test]
    fn test_header_mismatch_is_fatal() {
        let text = "Name,Location,lat,lon\nA,B,1,2\n";
        let err = CsvParser::default().parse_text(text).unwrap_err();
        match err {
            ImportError::HeaderMismatch { missing } => {
                assert!(missing.contains(&"Project Name".to_string()));
                assert!(missing.contains(&"latitude".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input_is_header_mismatch() {
        let err = CsvParser::default().parse_text("").unwrap_err();
        assert!(matches!(err, ImportError::HeaderMismatch { .. }));
    }

    #[test]
    fn test_header_with_bom_and_spaces() {
        let text = format!("\u{feff}{}\nA,B,1,2,3,4,5,6\n", HEADER.replace(',', " , "));
        let rows = CsvParser::default().parse_text(&text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Project Name"), Some(&"A".to_string()));
    }

    #[test]
    fn test_custom_delimiter() {
        let text = format!("{}\nA;B;1;2;3;4;5;6\n", HEADER.replace(',', ";"));
        let rows = CsvParser::new(';').unwrap().parse_text(&text).unwrap();
        assert_eq!(rows[0].get("longitude"), Some(&"2".to_string()));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        assert!(matches!(CsvParser::new('；'), Err(ImportError::InvalidDelimiter('；'))));
    }
}
