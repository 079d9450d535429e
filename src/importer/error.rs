// ==========================================
// ESG 评估与项目地图 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 这里只有"整次导入失败"的错误; 行级问题记为 DQ 违规,不走错误通道
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("数据读取超时: {source_name}（{timeout_secs} 秒）")]
    FetchTimeout {
        source_name: String,
        timeout_secs: u64,
    },

    // ===== 解析错误 =====
    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("表头不匹配,缺少列: {}", missing.join(", "))]
    HeaderMismatch { missing: Vec<String> },

    #[error("分隔符无效: {0:?}（必须是单个 ASCII 字符）")]
    InvalidDelimiter(char),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_mismatch_message_lists_columns() {
        let err = ImportError::HeaderMismatch {
            missing: vec!["latitude".to_string(), "longitude".to_string()],
        };
        assert_eq!(err.to_string(), "表头不匹配,缺少列: latitude, longitude");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(ImportError::from(io), ImportError::FileReadError(_)));
    }
}
