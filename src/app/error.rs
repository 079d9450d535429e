// ==========================================
// ESG 评估与项目地图 - 应用层错误类型
// ==========================================
// 职责: 汇总各层错误,供会话与命令行统一处理
// ==========================================

use crate::config::ConfigError;
use crate::engine::AssessmentError;
use crate::importer::ImportError;
use thiserror::Error;

/// 应用层错误类型
#[derive(Error, Debug)]
pub enum AppError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("评估失败: {0}")]
    Assessment(#[from] AssessmentError),
}

pub type AppResult<T> = Result<T, AppError>;
