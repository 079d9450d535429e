// ==========================================
// ESG 评估与项目地图 - 导入管道 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 读取 → 解析 → 字段映射 → 规整/过滤 → 整体替换登记表
// ==========================================

use crate::domain::import::{IngestReport, RawProjectRow};
use crate::domain::project::ProjectRecord;
use crate::importer::error::ImportResult;
use crate::repository::ProjectRegistry;
use async_trait::async_trait;
use std::collections::HashMap;

// ==========================================
// DatasetSource Trait
// ==========================================
// 用途: 外部数据读取（唯一的异步边界）
// 实现者: FileDatasetSource, StaticDatasetSource
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// 读取完整文本
    async fn fetch(&self) -> ImportResult<String>;

    /// 数据源描述（日志/错误信息用）
    fn describe(&self) -> String;
}

/// 解析后的一行（带源文件行号）
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    /// 该行在源文本中的起始行号（1 起,表头为第 1 行）
    pub line: usize,
    pub fields: HashMap<String, String>,
}

impl SourceRow {
    pub fn get(&self, column: &str) -> Option<&String> {
        self.fields.get(column)
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文本解析（阶段 1）
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文本为原始行记录（列名 → 值,附源行号）
    ///
    /// # 返回
    /// - Ok: 数据行（已跳过空白行）
    /// - Err: 表头不匹配、结构无法解析
    fn parse_text(&self, text: &str) -> ImportResult<Vec<SourceRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射 + 数值识别（阶段 2）
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行映射为弱类型行
    ///
    /// # 参数
    /// - row: 原始行记录
    /// - row_number: 源文件行号
    fn map_row(&self, row: &HashMap<String, String>, row_number: usize) -> RawProjectRow;
}

// ==========================================
// ProjectImporter Trait
// ==========================================
// 用途: 导入主接口
// 实现者: ProjectImporterImpl
#[async_trait]
pub trait ProjectImporter: Send + Sync {
    /// 解析并规整文本（不修改登记表）
    fn ingest_text(&self, text: &str) -> ImportResult<(IngestReport, Vec<ProjectRecord>)>;

    /// 从数据源读取并整体替换登记表
    ///
    /// 失败时登记表保持不变
    async fn load(
        &self,
        source: &dyn DatasetSource,
        registry: &ProjectRegistry,
    ) -> ImportResult<IngestReport>;
}
