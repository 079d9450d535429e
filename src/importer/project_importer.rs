// ==========================================
// ESG 评估与项目地图 - 项目数据导入器实现
// ==========================================
// 职责: 整合导入流程,从数据源到登记表
// 流程: 读取 → 解析 → 映射 → 规整/过滤 → 整体替换登记表
// 红线: 任一致命错误时登记表保持不变
// ==========================================

use crate::config::AtlasConfig;
use crate::domain::import::{DqLevel, IngestReport};
use crate::domain::project::ProjectRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::CsvParser;
use crate::importer::importer_trait::{DatasetSource, FieldMapper, FileParser, ProjectImporter};
use crate::importer::record_normalizer::RecordNormalizer;
use crate::repository::ProjectRegistry;
use async_trait::async_trait;
use chrono::Utc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ProjectImporterImpl - 项目数据导入器实现
// ==========================================
pub struct ProjectImporterImpl {
    // 导入组件
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    normalizer: RecordNormalizer,

    // 读取超时（None = 不限时）
    fetch_timeout: Option<Duration>,
}

impl ProjectImporterImpl {
    /// 创建新的 ProjectImporter 实例
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器
    /// - normalizer: 记录规整器
    pub fn new(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        normalizer: RecordNormalizer,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
            normalizer,
            fetch_timeout: None,
        }
    }

    /// 按配置组装默认组件
    pub fn from_config(config: &AtlasConfig) -> ImportResult<Self> {
        let parser = CsvParser::new(config.dataset.delimiter)?;
        let importer = Self::new(
            Box::new(parser),
            Box::new(FieldMapperImpl),
            RecordNormalizer::new(config.ingest.total_score_tolerance),
        )
        .with_fetch_timeout(config.dataset.fetch_timeout_secs.map(Duration::from_secs));
        Ok(importer)
    }

    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// 读取数据源（可选超时）
    async fn fetch(&self, source: &dyn DatasetSource) -> ImportResult<String> {
        match self.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, source.fetch())
                .await
                .map_err(|_| ImportError::FetchTimeout {
                    source_name: source.describe(),
                    timeout_secs: limit.as_secs(),
                })?,
            None => source.fetch().await,
        }
    }

    fn ingest_with_batch(
        &self,
        text: &str,
        batch_id: &str,
    ) -> ImportResult<(IngestReport, Vec<ProjectRecord>)> {
        let start_time = Instant::now();
        let started_at = Utc::now();

        // === 步骤 1: 解析 ===
        debug!("步骤 1: 解析文本");
        let raw_rows = self.file_parser.parse_text(text).map_err(|e| {
            error!(error = %e, "数据解析失败");
            e
        })?;
        let total_rows = raw_rows.len();
        info!(total_rows = total_rows, "数据解析完成");

        // === 步骤 2: 字段映射 ===
        debug!("步骤 2: 字段映射");
        let mapped: Vec<_> = raw_rows
            .iter()
            .map(|row| self.field_mapper.map_row(&row.fields, row.line))
            .collect();

        // === 步骤 3: 规整/过滤 ===
        debug!("步骤 3: 规整与过滤");
        let mut records = Vec::with_capacity(mapped.len());
        let mut violations = Vec::new();
        for row in &mapped {
            let normalized = self.normalizer.normalize(row, batch_id);
            for v in &normalized.violations {
                if v.level == DqLevel::Error {
                    warn!(row_number = v.row_number, field = %v.field, reason = %v.message, "行被丢弃");
                }
            }
            violations.extend(normalized.violations);
            if let Some(record) = normalized.record {
                records.push(record);
            }
        }

        let report = IngestReport {
            batch_id: batch_id.to_string(),
            started_at,
            total_rows,
            accepted: records.len(),
            dropped: total_rows - records.len(),
            violations,
            elapsed_time: start_time.elapsed(),
        };
        info!(
            accepted = report.accepted,
            dropped = report.dropped,
            warnings = report.warnings().count(),
            "规整完成"
        );

        Ok((report, records))
    }
}

impl Default for ProjectImporterImpl {
    fn default() -> Self {
        Self::new(
            Box::new(CsvParser::default()),
            Box::new(FieldMapperImpl),
            RecordNormalizer::default(),
        )
    }
}

#[async_trait]
impl ProjectImporter for ProjectImporterImpl {
    #[instrument(skip(self, text), fields(bytes = text.len()))]
    fn ingest_text(&self, text: &str) -> ImportResult<(IngestReport, Vec<ProjectRecord>)> {
        let batch_id = Uuid::new_v4().to_string();
        self.ingest_with_batch(text, &batch_id)
    }

    #[instrument(skip(self, source, registry), fields(source = %source.describe(), batch_id = tracing::field::Empty))]
    async fn load(
        &self,
        source: &dyn DatasetSource,
        registry: &ProjectRegistry,
    ) -> ImportResult<IngestReport> {
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(batch_id = %batch_id, "开始导入项目数据");

        let text = self.fetch(source).await.map_err(|e| {
            error!(error = %e, "数据读取失败");
            e
        })?;

        let (report, records) = self.ingest_with_batch(&text, &batch_id)?;

        // === 步骤 4: 整体替换登记表 ===
        let event = registry.replace_all(records);
        info!(
            revision = event.revision,
            records = event.record_count,
            elapsed_ms = report.elapsed_time.as_millis() as u64,
            "导入完成"
        );

        Ok(report)
    }
}
