// ==========================================
// ESG 评估与项目地图 - 导入层
// ==========================================
// 职责: 外部数据集导入,生成项目记录
// 支持: CSV（分隔符可配置）
// ==========================================

// 模块声明
pub mod dataset_source;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod project_importer;
pub mod record_normalizer;

// 重导出核心类型
pub use dataset_source::{FileDatasetSource, StaticDatasetSource};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::CsvParser;
pub use project_importer::ProjectImporterImpl;
pub use record_normalizer::{NormalizedRow, RecordNormalizer};

// 重导出 Trait 接口
pub use importer_trait::{DatasetSource, FieldMapper, FileParser, ProjectImporter};
