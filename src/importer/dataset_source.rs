// ==========================================
// ESG 评估与项目地图 - 数据源实现
// ==========================================
// 职责: 读取外部数据集文本（异步 I/O 边界）
// 实现: FileDatasetSource（本地 CSV 文件） / StaticDatasetSource（内存文本）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::DatasetSource;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

// ==========================================
// FileDatasetSource - 本地文件
// ==========================================
#[derive(Debug, Clone)]
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 检查文件存在与扩展名
    fn check_path(&self) -> ImportResult<()> {
        if !self.path.exists() {
            return Err(ImportError::FileNotFound(self.path.display().to_string()));
        }

        let is_csv = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if !is_csv {
            return Err(ImportError::UnsupportedFormat(
                self.path.display().to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DatasetSource for FileDatasetSource {
    async fn fetch(&self) -> ImportResult<String> {
        self.check_path()?;

        let bytes = tokio::fs::read(&self.path).await?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "数据文件读取完成");

        String::from_utf8(bytes).map_err(|e| {
            ImportError::FileReadError(format!("{}: 非 UTF-8 编码 ({})", self.path.display(), e))
        })
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

// ==========================================
// StaticDatasetSource - 内存文本
// ==========================================
#[derive(Debug, Clone)]
pub struct StaticDatasetSource {
    name: String,
    text: String,
}

impl StaticDatasetSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for StaticDatasetSource {
    async fn fetch(&self) -> ImportResult<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        format!("static:{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_file_source_reads_text() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "a,b\n1,2\n").unwrap();

        let source = FileDatasetSource::new(file.path());
        assert_eq!(source.fetch().await.unwrap(), "a,b\n1,2\n");
        assert!(source.describe().starts_with("file:"));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileDatasetSource::new("/nonexistent/geocode_esg.csv");
        assert!(matches!(source.fetch().await, Err(ImportError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_file_source_rejects_other_extensions() {
        let file = NamedTempFile::new().unwrap();
        let source = FileDatasetSource::new(file.path());
        assert!(matches!(
            source.fetch().await,
            Err(ImportError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_file_source_rejects_invalid_utf8() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let source = FileDatasetSource::new(file.path());
        assert!(matches!(source.fetch().await, Err(ImportError::FileReadError(_))));
    }
}
