// ==========================================
// ESG 评估与项目地图 - 应用状态
// ==========================================
// 职责: 会话级共享状态（配置、登记表、地图同步、加载标志）
// 红线: 加载标志只在数据集读取成功或失败后清除
// ==========================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::app::error::AppResult;
use crate::config::AtlasConfig;
use crate::domain::import::IngestReport;
use crate::engine::{AssessmentFlow, InMemoryMapSurface, MapSyncController, RegistrySubscriber};
use crate::importer::{DatasetSource, FileDatasetSource, ProjectImporter, ProjectImporterImpl};
use crate::repository::ProjectRegistry;

/// 应用状态
///
/// 地图同步控制器在创建时订阅登记表,此后每次登记表变更都会触发标记同步
pub struct AppState {
    /// 生效配置
    pub config: AtlasConfig,

    /// 项目登记表
    pub registry: Arc<ProjectRegistry>,

    /// 地图标记同步
    pub map_sync: Arc<MapSyncController<InMemoryMapSurface>>,

    importer: ProjectImporterImpl,
    loading: AtomicBool,
}

impl AppState {
    pub fn new(config: AtlasConfig) -> AppResult<Self> {
        let importer = ProjectImporterImpl::from_config(&config)?;
        let registry = Arc::new(ProjectRegistry::new());
        let map_sync = Arc::new(MapSyncController::new(
            InMemoryMapSurface::new(config.map.viewport),
            config.map.sync_strategy,
        ));
        registry.subscribe(map_sync.clone() as Arc<dyn RegistrySubscriber>);

        info!(
            strategy = %config.map.sync_strategy,
            coordinate_policy = %config.assessment.coordinate_policy,
            "应用状态初始化完成"
        );

        Ok(Self {
            config,
            registry,
            map_sync,
            importer,
            loading: AtomicBool::new(true),
        })
    }

    /// 数据集是否仍在加载
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// 从数据源加载并整体替换登记表
    ///
    /// 无论成功或失败都会清除加载标志; 失败时登记表保持不变
    pub async fn load_dataset(&self, source: &dyn DatasetSource) -> AppResult<IngestReport> {
        let result = self.importer.load(source, &self.registry).await;
        self.loading.store(false, Ordering::SeqCst);

        match result {
            Ok(report) => Ok(report),
            Err(e) => {
                warn!(source = %source.describe(), error = %e, "数据集加载失败,登记表保持不变");
                Err(e.into())
            }
        }
    }

    /// 加载配置中的数据集文件
    pub async fn load_configured_dataset(&self) -> AppResult<IngestReport> {
        let source = FileDatasetSource::new(self.config.dataset.path.clone());
        self.load_dataset(&source).await
    }

    /// 开始新的评估流程
    pub fn start_assessment(&self) -> AssessmentFlow {
        AssessmentFlow::new(self.config.assessment.coordinate_policy)
    }
}
