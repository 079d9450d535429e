// ==========================================
// ESG 评估与项目地图 - 核心库
// ==========================================
// 技术栈: Rust + tokio + csv
// 系统定位: 可再生能源项目 ESG 问卷评分 + 项目数据集导入 + 地图标记同步
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 登记表 - 项目记录存储
pub mod repository;

// 引擎层 - 评分/推断/流程/地图同步
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 应用层 - 会话状态
pub mod app;

// 命令行定义
pub mod cli;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AssessmentStep, EsgCategory, ProjectCategory, ScoreTier};

// 领域实体
pub use domain::{AssessmentDraft, EsgScores, GeoPoint, IngestReport, ProjectId, ProjectRecord};

// 引擎
pub use engine::{infer_category, AssessmentFlow, MapSyncController, RegistrySubscriber};

// 登记表
pub use repository::ProjectRegistry;

// 应用
pub use app::{AppError, AppState};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "ESG Atlas";
