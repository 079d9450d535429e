// ==========================================
// ESG 评估与项目地图 - 数据仓储层
// ==========================================
// 职责: 会话内存中的项目登记表
// 说明: 无持久化,进程结束即丢弃
// ==========================================

pub mod project_registry;

pub use project_registry::ProjectRegistry;
